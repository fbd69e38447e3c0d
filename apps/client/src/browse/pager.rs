/// Page cursor. Pages are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    page: u32,
    limit: u32,
}

impl Pager {
    pub fn new(limit: u32) -> Self {
        Self { page: 1, limit }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Advances one page. No-op on the last page. Returns whether it moved.
    pub fn next(&mut self, total_pages: u32) -> bool {
        if self.page >= total_pages {
            return false;
        }
        self.page += 1;
        true
    }

    /// Goes back one page. No-op on the first page. Returns whether it moved.
    pub fn previous(&mut self) -> bool {
        if self.page <= 1 {
            return false;
        }
        self.page -= 1;
        true
    }

    pub fn reset(&mut self) {
        self.page = 1;
    }
}

/// Ceiling of `total / limit`; zero when `limit` is zero.
pub fn total_pages(total: u32, limit: u32) -> u32 {
    if limit == 0 {
        return 0;
    }
    total.div_ceil(limit)
}
