//! Catalog picker, the state machine behind "add skill" and "set area".
//!
//! State: `{pager, search_term, debounced search}`. The list is (re)loaded:
//! - when the debounced search term changes (page resets to 1 first),
//! - when the page moves,
//! - on explicit `load`.

use async_trait::async_trait;

use crate::browse::debounce::{Debounced, SEARCH_DEBOUNCE};
use crate::browse::pager::Pager;
use crate::errors::ClientError;

/// One page of catalog results.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogPage<T> {
    pub items: Vec<T>,
    pub total: u32,
    pub total_pages: u32,
}

/// A browsable catalog whose items can be chosen for the current user.
#[async_trait]
pub trait Catalog: Send + Sync {
    type Item: Clone + Send + Sync;

    async fn list(
        &self,
        page: u32,
        limit: u32,
        search: Option<&str>,
    ) -> Result<CatalogPage<Self::Item>, ClientError>;

    async fn choose(&self, item: &Self::Item) -> Result<(), ClientError>;

    /// Whether a selection must be confirmed before it is applied.
    fn requires_confirmation(&self) -> bool {
        false
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    Chosen,
    AwaitingConfirmation,
}

pub struct CatalogPicker<C: Catalog> {
    catalog: C,
    pager: Pager,
    search_term: String,
    search: Debounced<String>,
    current: Option<CatalogPage<C::Item>>,
    pending: Option<C::Item>,
}

impl<C: Catalog> CatalogPicker<C> {
    pub fn new(catalog: C, limit: u32) -> Self {
        Self {
            catalog,
            pager: Pager::new(limit),
            search_term: String::new(),
            search: Debounced::new(String::new(), SEARCH_DEBOUNCE),
            current: None,
            pending: None,
        }
    }

    pub fn page(&self) -> u32 {
        self.pager.page()
    }

    #[cfg(test)]
    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    #[cfg(test)]
    pub fn debounced_search(&self) -> &str {
        self.search.value()
    }

    pub fn current(&self) -> Option<&CatalogPage<C::Item>> {
        self.current.as_ref()
    }

    pub fn total_pages(&self) -> u32 {
        self.current.as_ref().map_or(0, |p| p.total_pages)
    }

    #[cfg(test)]
    pub fn pending(&self) -> Option<&C::Item> {
        self.pending.as_ref()
    }

    /// Records a keystroke. Nothing is fetched until the quiet period passes.
    pub fn type_search(&mut self, term: &str) {
        self.search_term = term.to_string();
        self.search.set(self.search_term.clone());
    }

    /// Waits for the debounce; if the settled term changed, resets to page 1 and reloads.
    pub async fn settle(&mut self) -> Result<bool, ClientError> {
        if !self.search.settle().await {
            return Ok(false);
        }
        self.pager.reset();
        self.load().await?;
        Ok(true)
    }

    pub async fn load(&mut self) -> Result<&CatalogPage<C::Item>, ClientError> {
        let search = self.search.value().clone();
        let page = self
            .catalog
            .list(self.pager.page(), self.pager.limit(), Some(search.as_str()))
            .await?;
        Ok(self.current.insert(page))
    }

    /// No-op (and no fetch) on the last page.
    pub async fn next_page(&mut self) -> Result<bool, ClientError> {
        if !self.pager.next(self.total_pages()) {
            return Ok(false);
        }
        self.load().await?;
        Ok(true)
    }

    /// No-op (and no fetch) on the first page.
    pub async fn previous_page(&mut self) -> Result<bool, ClientError> {
        if !self.pager.previous() {
            return Ok(false);
        }
        self.load().await?;
        Ok(true)
    }

    /// Steps toward `target` one page at a time, stopping at either boundary.
    /// Returns the page it ended on.
    pub async fn go_to_page(&mut self, target: u32) -> Result<u32, ClientError> {
        while self.page() < target && self.next_page().await? {}
        while self.page() > target && self.previous_page().await? {}
        Ok(self.page())
    }

    pub async fn select(&mut self, item: C::Item) -> Result<Selection, ClientError> {
        if self.catalog.requires_confirmation() {
            self.pending = Some(item);
            return Ok(Selection::AwaitingConfirmation);
        }
        self.catalog.choose(&item).await?;
        self.reset();
        Ok(Selection::Chosen)
    }

    /// Applies the pending selection. Returns false when nothing was pending.
    /// On failure the selection stays pending so the user can retry.
    pub async fn confirm(&mut self) -> Result<bool, ClientError> {
        let Some(item) = self.pending.take() else {
            return Ok(false);
        };
        if let Err(e) = self.catalog.choose(&item).await {
            self.pending = Some(item);
            return Err(e);
        }
        self.reset();
        Ok(true)
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// Back to the initial state: empty search, page 1, nothing pending.
    pub fn reset(&mut self) {
        self.search_term.clear();
        self.search = Debounced::new(String::new(), SEARCH_DEBOUNCE);
        self.pager.reset();
        self.pending = None;
    }
}
