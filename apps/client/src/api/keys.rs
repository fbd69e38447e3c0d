// Query keys. A mutation invalidates by prefix, so `analysis_all()` covers
// every page and every detail entry.

use crate::query::QueryKey;

pub fn me() -> QueryKey {
    QueryKey::new("me")
}

pub fn areas(page: u32, limit: u32, search: Option<&str>) -> QueryKey {
    QueryKey::new("areas").with(page).with(limit).with(search)
}

pub fn user_area() -> QueryKey {
    QueryKey::new("user-area")
}

pub fn skills(page: u32, limit: u32, search: Option<&str>) -> QueryKey {
    QueryKey::new("skills").with(page).with(limit).with(search)
}

pub fn user_skills() -> QueryKey {
    QueryKey::new("user-skills")
}

pub fn analysis_all() -> QueryKey {
    QueryKey::new("analysis")
}

pub fn analysis_page(page: u32, limit: u32) -> QueryKey {
    analysis_all().with(page).with(limit)
}

pub fn analysis_detail(id: &str) -> QueryKey {
    analysis_all().with(id)
}
