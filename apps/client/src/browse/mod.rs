// Paginated, debounced catalog browsing.
// The skill and area pickers share one state machine: typing restarts a
// quiet period, and once it elapses the list jumps back to page 1 and reloads.

pub mod debounce;
pub mod pager;
pub mod picker;

pub use picker::{Catalog, CatalogPage, CatalogPicker, Selection};
