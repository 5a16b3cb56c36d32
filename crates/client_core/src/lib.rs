//! Client side of the catalog browser: filter form state, the debounced
//! search box, the infinitely scrolling product feed, and the HTTP client
//! that feeds them.

pub mod browser;
pub mod client;
pub mod debounce;
pub mod feed;
pub mod filters;

pub use browser::{CatalogBrowser, PendingPage};
pub use client::CatalogClient;
pub use debounce::SearchDebouncer;
pub use feed::{PageRequest, ProductFeed};
pub use filters::{FilterPatch, FilterState};
