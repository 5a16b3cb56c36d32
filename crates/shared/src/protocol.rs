use serde::{Deserialize, Serialize};

/// One page of a filtered listing.
///
/// Field names match the length-aware paginator JSON that existing front ends
/// already consume (`data`, `current_page`, `last_page`, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductPage<T> {
    pub current_page: u64,
    pub data: Vec<T>,
    pub first_page_url: String,
    pub from: Option<u64>,
    pub last_page: u64,
    pub last_page_url: String,
    #[serde(default)]
    pub links: Vec<PageLink>,
    pub next_page_url: Option<String>,
    pub path: String,
    pub per_page: u64,
    pub prev_page_url: Option<String>,
    pub to: Option<u64>,
    pub total: u64,
}

impl<T> ProductPage<T> {
    pub fn has_more(&self) -> bool {
        self.current_page < self.last_page
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageLink {
    pub url: Option<String>,
    pub label: String,
    pub active: bool,
}

/// Envelope returned by the upstream `/products` listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamListing<T> {
    pub products: Vec<T>,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub skip: u64,
    #[serde(default)]
    pub limit: u64,
}
