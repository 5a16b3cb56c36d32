use std::collections::HashSet;

use shared::{
    domain::{ProductId, ProductSummary},
    protocol::ProductPage,
};
use tracing::debug;

pub const DEFAULT_SCROLL_THRESHOLD: f64 = 200.0;

/// Ticket for one in-flight page fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub generation: u64,
    pub page: u64,
}

/// Accumulated listing behind an infinitely scrolling view.
///
/// Every filter change starts a new generation; a page that arrives for an
/// older generation is dropped instead of being appended to the new list.
#[derive(Debug, Clone)]
pub struct ProductFeed {
    items: Vec<ProductSummary>,
    seen: HashSet<ProductId>,
    next_page: u64,
    last_page: Option<u64>,
    total: Option<u64>,
    loading: bool,
    generation: u64,
    threshold: f64,
}

impl Default for ProductFeed {
    fn default() -> Self {
        Self::new(DEFAULT_SCROLL_THRESHOLD)
    }
}

impl ProductFeed {
    pub fn new(threshold: f64) -> Self {
        Self {
            items: Vec::new(),
            seen: HashSet::new(),
            next_page: 1,
            last_page: None,
            total: None,
            loading: false,
            generation: 0,
            threshold,
        }
    }

    pub fn items(&self) -> &[ProductSummary] {
        &self.items
    }

    pub fn total(&self) -> Option<u64> {
        self.total
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_exhausted(&self) -> bool {
        self.last_page.is_some_and(|last| self.next_page > last)
    }

    pub fn has_more(&self) -> bool {
        !self.is_exhausted()
    }

    pub fn reset(&mut self) {
        self.items.clear();
        self.seen.clear();
        self.next_page = 1;
        self.last_page = None;
        self.total = None;
        self.loading = false;
        self.generation += 1;
    }

    /// Claims the next page, or `None` while a fetch runs or nothing is left.
    pub fn begin_load(&mut self) -> Option<PageRequest> {
        if self.loading || self.is_exhausted() {
            return None;
        }
        self.loading = true;
        Some(PageRequest {
            generation: self.generation,
            page: self.next_page,
        })
    }

    /// Appends a fetched page. Returns false when the page was stale.
    pub fn apply_page(&mut self, request: PageRequest, page: ProductPage<ProductSummary>) -> bool {
        if request.generation != self.generation {
            debug!(
                stale = request.generation,
                current = self.generation,
                "dropping page for superseded filters"
            );
            return false;
        }
        self.loading = false;
        for item in page.data {
            if self.seen.insert(item.id) {
                self.items.push(item);
            }
        }
        self.next_page = page.current_page.max(request.page) + 1;
        self.last_page = Some(page.last_page);
        self.total = Some(page.total);
        true
    }

    pub fn fail(&mut self, request: PageRequest) {
        if request.generation == self.generation {
            self.loading = false;
        }
    }

    /// True when the viewport is within the threshold of the list bottom and
    /// another page could be fetched.
    pub fn should_load_more(
        &self,
        scroll_top: f64,
        viewport_height: f64,
        content_height: f64,
    ) -> bool {
        !self.loading
            && !self.is_exhausted()
            && scroll_top + viewport_height >= content_height - self.threshold
    }
}

#[cfg(test)]
#[path = "tests/feed_tests.rs"]
mod tests;
