use std::time::Instant;

use anyhow::Result;
use shared::{
    domain::{Product, ProductId, ProductSummary},
    protocol::ProductPage,
};
use tracing::{debug, warn};

use crate::{
    client::CatalogClient,
    debounce::SearchDebouncer,
    feed::{PageRequest, ProductFeed},
    filters::{FilterPatch, FilterState},
};

pub const DEFAULT_PER_PAGE: u64 = 10;

/// A page fetch claimed from the feed, carrying the filters it was issued for.
#[derive(Debug, Clone)]
pub struct PendingPage {
    pub request: PageRequest,
    pub filters: FilterState,
    pub per_page: u64,
}

/// Keeps filter inputs, the debounced search box and the scrolled listing in
/// step with each other.
pub struct CatalogBrowser {
    client: CatalogClient,
    filters: FilterState,
    feed: ProductFeed,
    search: SearchDebouncer,
    per_page: u64,
}

impl CatalogBrowser {
    pub fn new(client: CatalogClient) -> Self {
        Self {
            client,
            filters: FilterState::default(),
            feed: ProductFeed::default(),
            search: SearchDebouncer::default(),
            per_page: DEFAULT_PER_PAGE,
        }
    }

    pub fn with_per_page(mut self, per_page: u64) -> Self {
        self.per_page = per_page.max(1);
        self
    }

    pub fn with_search_debouncer(mut self, search: SearchDebouncer) -> Self {
        self.search = search;
        self
    }

    pub fn with_feed(mut self, feed: ProductFeed) -> Self {
        self.feed = feed;
        self
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn feed(&self) -> &ProductFeed {
        &self.feed
    }

    pub fn items(&self) -> &[ProductSummary] {
        self.feed.items()
    }

    pub fn search(&self) -> &SearchDebouncer {
        &self.search
    }

    /// Applies a filter change; the listing restarts from page one if
    /// anything actually changed.
    pub fn update_filters(&mut self, patch: FilterPatch) -> bool {
        let changed = self.filters.apply(patch);
        if changed {
            debug!(filters = ?self.filters, "filters changed, restarting listing");
            self.feed.reset();
        }
        changed
    }

    pub fn search_input(&mut self, text: impl Into<String>, now: Instant) {
        self.search.input(text, now);
    }

    /// Moves settled search text into the name filter.
    pub fn poll_search(&mut self, now: Instant) -> bool {
        match self.search.poll(now) {
            Some(name) => self.update_filters(FilterPatch::name(name)),
            None => false,
        }
    }

    pub async fn settle_search(&mut self) -> bool {
        match self.search.settled().await {
            Some(name) => self.update_filters(FilterPatch::name(name)),
            None => false,
        }
    }

    pub fn begin_page(&mut self) -> Option<PendingPage> {
        let request = self.feed.begin_load()?;
        Some(PendingPage {
            request,
            filters: self.filters.clone(),
            per_page: self.per_page,
        })
    }

    /// Delivers a finished fetch. Stale results are dropped; returns whether
    /// the listing changed.
    pub fn complete_page(
        &mut self,
        pending: PendingPage,
        result: Result<ProductPage<ProductSummary>>,
    ) -> Result<bool> {
        match result {
            Ok(page) => Ok(self.feed.apply_page(pending.request, page)),
            Err(err) => {
                self.feed.fail(pending.request);
                if pending.request.generation != self.feed.generation() {
                    return Ok(false);
                }
                warn!(page = pending.request.page, error = %err, "failed to load products");
                Err(err)
            }
        }
    }

    pub async fn fetch(
        client: &CatalogClient,
        pending: &PendingPage,
    ) -> Result<ProductPage<ProductSummary>> {
        client
            .list_products(&pending.filters, pending.request.page, pending.per_page)
            .await
    }

    pub async fn load_next_page(&mut self) -> Result<bool> {
        let Some(pending) = self.begin_page() else {
            return Ok(false);
        };
        let result = Self::fetch(&self.client, &pending).await;
        self.complete_page(pending, result)
    }

    pub async fn on_scroll(
        &mut self,
        scroll_top: f64,
        viewport_height: f64,
        content_height: f64,
    ) -> Result<bool> {
        if !self
            .feed
            .should_load_more(scroll_top, viewport_height, content_height)
        {
            return Ok(false);
        }
        self.load_next_page().await
    }

    pub async fn product(&self, id: ProductId) -> Result<Product> {
        self.client.product(id).await
    }

    pub fn client(&self) -> &CatalogClient {
        &self.client
    }
}

#[cfg(test)]
#[path = "tests/browser_tests.rs"]
mod tests;
