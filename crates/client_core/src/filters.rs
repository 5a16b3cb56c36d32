use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub const DEFAULT_MIN_PRICE: f64 = 0.0;
pub const DEFAULT_MAX_PRICE: f64 = 1000.0;

/// Filter form state, mirrored onto the listing query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterState {
    pub min_price: f64,
    pub max_price: f64,
    pub category: String,
    pub name: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            min_price: DEFAULT_MIN_PRICE,
            max_price: DEFAULT_MAX_PRICE,
            category: String::new(),
            name: String::new(),
            start_date: None,
            end_date: None,
        }
    }
}

/// Partial update; `None` leaves a field untouched. Dates use a nested
/// option so a patch can clear them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterPatch {
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub category: Option<String>,
    pub name: Option<String>,
    pub start_date: Option<Option<NaiveDate>>,
    pub end_date: Option<Option<NaiveDate>>,
}

impl FilterPatch {
    pub fn name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn category(category: impl Into<String>) -> Self {
        Self {
            category: Some(category.into()),
            ..Self::default()
        }
    }

    pub fn price(min_price: f64, max_price: f64) -> Self {
        Self {
            min_price: Some(min_price),
            max_price: Some(max_price),
            ..Self::default()
        }
    }

    pub fn dates(start_date: Option<NaiveDate>, end_date: Option<NaiveDate>) -> Self {
        Self {
            start_date: Some(start_date),
            end_date: Some(end_date),
            ..Self::default()
        }
    }
}

impl FilterState {
    /// Merges `patch` in and reports whether the state changed.
    pub fn apply(&mut self, patch: FilterPatch) -> bool {
        let before = self.clone();
        if let Some(v) = patch.min_price {
            self.min_price = sanitize_price(v);
        }
        if let Some(v) = patch.max_price {
            self.max_price = sanitize_price(v);
        }
        if let Some(v) = patch.category {
            self.category = v.trim().to_string();
        }
        if let Some(v) = patch.name {
            self.name = v.trim().to_string();
        }
        if let Some(v) = patch.start_date {
            self.start_date = v;
        }
        if let Some(v) = patch.end_date {
            self.end_date = v;
        }
        *self != before
    }

    /// A zero bound (including a cleared field) disables the range, the same
    /// way the server treats it.
    pub fn price_range(&self) -> Option<(f64, f64)> {
        (self.min_price > 0.0 && self.max_price > 0.0)
            .then_some((self.min_price, self.max_price))
    }

    pub fn query_pairs(&self, page: u64, per_page: u64) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some((min, max)) = self.price_range() {
            pairs.push(("min_price", min.to_string()));
            pairs.push(("max_price", max.to_string()));
        }
        if !self.name.is_empty() {
            pairs.push(("name", self.name.clone()));
        }
        if !self.category.is_empty() {
            pairs.push(("category", self.category.clone()));
        }
        if let Some(date) = self.start_date {
            pairs.push(("start_date", date.format("%Y-%m-%d").to_string()));
        }
        if let Some(date) = self.end_date {
            pairs.push(("end_date", date.format("%Y-%m-%d").to_string()));
        }
        pairs.push(("page", page.to_string()));
        pairs.push(("per_page", per_page.to_string()));
        pairs
    }
}

// Number inputs yield NaN or negatives when cleared or mistyped.
fn sanitize_price(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

#[cfg(test)]
#[path = "tests/filters_tests.rs"]
mod tests;
