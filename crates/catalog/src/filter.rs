use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::{domain::Product, error::ApiError};

use crate::dates::{parse_bound, Bound};

/// Raw listing query, exactly as the caller sent it.
///
/// Everything stays a string until [`ProductFilter::from_params`] and
/// [`crate::paginate::PageRequest::from_params`] validate it, so blank inputs
/// and the `null` placeholders some front ends send can be told apart from
/// real values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ProductListParams {
    pub min_price: Option<String>,
    pub max_price: Option<String>,
    #[serde(alias = "search")]
    pub name: Option<String>,
    pub category: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub page: Option<String>,
    pub per_page: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
}

impl PriceRange {
    pub fn contains(&self, price: f64) -> bool {
        price >= self.min && price <= self.max
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateWindow {
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

impl DateWindow {
    pub fn is_open(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    pub fn contains(&self, instant: Option<DateTime<Utc>>) -> bool {
        if self.is_open() {
            return true;
        }
        let Some(instant) = instant else {
            return false;
        };
        self.start.map_or(true, |start| instant >= start)
            && self.end.map_or(true, |end| instant <= end)
    }
}

/// Conjunction of the active listing predicates.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductFilter {
    pub price: Option<PriceRange>,
    pub name: Option<String>,
    pub category: Option<String>,
    pub created: DateWindow,
}

impl ProductFilter {
    pub fn from_params(params: &ProductListParams) -> Result<Self, ApiError> {
        let min_price = present(&params.min_price)
            .map(|raw| parse_price("min_price", raw))
            .transpose()?;
        let max_price = present(&params.max_price)
            .map(|raw| parse_price("max_price", raw))
            .transpose()?;
        // A zero bound reads as an empty field, so it switches the range off.
        let price = match (min_price, max_price) {
            (Some(min), Some(max)) if min != 0.0 && max != 0.0 => Some(PriceRange { min, max }),
            _ => None,
        };

        let created = DateWindow {
            start: present(&params.start_date)
                .map(|raw| parse_date("start_date", raw, Bound::Start))
                .transpose()?,
            end: present(&params.end_date)
                .map(|raw| parse_date("end_date", raw, Bound::End))
                .transpose()?,
        };

        Ok(Self {
            price,
            name: present(&params.name).map(str::to_lowercase),
            category: present(&params.category).map(str::to_lowercase),
            created,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.price.is_none()
            && self.name.is_none()
            && self.category.is_none()
            && self.created.is_open()
    }

    pub fn matches(&self, product: &Product) -> bool {
        if let Some(range) = &self.price {
            if !range.contains(product.price) {
                return false;
            }
        }
        if let Some(name) = &self.name {
            if !product.title.to_lowercase().contains(name.as_str()) {
                return false;
            }
        }
        if let Some(category) = &self.category {
            if product.category.to_lowercase() != *category {
                return false;
            }
        }
        self.created.contains(product.created_at())
    }

    pub fn apply(&self, products: Vec<Product>) -> Vec<Product> {
        if self.is_empty() {
            return products;
        }
        products
            .into_iter()
            .filter(|product| self.matches(product))
            .collect()
    }
}

/// Trimmed value, or `None` for blank input and unset-value placeholders.
pub(crate) fn present(raw: &Option<String>) -> Option<&str> {
    let value = raw.as_deref()?.trim();
    if value.is_empty() || value == "null" || value == "undefined" {
        None
    } else {
        Some(value)
    }
}

fn parse_price(field: &str, raw: &str) -> Result<f64, ApiError> {
    raw.parse::<f64>()
        .ok()
        .filter(|price| price.is_finite())
        .ok_or_else(|| ApiError::validation(format!("{field} must be a number, got '{raw}'")))
}

fn parse_date(field: &str, raw: &str, bound: Bound) -> Result<DateTime<Utc>, ApiError> {
    parse_bound(raw, bound).map_err(|err| ApiError::validation(format!("{field}: {err}")))
}

#[cfg(test)]
#[path = "tests/filter_tests.rs"]
mod tests;
