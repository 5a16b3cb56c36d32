use shared::{
    error::ApiError,
    protocol::{PageLink, ProductPage},
};
use url::form_urlencoded;

use crate::filter::{present, ProductListParams};

pub const DEFAULT_PER_PAGE: u64 = 10;
pub const MAX_PER_PAGE: u64 = 100;

const PREVIOUS_LABEL: &str = "&laquo; Previous";
const NEXT_LABEL: &str = "Next &raquo;";
const GAP_LABEL: &str = "...";
const LINKS_ON_EACH_SIDE: u64 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationDefaults {
    pub per_page: u64,
    pub max_per_page: u64,
}

impl Default for PaginationDefaults {
    fn default() -> Self {
        Self {
            per_page: DEFAULT_PER_PAGE,
            max_per_page: MAX_PER_PAGE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u64,
    pub per_page: u64,
}

impl PageRequest {
    pub fn from_params(
        params: &ProductListParams,
        defaults: PaginationDefaults,
    ) -> Result<Self, ApiError> {
        let max_per_page = defaults.max_per_page.max(1);
        let per_page = match present(&params.per_page) {
            Some(raw) => parse_count("per_page", raw)?,
            None => defaults.per_page,
        }
        .clamp(1, max_per_page);
        let page = match present(&params.page) {
            Some(raw) => parse_count("page", raw)?,
            None => 1,
        }
        .max(1);
        Ok(Self { page, per_page })
    }

    pub fn offset(&self) -> usize {
        let offset = (self.page - 1).saturating_mul(self.per_page);
        usize::try_from(offset).unwrap_or(usize::MAX)
    }
}

// Negative values clamp like zero does; anything non-integral is rejected.
fn parse_count(field: &str, raw: &str) -> Result<u64, ApiError> {
    raw.parse::<i64>()
        .map(|value| value.max(0) as u64)
        .map_err(|_| ApiError::validation(format!("{field} must be an integer, got '{raw}'")))
}

/// Builds page URLs that keep the caller's other query parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageUrls {
    path: String,
    query: Vec<(String, String)>,
}

impl PageUrls {
    pub fn new(path: impl Into<String>, raw_query: Option<&str>) -> Self {
        let query = raw_query
            .map(|raw| {
                form_urlencoded::parse(raw.as_bytes())
                    .map(|(key, value)| (key.into_owned(), value.into_owned()))
                    .collect()
            })
            .unwrap_or_default();
        Self {
            path: path.into(),
            query,
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// `page` replaces an existing `page` pair in place, otherwise it goes last.
    pub fn url(&self, page: u64) -> String {
        let page = page.to_string();
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        let mut replaced = false;
        for (key, value) in &self.query {
            if key == "page" {
                if !replaced {
                    serializer.append_pair("page", &page);
                    replaced = true;
                }
            } else {
                serializer.append_pair(key, value);
            }
        }
        if !replaced {
            serializer.append_pair("page", &page);
        }
        format!("{}?{}", self.path, serializer.finish())
    }
}

pub fn paginate<T>(items: Vec<T>, request: PageRequest, urls: &PageUrls) -> ProductPage<T> {
    let total = items.len() as u64;
    let per_page = request.per_page.max(1);
    let current_page = request.page.max(1);
    let last_page = total.div_ceil(per_page).max(1);

    let data: Vec<T> = items
        .into_iter()
        .skip(request.offset())
        .take(per_page as usize)
        .collect();

    let (from, to) = if data.is_empty() {
        (None, None)
    } else {
        let from = (current_page - 1) * per_page + 1;
        (Some(from), Some(from + data.len() as u64 - 1))
    };

    ProductPage {
        current_page,
        data,
        first_page_url: urls.url(1),
        from,
        last_page,
        last_page_url: urls.url(last_page),
        links: page_links(current_page, last_page, urls),
        next_page_url: (current_page < last_page).then(|| urls.url(current_page + 1)),
        path: urls.path().to_string(),
        per_page,
        prev_page_url: (current_page > 1).then(|| urls.url(current_page - 1)),
        to,
        total,
    }
}

fn page_links(current: u64, last: u64, urls: &PageUrls) -> Vec<PageLink> {
    let mut links = Vec::new();
    links.push(PageLink {
        url: (current > 1).then(|| urls.url(current - 1)),
        label: PREVIOUS_LABEL.to_string(),
        active: false,
    });
    for slot in link_window(current, last) {
        links.push(match slot {
            Some(page) => PageLink {
                url: Some(urls.url(page)),
                label: page.to_string(),
                active: page == current,
            },
            None => PageLink {
                url: None,
                label: GAP_LABEL.to_string(),
                active: false,
            },
        });
    }
    links.push(PageLink {
        url: (current < last).then(|| urls.url(current + 1)),
        label: NEXT_LABEL.to_string(),
        active: false,
    });
    links
}

/// Page numbers for the `links` array, `None` marking a gap.
///
/// Short listings show every page. Longer ones keep the first two and last two
/// pages plus a slider around the current page; near either end the slider
/// merges into a fixed block of ten pages.
pub(crate) fn link_window(current: u64, last: u64) -> Vec<Option<u64>> {
    let slider = LINKS_ON_EACH_SIDE + 4;
    if last < LINKS_ON_EACH_SIDE * 2 + 8 {
        return (1..=last).map(Some).collect();
    }

    let block = slider + LINKS_ON_EACH_SIDE;
    let (head, middle, tail) = if current <= slider {
        (1..=block, None, last - 1..=last)
    } else if current > last - slider {
        (1..=2, None, last + 1 - block..=last)
    } else {
        (
            1..=2,
            Some(current - LINKS_ON_EACH_SIDE..=current + LINKS_ON_EACH_SIDE),
            last - 1..=last,
        )
    };

    let mut window: Vec<Option<u64>> = head.map(Some).collect();
    if let Some(middle) = middle {
        window.push(None);
        window.extend(middle.map(Some));
    }
    window.push(None);
    window.extend(tail.map(Some));
    window
}

#[cfg(test)]
#[path = "tests/paginate_tests.rs"]
mod tests;
