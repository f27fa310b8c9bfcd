use serde::Serialize;

use crate::domain::item::{Item, StockStatus};
use crate::domain::query::{FilterParameters, SortKey};
use crate::pagination::Paginated;

/// Query parameters accepted by the catalog listing.
///
/// Everything is kept as text so malformed values degrade to "not set"
/// instead of rejecting the whole request.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CatalogQuery {
    /// Optional search string entered by the user.
    pub search: Option<String>,
    pub min_price: Option<String>,
    pub max_price: Option<String>,
    pub min_rating: Option<String>,
    /// Selected tags; the key may repeat.
    pub tags: Vec<String>,
    pub sort: Option<String>,
    /// Page number requested by the user interface.
    pub page: Option<String>,
}

impl CatalogQuery {
    /// Builds the query from decoded `key=value` pairs, one key at a time.
    ///
    /// A repeated scalar key keeps its last value, `search` wins over its
    /// short form `q`, blank tags are skipped and unknown keys are ignored.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut query = Self::default();
        let mut short_search = None;
        for (key, value) in pairs {
            let value = value.into();
            match key.as_ref() {
                "search" => query.search = Some(value),
                "q" => short_search = Some(value),
                "min_price" => query.min_price = Some(value),
                "max_price" => query.max_price = Some(value),
                "min_rating" => query.min_rating = Some(value),
                "tags" => {
                    if !value.trim().is_empty() {
                        query.tags.push(value);
                    }
                }
                "sort" => query.sort = Some(value),
                "page" => query.page = Some(value),
                other => log::debug!("Ignoring unknown catalog query key {other:?}"),
            }
        }
        if query.search.is_none() {
            query.search = short_search;
        }
        query
    }

    /// Requested page, or `None` when absent or not a number.
    pub fn page_number(&self) -> Option<usize> {
        self.page.as_deref().and_then(|raw| raw.trim().parse().ok())
    }
}

/// Which of the mutually exclusive list states the UI should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewStatus {
    Loading,
    Failed,
    NoMatches,
    Ready,
}

/// Data required to render one catalog page.
#[derive(Debug, Clone, Serialize)]
pub struct CatalogPageData {
    /// Current page of the derived view plus the page-button window.
    pub products: Paginated<Item>,
    /// Size of the raw collection.
    pub total_items: usize,
    /// Size of the derived view.
    pub matched_items: usize,
    pub available_tags: Vec<String>,
    pub has_active_filters: bool,
    pub search: String,
    pub filters: FilterParameters,
    pub sort: SortKey,
    pub sort_label: &'static str,
    pub status: ViewStatus,
    /// Last fetch failure; may accompany stale data.
    pub error: Option<String>,
    /// A background refresh is running.
    pub is_validating: bool,
}

impl CatalogPageData {
    pub fn current_page(&self) -> usize {
        self.products.page
    }

    pub fn total_pages(&self) -> usize {
        self.products.total_pages
    }
}

/// Data required to render the product detail view.
#[derive(Debug, Clone, Serialize)]
pub struct ProductPageData {
    pub product: Item,
    pub discounted_price: f64,
    pub quantity: u32,
    pub total_price: f64,
    pub stock_status: StockStatus,
    pub review_count: usize,
}

impl ProductPageData {
    /// `quantity` is clamped to at least one.
    pub fn new(product: Item, quantity: Option<u32>) -> Self {
        let quantity = quantity.unwrap_or(1).max(1);
        let discounted_price = product.discounted_price();
        Self {
            discounted_price,
            quantity,
            total_price: discounted_price * f64::from(quantity),
            stock_status: product.stock_status(),
            review_count: product.reviews.len(),
            product,
        }
    }
}
