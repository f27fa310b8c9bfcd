//! Catalog browsing session: query parameters, pagination and rendering.

use crate::cache::CacheSnapshot;
use crate::domain::item::Item;
use crate::domain::query::{FilterField, SortKey};
use crate::dto::catalog::{CatalogPageData, CatalogQuery, ViewStatus};
use crate::pagination::{PageSlice, PageState, Paginated, paginate};
use crate::pipeline;
use crate::services::catalog_client::CatalogClient;
use crate::services::{ServiceError, ServiceResult};
use crate::store::CatalogStore;

/// Single owner of one session's search text, filters, sort and page.
///
/// Every parameter change resets the page to 1. Rendering always re-derives
/// from the latest parameters and cache state.
pub struct CatalogView {
    client: CatalogClient,
    store: CatalogStore,
    page: PageState,
}

impl CatalogView {
    pub fn new(client: CatalogClient, page_size: usize) -> Self {
        Self {
            client,
            store: CatalogStore::default(),
            page: PageState::new(page_size),
        }
    }

    pub fn store(&self) -> &CatalogStore {
        &self.store
    }

    pub fn current_page(&self) -> usize {
        self.page.current()
    }

    /// Page count as of the last render.
    pub fn total_pages(&self) -> usize {
        self.page.total_pages()
    }

    pub fn set_search(&mut self, text: impl Into<String>) {
        if self.store.set_search(text) {
            self.page.reset();
        }
    }

    pub fn set_filter(&mut self, field: FilterField, value: impl Into<String>) {
        if self.store.set_filter(field, value) {
            self.page.reset();
        }
    }

    pub fn toggle_tag(&mut self, tag: impl Into<String>) {
        if self.store.toggle_tag(tag) {
            self.page.reset();
        }
    }

    pub fn set_sort(&mut self, sort: SortKey) {
        if self.store.set_sort(sort) {
            self.page.reset();
        }
    }

    pub fn clear_all(&mut self) {
        self.store.clear_all();
        self.page.reset();
    }

    /// Navigates to `page` if the last render had that many pages.
    pub fn set_page(&mut self, page: usize) -> bool {
        self.page.set(page)
    }

    pub fn next_page(&mut self) -> bool {
        self.page.next()
    }

    pub fn prev_page(&mut self) -> bool {
        self.page.prev()
    }

    /// Re-derives the visible page from whatever the cache holds now,
    /// starting a fetch if the policy asks for one.
    pub fn render(&mut self) -> CatalogPageData {
        let snapshot = self.client.catalog();
        self.render_with(&snapshot)
    }

    /// Like [`CatalogView::render`], but waits for the first payload when
    /// nothing is cached yet.
    pub async fn load(&mut self) -> CatalogPageData {
        let snapshot = self.client.load_catalog().await;
        self.render_with(&snapshot)
    }

    pub fn render_with(&mut self, snapshot: &CacheSnapshot<Vec<Item>>) -> CatalogPageData {
        let items: &[Item] = snapshot
            .data
            .as_deref()
            .map(Vec::as_slice)
            .unwrap_or_default();
        let derived = pipeline::derive(
            items,
            self.store.search(),
            self.store.filters(),
            self.store.sort(),
        );

        self.page.sync(derived.len());
        let PageSlice { slice, total_pages } =
            paginate(&derived, self.page.page_size(), self.page.current());

        let status = if snapshot.is_loading {
            ViewStatus::Loading
        } else if snapshot.data.is_none() {
            if snapshot.error.is_some() {
                ViewStatus::Failed
            } else {
                ViewStatus::Loading
            }
        } else if derived.is_empty() {
            ViewStatus::NoMatches
        } else {
            ViewStatus::Ready
        };

        let sort = self.store.sort();
        CatalogPageData {
            products: Paginated::new(
                slice.into_iter().cloned().collect(),
                self.page.current(),
                total_pages,
            ),
            total_items: items.len(),
            matched_items: derived.len(),
            available_tags: pipeline::available_tags(items),
            has_active_filters: self.store.has_active_filters(),
            search: self.store.search().to_string(),
            filters: self.store.filters().clone(),
            sort,
            sort_label: sort.label(),
            status,
            error: snapshot.error.as_ref().map(ToString::to_string),
            is_validating: snapshot.is_validating,
        }
    }

    /// Applies every parameter of `query` except the page. Tags are only
    /// ever added, so this is meant for a fresh view.
    pub fn apply(&mut self, query: &CatalogQuery) {
        self.set_search(query.search.clone().unwrap_or_default());
        self.set_filter(FilterField::MinPrice, query.min_price.clone().unwrap_or_default());
        self.set_filter(FilterField::MaxPrice, query.max_price.clone().unwrap_or_default());
        self.set_filter(FilterField::MinRating, query.min_rating.clone().unwrap_or_default());
        for tag in &query.tags {
            if !self.store.filters().selected_tags.contains(tag) {
                self.toggle_tag(tag.clone());
            }
        }
        self.set_sort(SortKey::parse_or_default(query.sort.as_deref()));
    }
}

/// Loads the catalog page described by `query`.
///
/// Fails only when there is no payload to derive from; a failed refresh over
/// cached data still renders, with the error attached.
pub async fn load_catalog_page(
    client: &CatalogClient,
    query: CatalogQuery,
    page_size: usize,
) -> ServiceResult<CatalogPageData> {
    let snapshot = client.load_catalog().await;
    if snapshot.data.is_none() {
        return Err(match snapshot.error {
            Some(err) => {
                log::error!("Failed to load catalog: {err}");
                ServiceError::from(err)
            }
            None => ServiceError::Unavailable,
        });
    }

    let mut view = CatalogView::new(client.clone(), page_size);
    view.apply(&query);
    view.render_with(&snapshot);

    if let Some(page) = query.page_number() {
        if !view.set_page(page) {
            log::debug!("Ignoring out of range page {page}");
        }
    }

    Ok(view.render_with(&snapshot))
}
