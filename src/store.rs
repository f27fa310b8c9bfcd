//! Search, filter and sort parameters of one browsing session.
//!
//! The store keeps raw user input only; interpretation happens in
//! [`crate::pipeline`]. Every mutator reports whether it changed anything so
//! the owner can reset pagination.

use serde::Serialize;

use crate::domain::query::{FilterField, FilterParameters, QueryState, SortKey};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CatalogStore {
    query: QueryState,
    filters: FilterParameters,
    sort: SortKey,
}

impl CatalogStore {
    pub fn search(&self) -> &str {
        &self.query.search_text
    }

    pub fn query(&self) -> &QueryState {
        &self.query
    }

    pub fn filters(&self) -> &FilterParameters {
        &self.filters
    }

    pub fn sort(&self) -> SortKey {
        self.sort
    }

    pub fn set_search(&mut self, text: impl Into<String>) -> bool {
        let text = text.into();
        if self.query.search_text == text {
            return false;
        }
        self.query.set(text);
        true
    }

    pub fn set_filter(&mut self, field: FilterField, value: impl Into<String>) -> bool {
        let before = self.filters.get(field).map(str::to_owned);
        self.filters.set(field, value);
        before.as_deref() != self.filters.get(field)
    }

    /// Toggling always changes the selection.
    pub fn toggle_tag(&mut self, tag: impl Into<String>) -> bool {
        self.filters.toggle_tag(tag);
        true
    }

    pub fn set_sort(&mut self, sort: SortKey) -> bool {
        if self.sort == sort {
            return false;
        }
        self.sort = sort;
        true
    }

    /// `true` when any attribute filter holds input. Search text and sort
    /// order do not count.
    pub fn has_active_filters(&self) -> bool {
        self.filters.is_active()
    }

    /// Resets filters, sort and search text in one step. Returns whether
    /// anything was set before.
    pub fn clear_all(&mut self) -> bool {
        let cleared = Self::default();
        if *self == cleared {
            return false;
        }
        *self = cleared;
        true
    }
}
