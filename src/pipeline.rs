//! Derivation pipeline: raw collection + query parameters -> ordered view.
//!
//! Stages run in a fixed order: search, numeric bounds, tag membership, then a
//! stable sort. All predicates are conjunctive, so the order only matters for
//! how much work the sort does, never for which items survive.

use std::cmp::Ordering;
use std::collections::{BTreeSet, HashSet};

use crate::domain::item::Item;
use crate::domain::query::{FilterParameters, SortKey, normalize_search};

/// Numeric bounds resolved once per derivation.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
struct Bounds {
    min_price: Option<f64>,
    max_price: Option<f64>,
    min_rating: Option<f64>,
}

impl Bounds {
    fn from_filters(filters: &FilterParameters) -> Self {
        Self {
            min_price: filters.min_price(),
            max_price: filters.max_price(),
            min_rating: filters.min_rating(),
        }
    }

    fn admits(&self, item: &Item) -> bool {
        self.min_price.is_none_or(|min| item.price >= min)
            && self.max_price.is_none_or(|max| item.price <= max)
            && self.min_rating.is_none_or(|min| item.rating >= min)
    }
}

/// Produces the derived view for the given parameters.
///
/// Pure and deterministic: equal inputs always yield the same sequence, and
/// items that compare equal under `sort` keep their relative input order.
pub fn derive<'a>(
    items: &'a [Item],
    search: &str,
    filters: &FilterParameters,
    sort: SortKey,
) -> Vec<&'a Item> {
    let term = normalize_search(search);
    let bounds = Bounds::from_filters(filters);
    let tags = &filters.selected_tags;

    let mut view: Vec<&Item> = items
        .iter()
        .filter(|item| term.as_deref().is_none_or(|term| matches_search(item, term)))
        .filter(|item| bounds.admits(item))
        .filter(|item| has_any_tag(item, tags))
        .collect();

    // `sort_by` is stable.
    view.sort_by(|a, b| compare(a, b, sort));
    view
}

/// Case-insensitive substring match against name, tags and category label.
/// `term` must already be trimmed and lower-cased.
pub fn matches_search(item: &Item, term: &str) -> bool {
    item.title.to_lowercase().contains(term)
        || item.tags.iter().any(|tag| tag.to_lowercase().contains(term))
        || item.category.to_lowercase().contains(term)
}

/// Intersection test: an empty selection admits everything.
pub fn has_any_tag(item: &Item, selected: &BTreeSet<String>) -> bool {
    selected.is_empty() || item.tags.iter().any(|tag| selected.contains(tag))
}

/// Comparator for the active sort key.
pub fn compare(a: &Item, b: &Item, sort: SortKey) -> Ordering {
    match sort {
        SortKey::NameAsc => compare_names(&a.title, &b.title),
        SortKey::NameDesc => compare_names(&b.title, &a.title),
        SortKey::PriceAsc => a.price.total_cmp(&b.price),
        SortKey::PriceDesc => b.price.total_cmp(&a.price),
        SortKey::RatingDesc => b.rating.total_cmp(&a.rating),
    }
}

fn compare_names(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase))
}

/// Unique tags across the collection in first-seen order, for filter pickers.
pub fn available_tags(items: &[Item]) -> Vec<String> {
    let mut seen = HashSet::new();
    items
        .iter()
        .flat_map(|item| item.tags.iter())
        .filter(|tag| seen.insert(tag.as_str()))
        .cloned()
        .collect()
}
