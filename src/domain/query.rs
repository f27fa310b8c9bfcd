//! User-adjustable query parameters: search text, attribute filters and sort
//! order.
//!
//! Everything here stores raw user input. Numeric bounds stay as the text the
//! user typed and are only interpreted by the accessors the derivation
//! pipeline calls, so a malformed bound never blocks the other filters.

use std::collections::BTreeSet;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::types::TypeConstraintError;

/// Ordering applied to the derived view. Exactly one is active at a time.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum SortKey {
    #[default]
    #[serde(rename = "name-asc", alias = "a-z")]
    NameAsc,
    #[serde(rename = "name-desc", alias = "z-a")]
    NameDesc,
    #[serde(rename = "price-asc", alias = "price-low-high")]
    PriceAsc,
    #[serde(rename = "price-desc", alias = "price-high-low")]
    PriceDesc,
    #[serde(rename = "rating-desc", alias = "rating-high-low")]
    RatingDesc,
}

impl SortKey {
    pub const ALL: [SortKey; 5] = [
        SortKey::NameAsc,
        SortKey::NameDesc,
        SortKey::PriceAsc,
        SortKey::PriceDesc,
        SortKey::RatingDesc,
    ];

    /// Stable machine name used in query strings.
    pub const fn as_str(self) -> &'static str {
        match self {
            SortKey::NameAsc => "name-asc",
            SortKey::NameDesc => "name-desc",
            SortKey::PriceAsc => "price-asc",
            SortKey::PriceDesc => "price-desc",
            SortKey::RatingDesc => "rating-desc",
        }
    }

    /// Human readable label for sort pickers.
    pub const fn label(self) -> &'static str {
        match self {
            SortKey::NameAsc => "A-Z",
            SortKey::NameDesc => "Z-A",
            SortKey::PriceAsc => "Price: Low to High",
            SortKey::PriceDesc => "Price: High to Low",
            SortKey::RatingDesc => "Rating: High to Low",
        }
    }

    /// Parses a query-string value, falling back to the default order for
    /// anything unrecognised.
    pub fn parse_or_default(value: Option<&str>) -> Self {
        match value.map(str::trim).filter(|v| !v.is_empty()) {
            None => SortKey::default(),
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                log::debug!("Ignoring unknown sort key {raw:?}");
                SortKey::default()
            }),
        }
    }
}

impl Display for SortKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = TypeConstraintError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "name-asc" | "a-z" => Ok(SortKey::NameAsc),
            "name-desc" | "z-a" => Ok(SortKey::NameDesc),
            "price-asc" | "price-low-high" => Ok(SortKey::PriceAsc),
            "price-desc" | "price-high-low" => Ok(SortKey::PriceDesc),
            "rating-desc" | "rating-high-low" => Ok(SortKey::RatingDesc),
            other => Err(TypeConstraintError::InvalidValue(other.to_string())),
        }
    }
}

/// Numeric filter fields that accept free-form user text.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum FilterField {
    MinPrice,
    MaxPrice,
    MinRating,
}

impl FilterField {
    pub const fn as_str(self) -> &'static str {
        match self {
            FilterField::MinPrice => "min_price",
            FilterField::MaxPrice => "max_price",
            FilterField::MinRating => "min_rating",
        }
    }
}

/// Free-text search shared between the search input and the pipeline.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct QueryState {
    pub search_text: String,
}

impl QueryState {
    pub fn set(&mut self, text: impl Into<String>) {
        self.search_text = text.into();
    }

    pub fn clear(&mut self) {
        self.search_text.clear();
    }

    /// Trimmed, lower-cased search term, or `None` when there is nothing to
    /// search for.
    pub fn term(&self) -> Option<String> {
        normalize_search(&self.search_text)
    }
}

/// Trims and lower-cases a search string; whitespace-only input means no
/// search at all.
pub fn normalize_search(raw: &str) -> Option<String> {
    let term = raw.trim().to_lowercase();
    if term.is_empty() { None } else { Some(term) }
}

/// Predicate parameters adjusted by the user.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct FilterParameters {
    pub min_price: Option<String>,
    pub max_price: Option<String>,
    pub min_rating: Option<String>,
    /// Membership set; insertion order carries no meaning.
    pub selected_tags: BTreeSet<String>,
}

impl FilterParameters {
    /// Stores raw text for a numeric field. Empty text clears the field.
    pub fn set(&mut self, field: FilterField, value: impl Into<String>) {
        let value = value.into();
        let value = if value.trim().is_empty() {
            None
        } else {
            Some(value)
        };
        match field {
            FilterField::MinPrice => self.min_price = value,
            FilterField::MaxPrice => self.max_price = value,
            FilterField::MinRating => self.min_rating = value,
        }
    }

    pub fn get(&self, field: FilterField) -> Option<&str> {
        match field {
            FilterField::MinPrice => self.min_price.as_deref(),
            FilterField::MaxPrice => self.max_price.as_deref(),
            FilterField::MinRating => self.min_rating.as_deref(),
        }
    }

    /// Adds the tag when absent, removes it when present. Returns whether the
    /// tag is selected afterwards.
    pub fn toggle_tag(&mut self, tag: impl Into<String>) -> bool {
        let tag = tag.into();
        if self.selected_tags.remove(&tag) {
            false
        } else {
            self.selected_tags.insert(tag);
            true
        }
    }

    /// `true` when any field holds user input, valid or not.
    pub fn is_active(&self) -> bool {
        self.min_price.is_some()
            || self.max_price.is_some()
            || self.min_rating.is_some()
            || !self.selected_tags.is_empty()
    }

    pub fn min_price(&self) -> Option<f64> {
        parse_bound(FilterField::MinPrice, self.min_price.as_deref())
    }

    pub fn max_price(&self) -> Option<f64> {
        parse_bound(FilterField::MaxPrice, self.max_price.as_deref())
    }

    pub fn min_rating(&self) -> Option<f64> {
        parse_bound(FilterField::MinRating, self.min_rating.as_deref())
    }
}

/// Interprets a raw bound. Anything that is not a finite, non-negative number
/// is treated as an absent bound.
pub fn parse_bound(field: FilterField, raw: Option<&str>) -> Option<f64> {
    let raw = raw.map(str::trim).filter(|v| !v.is_empty())?;
    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 0.0 => Some(value),
        _ => {
            log::debug!("Ignoring invalid {} filter value {raw:?}", field.as_str());
            None
        }
    }
}
