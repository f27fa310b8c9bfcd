//! Remote catalog endpoint.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::item::Item;
use crate::domain::types::ItemId;

pub mod http;

pub use http::HttpCatalogSource;

/// Failure reported by the remote source.
///
/// `Clone` because one failed request is observed by every cache reader.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SourceError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Remote returned status {0}")]
    Status(u16),

    #[error("Entity not found")]
    NotFound,

    #[error("Malformed response: {0}")]
    Decode(String),
}

pub type SourceResult<T> = Result<T, SourceError>;

#[cfg_attr(any(test, feature = "test-mocks"), mockall::automock)]
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Fetches the whole catalog collection.
    async fn fetch_catalog(&self) -> SourceResult<Vec<Item>>;
    /// Fetches a single item for the detail view.
    async fn fetch_item(&self, id: ItemId) -> SourceResult<Item>;
}
