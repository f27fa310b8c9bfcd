//! Cached access to the remote catalog.

use std::sync::Arc;

use tokio::sync::watch;

use crate::cache::{CacheConfig, CacheSnapshot, Clock, QueryCache, SystemClock};
use crate::domain::item::Item;
use crate::domain::types::ItemId;
use crate::source::CatalogSource;

/// Identity of the collection request. There is a single endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CatalogKey;

/// Owns the remote source and the caches in front of it.
///
/// Clones share the same caches; the caches live as long as the last clone.
#[derive(Clone)]
pub struct CatalogClient {
    source: Arc<dyn CatalogSource>,
    catalog: Arc<QueryCache<CatalogKey, Vec<Item>>>,
    items: Arc<QueryCache<ItemId, Item>>,
}

impl CatalogClient {
    pub fn new(source: Arc<dyn CatalogSource>, config: CacheConfig) -> Self {
        Self::with_clock(source, config, Arc::new(SystemClock))
    }

    pub fn with_clock(
        source: Arc<dyn CatalogSource>,
        config: CacheConfig,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            source,
            catalog: Arc::new(QueryCache::new(config, Arc::clone(&clock))),
            items: Arc::new(QueryCache::new(config, clock)),
        }
    }

    pub fn config(&self) -> &CacheConfig {
        self.catalog.config()
    }

    /// Current catalog state; issues a request when nothing fresh is cached.
    pub fn catalog(&self) -> CacheSnapshot<Vec<Item>> {
        let source = Arc::clone(&self.source);
        self.catalog
            .read(CatalogKey, move || async move { source.fetch_catalog().await })
    }

    /// Waits for the first catalog payload (or failure) when none is cached.
    pub async fn load_catalog(&self) -> CacheSnapshot<Vec<Item>> {
        let source = Arc::clone(&self.source);
        self.catalog
            .load(CatalogKey, move || async move { source.fetch_catalog().await })
            .await
    }

    /// Detail state for one item, with the same freshness rules as the
    /// catalog.
    pub fn item(&self, id: ItemId) -> CacheSnapshot<Item> {
        let source = Arc::clone(&self.source);
        self.items
            .read(id, move || async move { source.fetch_item(id).await })
    }

    pub async fn load_item(&self, id: ItemId) -> CacheSnapshot<Item> {
        let source = Arc::clone(&self.source);
        self.items
            .load(id, move || async move { source.fetch_item(id).await })
            .await
    }

    /// Explicit refresh of the catalog in the background.
    pub fn revalidate_catalog(&self) -> bool {
        let source = Arc::clone(&self.source);
        self.catalog
            .revalidate(CatalogKey, move || async move { source.fetch_catalog().await })
    }

    /// Consumer regained focus. Only refetches when enabled in the config.
    pub fn on_focus(&self) -> bool {
        if !self.config().revalidate_on_focus {
            log::debug!("Focus revalidation disabled");
            return false;
        }
        self.revalidate_catalog()
    }

    /// Connectivity came back. Only refetches when enabled in the config.
    pub fn on_reconnect(&self) -> bool {
        if !self.config().revalidate_on_reconnect {
            log::debug!("Reconnect revalidation disabled");
            return false;
        }
        self.revalidate_catalog()
    }

    /// Changes whenever a catalog request settles.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.catalog.subscribe()
    }

    /// Changes whenever a detail request settles.
    pub fn item_revisions(&self) -> watch::Receiver<u64> {
        self.items.subscribe()
    }
}
