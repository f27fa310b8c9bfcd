//! Configuration model loaded from external sources.

use std::time::Duration;

use serde::Deserialize;

use crate::cache::{CacheConfig, DEFAULT_CACHE_CAPACITY, DEFAULT_FRESHNESS_SECS};
use crate::pagination::DEFAULT_ITEMS_PER_PAGE;

fn default_page_size() -> usize {
    DEFAULT_ITEMS_PER_PAGE
}

fn default_freshness_secs() -> u64 {
    DEFAULT_FRESHNESS_SECS
}

fn default_request_timeout_secs() -> u64 {
    10
}

fn default_cache_capacity() -> usize {
    DEFAULT_CACHE_CAPACITY
}

#[derive(Clone, Debug, Deserialize)]
/// Basic configuration shared across handlers.
pub struct ServerConfig {
    pub address: String,
    pub port: u16,
    /// Base URL of the remote products endpoint.
    pub catalog_url: String,
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    #[serde(default = "default_freshness_secs")]
    pub freshness_secs: u64,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Keys kept per cache; bounds the product detail cache.
    #[serde(default = "default_cache_capacity")]
    pub cache_capacity: usize,
    #[serde(default)]
    pub revalidate_on_focus: bool,
    #[serde(default)]
    pub revalidate_on_reconnect: bool,
}

impl ServerConfig {
    pub fn cache_config(&self) -> CacheConfig {
        CacheConfig {
            capacity: self.cache_capacity,
            revalidate_on_focus: self.revalidate_on_focus,
            revalidate_on_reconnect: self.revalidate_on_reconnect,
            ..CacheConfig::with_freshness_secs(self.freshness_secs)
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
