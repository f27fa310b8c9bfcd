//! `reqwest`-backed implementation of [`CatalogSource`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::domain::item::Item;
use crate::domain::types::ItemId;
use crate::source::{CatalogSource, SourceError, SourceResult};

/// `limit=0` asks the remote for the whole collection in one response.
const CATALOG_PATH: &str = "products?limit=0";

#[derive(Deserialize)]
struct CatalogResponse {
    products: Vec<Item>,
}

/// Talks to a products endpoint shaped like `GET /products` and
/// `GET /products/{id}`.
#[derive(Clone, Debug)]
pub struct HttpCatalogSource {
    client: reqwest::Client,
    base_url: String,
}

impl HttpCatalogSource {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> SourceResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SourceError::Network(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: String) -> SourceResult<T> {
        let response = self.client.get(&url).send().await?;

        match response.status() {
            status if status.is_success() => response
                .json::<T>()
                .await
                .map_err(|e| SourceError::Decode(e.to_string())),
            StatusCode::NOT_FOUND => Err(SourceError::NotFound),
            status => {
                log::warn!("GET {url} returned {status}");
                Err(SourceError::Status(status.as_u16()))
            }
        }
    }
}

#[async_trait]
impl CatalogSource for HttpCatalogSource {
    async fn fetch_catalog(&self) -> SourceResult<Vec<Item>> {
        let body: CatalogResponse = self.get_json(self.url(CATALOG_PATH)).await?;
        Ok(body.products)
    }

    async fn fetch_item(&self, id: ItemId) -> SourceResult<Item> {
        self.get_json(self.url(&format!("products/{id}"))).await
    }
}

impl From<reqwest::Error> for SourceError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            SourceError::Network("request timed out".to_string())
        } else if error.is_decode() {
            SourceError::Decode(error.to_string())
        } else if let Some(status) = error.status() {
            match status {
                StatusCode::NOT_FOUND => SourceError::NotFound,
                other => SourceError::Status(other.as_u16()),
            }
        } else {
            SourceError::Network(error.to_string())
        }
    }
}
