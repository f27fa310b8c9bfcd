use crate::domain::types::ItemId;
use crate::dto::catalog::ProductPageData;
use crate::services::catalog_client::CatalogClient;
use crate::services::{ServiceError, ServiceResult};

/// Loads a single product for the detail view.
///
/// Cached data wins over a failed refresh; without data the failure is
/// returned.
pub async fn load_product(
    client: &CatalogClient,
    id: ItemId,
    quantity: Option<u32>,
) -> ServiceResult<ProductPageData> {
    let snapshot = client.load_item(id).await;

    match (snapshot.data, snapshot.error) {
        (Some(item), _) => Ok(ProductPageData::new(item.as_ref().clone(), quantity)),
        (None, Some(err)) => {
            log::error!("Failed to load product {id}: {err}");
            Err(ServiceError::from(err))
        }
        (None, None) => Err(ServiceError::Unavailable),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use mockall::predicate::eq;

    use super::*;
    use crate::cache::CacheConfig;
    use crate::domain::item::{Item, StockStatus};
    use crate::source::{MockCatalogSource, SourceError};

    fn id(value: i32) -> ItemId {
        ItemId::new(value).unwrap()
    }

    #[tokio::test]
    async fn computes_prices_for_quantity() {
        let mut source = MockCatalogSource::new();
        source
            .expect_fetch_item()
            .with(eq(id(9)))
            .times(1)
            .returning(|id| Ok(Item::new(id, "Kettle", 40.0, 4.2).with_discount(25.0).with_stock(80)));
        let client = CatalogClient::new(Arc::new(source), CacheConfig::default());

        let page = load_product(&client, id(9), Some(3)).await.unwrap();

        assert_eq!(page.product.title, "Kettle");
        assert!((page.discounted_price - 30.0).abs() < 1e-9);
        assert!((page.total_price - 90.0).abs() < 1e-9);
        assert_eq!(page.stock_status, StockStatus::InStock);

        // Second load within the freshness window is served from cache.
        let again = load_product(&client, id(9), Some(0)).await.unwrap();
        assert_eq!(again.quantity, 1);
    }

    #[tokio::test]
    async fn missing_product_is_not_found() {
        let mut source = MockCatalogSource::new();
        source
            .expect_fetch_item()
            .returning(|_| Err(SourceError::NotFound));
        let client = CatalogClient::new(Arc::new(source), CacheConfig::default());

        let result = load_product(&client, id(404), None).await;

        assert!(matches!(result, Err(ServiceError::NotFound)));
    }

    #[tokio::test]
    async fn items_are_cached_per_id() {
        let mut source = MockCatalogSource::new();
        source
            .expect_fetch_item()
            .times(2)
            .returning(|id| Ok(Item::new(id, format!("Item {id}"), 1.0, 1.0)));
        let client = CatalogClient::new(Arc::new(source), CacheConfig::default());

        load_product(&client, id(1), None).await.unwrap();
        load_product(&client, id(2), None).await.unwrap();
        let first = load_product(&client, id(1), None).await.unwrap();

        assert_eq!(first.product.title, "Item 1");
    }
}
