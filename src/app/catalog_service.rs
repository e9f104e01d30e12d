//! Catalog listing: runs a built query against the store and pairs the page with a
//! total hit count for pagination.

use crate::domain::product::Product;
use crate::domain::query::{build_query, QueryParams};
use crate::domain::CatalogResult;
use crate::storage::CatalogStore;
use serde_json::{Map, Value as JsonValue};
use std::sync::Arc;
use tracing::{debug, warn};

/// Page sizes above this are served but logged.
pub const DEFAULT_LARGE_LIMIT_WARN: u64 = 100;

/// One page of (projected) product documents.
#[derive(Debug, Clone)]
pub struct ProductPage {
    pub products: Vec<Map<String, JsonValue>>,
    /// Total products matching the filter, independent of page and limit.
    pub nb_hits: u64,
}

#[derive(Clone)]
pub struct CatalogService {
    store: Arc<dyn CatalogStore>,
    large_limit_warn: u64,
}

impl CatalogService {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self {
            store,
            large_limit_warn: DEFAULT_LARGE_LIMIT_WARN,
        }
    }

    pub fn with_large_limit_warn(mut self, threshold: u64) -> Self {
        self.large_limit_warn = threshold;
        self
    }

    /// Filtered, sorted, projected page plus the total match count.
    ///
    /// The fetch and the count are two separate reads; a write landing between them can
    /// make `nb_hits` disagree with the page by that write.
    pub async fn list_products(&self, params: &QueryParams) -> CatalogResult<ProductPage> {
        let query = build_query(params);
        if query.window.limit > self.large_limit_warn {
            warn!(
                limit = query.window.limit,
                threshold = self.large_limit_warn,
                "Large page size requested; serving it uncapped"
            );
        }

        let items = self
            .store
            .find(&query.filter, &query.sort, query.window)
            .await?;
        let nb_hits = self.store.count(&query.filter).await?;
        debug!(
            page = query.window.page,
            limit = query.window.limit,
            returned = items.len(),
            nb_hits,
            "Listed products"
        );

        let products = items.iter().map(|p| query.projection.apply(p)).collect();
        Ok(ProductPage { products, nb_hits })
    }

    /// The whole collection, no shaping.
    pub async fn list_products_unfiltered(&self) -> CatalogResult<Vec<Product>> {
        Ok(self.store.find_all().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::product::{Company, NewProduct};
    use crate::storage::MemoryCatalogStore;

    async fn seeded(n: usize) -> CatalogService {
        let store = Arc::new(MemoryCatalogStore::new());
        for i in 0..n {
            store
                .insert(NewProduct {
                    name: format!("item {i}"),
                    price: 100 * i as i64,
                    featured: i % 3 == 0,
                    rating: 4.5,
                    company: Some(Company::ALL[i % Company::ALL.len()]),
                    images: vec![],
                })
                .await
                .unwrap();
        }
        CatalogService::new(store)
    }

    #[tokio::test]
    async fn test_nb_hits_ignores_window() {
        let service = seeded(23).await;
        let params = QueryParams {
            page: Some("3".to_string()),
            ..Default::default()
        };
        let page = service.list_products(&params).await.unwrap();
        assert_eq!(page.products.len(), 3);
        assert_eq!(page.nb_hits, 23);

        let first = service.list_products(&QueryParams::default()).await.unwrap();
        assert_eq!(first.products.len(), 10);
        assert_eq!(first.nb_hits, 23);
    }

    #[tokio::test]
    async fn test_projection_applied_to_page() {
        let service = seeded(2).await;
        let params = QueryParams {
            fields: Some("name".to_string()),
            ..Default::default()
        };
        let page = service.list_products(&params).await.unwrap();
        for doc in &page.products {
            assert_eq!(doc.len(), 2);
            assert!(doc.contains_key("id") && doc.contains_key("name"));
        }
    }

    #[tokio::test]
    async fn test_unfiltered_returns_everything() {
        let service = seeded(12).await;
        assert_eq!(service.list_products_unfiltered().await.unwrap().len(), 12);
    }
}
