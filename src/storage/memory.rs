use super::CatalogStore;
use crate::domain::product::{NewProduct, Product, ProductId, ProductPatch};
use crate::domain::query::{ProductFilter, SortSpec, Window};
use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, SubsecRound, Utc};
use tokio::sync::RwLock;

/// Process-local store. Products are kept in insertion order, which also breaks sort ties.
#[derive(Default)]
pub struct MemoryCatalogStore {
    products: RwLock<Vec<Product>>,
}

impl MemoryCatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the store with already-identified products.
    pub fn with_products(products: Vec<Product>) -> Self {
        Self {
            products: RwLock::new(products),
        }
    }

    pub async fn len(&self) -> usize {
        self.products.read().await.len()
    }
}

/// Microsecond precision, so records compare equal to what Postgres would hand back.
fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

fn to_usize(n: u64) -> usize {
    usize::try_from(n).unwrap_or(usize::MAX)
}

#[async_trait]
impl CatalogStore for MemoryCatalogStore {
    async fn find(
        &self,
        filter: &ProductFilter,
        sort: &SortSpec,
        window: Window,
    ) -> Result<Vec<Product>> {
        let products = self.products.read().await;
        let mut matching: Vec<&Product> = products.iter().filter(|p| filter.matches(p)).collect();
        matching.sort_by(|a, b| sort.compare(a, b));
        Ok(matching
            .into_iter()
            .skip(to_usize(window.skip))
            .take(to_usize(window.limit))
            .cloned()
            .collect())
    }

    async fn count(&self, filter: &ProductFilter) -> Result<u64> {
        let products = self.products.read().await;
        Ok(products.iter().filter(|p| filter.matches(p)).count() as u64)
    }

    async fn find_all(&self) -> Result<Vec<Product>> {
        Ok(self.products.read().await.clone())
    }

    async fn insert(&self, product: NewProduct) -> Result<Product> {
        let product = product.into_product(ProductId::generate(), now());
        self.products.write().await.push(product.clone());
        Ok(product)
    }

    async fn get(&self, id: &ProductId) -> Result<Option<Product>> {
        let products = self.products.read().await;
        Ok(products.iter().find(|p| p.id == *id).cloned())
    }

    async fn update(&self, id: &ProductId, patch: &ProductPatch) -> Result<Option<Product>> {
        let mut products = self.products.write().await;
        let Some(product) = products.iter_mut().find(|p| p.id == *id) else {
            return Ok(None);
        };
        patch.apply(product, now());
        Ok(Some(product.clone()))
    }

    async fn delete(&self, id: &ProductId) -> Result<bool> {
        let mut products = self.products.write().await;
        let before = products.len();
        products.retain(|p| p.id != *id);
        Ok(products.len() != before)
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}
