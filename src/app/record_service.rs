//! Single-record operations addressed by product id.

use crate::domain::product::{NewProduct, Product, ProductId, ProductPatch};
use crate::domain::{CatalogError, CatalogResult};
use crate::storage::CatalogStore;
use serde_json::Value as JsonValue;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub struct RecordService {
    store: Arc<dyn CatalogStore>,
}

impl RecordService {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self { store }
    }

    pub async fn create_product(&self, body: &JsonValue) -> CatalogResult<Product> {
        let new_product = NewProduct::from_json(body).map_err(CatalogError::Validation)?;
        let product = self.store.insert(new_product).await?;
        info!(id = %product.id, name = %product.name, "Created product");
        Ok(product)
    }

    pub async fn get_product(&self, id: &str) -> CatalogResult<Product> {
        let product_id: ProductId = id.parse()?;
        self.store
            .get(&product_id)
            .await?
            .ok_or_else(|| CatalogError::NotFound(id.to_string()))
    }

    /// Partial overwrite. The id is checked before the body.
    pub async fn update_product(&self, id: &str, body: &JsonValue) -> CatalogResult<Product> {
        let product_id: ProductId = id.parse()?;
        let patch = ProductPatch::from_json(body).map_err(CatalogError::Validation)?;

        let updated = if patch.is_empty() {
            // nothing to write; still report a missing record
            self.store.get(&product_id).await?
        } else {
            self.store.update(&product_id, &patch).await?
        };
        let product = updated.ok_or_else(|| CatalogError::NotFound(id.to_string()))?;
        info!(id = %product.id, "Updated product");
        Ok(product)
    }

    pub async fn delete_product(&self, id: &str) -> CatalogResult<()> {
        let product_id: ProductId = id.parse()?;
        if !self.store.delete(&product_id).await? {
            return Err(CatalogError::NotFound(id.to_string()));
        }
        info!(id = %product_id, "Deleted product");
        Ok(())
    }
}
