use crate::app::{CatalogService, RecordService};
use crate::domain::product::Product;
use crate::storage::CatalogStore;
use serde::Serialize;
use serde_json::{Map, Value as JsonValue};
use std::sync::Arc;
use utoipa::ToSchema;

#[derive(Clone)]
pub struct AppState {
    pub catalog: CatalogService,
    pub records: RecordService,
    pub store: Arc<dyn CatalogStore>,
}

impl AppState {
    /// Wires both services onto one store.
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self {
            catalog: CatalogService::new(store.clone()),
            records: RecordService::new(store.clone()),
            store,
        }
    }

    pub fn with_large_limit_warn(mut self, threshold: u64) -> Self {
        self.catalog = self.catalog.with_large_limit_warn(threshold);
        self
    }
}

#[derive(Serialize, Debug, ToSchema)]
pub struct ProductListResponse {
    /// Products on the requested page, restricted to the requested fields.
    #[schema(value_type = Vec<Object>)]
    pub products: Vec<Map<String, JsonValue>>,
    /// Total number of products matching the filters across all pages.
    #[serde(rename = "nbHits")]
    pub nb_hits: u64,
}

#[derive(Serialize, Debug, ToSchema)]
pub struct ProductResponse {
    pub product: Product,
}

#[derive(Serialize, Debug, ToSchema)]
pub struct MessageResponse {
    pub msg: String,
}

impl MessageResponse {
    pub fn new(msg: impl Into<String>) -> Self {
        Self { msg: msg.into() }
    }
}

#[derive(Serialize, Debug, ToSchema)]
pub struct ValidationErrorResponse {
    pub msg: String,
    /// One message per failing field.
    pub errors: Vec<String>,
}

#[derive(Serialize, Debug, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Documented shape of create/update bodies. Handlers accept loose JSON and validate it
/// field by field, so this type is only used for the OpenAPI document.
#[derive(Serialize, Debug, ToSchema)]
#[allow(dead_code)]
pub struct ProductBody {
    pub name: Option<String>,
    /// Minor currency units.
    pub price: Option<i64>,
    pub featured: Option<bool>,
    pub rating: Option<f64>,
    /// One of `ikea`, `liddy`, `caressa`, `marcos`.
    pub company: Option<String>,
    #[schema(value_type = Vec<Object>)]
    pub images: Option<Vec<JsonValue>>,
}
