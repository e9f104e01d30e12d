//! Fetching catalog pages over HTTP.

use async_trait::async_trait;
use serde_json::Value as JsonValue;
use thiserror::Error;

pub const PRODUCTS_PATH: &str = "/api/v1/products";

/// One fetched page. `nb_hits` is absent when the server answered with a bare array.
#[derive(Debug, Clone, PartialEq)]
pub struct PageResponse {
    pub products: Vec<JsonValue>,
    pub nb_hits: Option<u64>,
}

impl PageResponse {
    /// Accepts `{ products, nbHits }` or a bare array of products.
    pub fn from_json(data: JsonValue) -> Self {
        match data {
            JsonValue::Array(products) => PageResponse {
                products,
                nb_hits: None,
            },
            JsonValue::Object(mut obj) => {
                let products = match obj.remove("products") {
                    Some(JsonValue::Array(items)) => items,
                    _ => Vec::new(),
                };
                PageResponse {
                    products,
                    nb_hits: obj.get("nbHits").and_then(JsonValue::as_u64),
                }
            }
            _ => PageResponse {
                products: Vec::new(),
                nb_hits: None,
            },
        }
    }
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Transport(String),
    #[error("unexpected status {0}")]
    Status(u16),
    #[error("unreadable response: {0}")]
    Decode(String),
}

#[async_trait]
pub trait CatalogClient: Send + Sync {
    async fn fetch_page(&self, query: &[(String, String)]) -> Result<PageResponse, FetchError>;
}

/// Client for a running catalog server. Relies on the transport's default timeouts.
#[derive(Debug, Clone)]
pub struct HttpCatalogClient {
    http: reqwest::Client,
    base_url: String,
}

impl HttpCatalogClient {
    /// `base_url` is the server origin, e.g. `http://127.0.0.1:3000`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn products_url(&self) -> String {
        format!("{}{}", self.base_url, PRODUCTS_PATH)
    }
}

#[async_trait]
impl CatalogClient for HttpCatalogClient {
    async fn fetch_page(&self, query: &[(String, String)]) -> Result<PageResponse, FetchError> {
        let resp = self
            .http
            .get(self.products_url())
            .query(query)
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let data = resp
            .json::<JsonValue>()
            .await
            .map_err(|e| FetchError::Decode(e.to_string()))?;
        Ok(PageResponse::from_json(data))
    }
}
