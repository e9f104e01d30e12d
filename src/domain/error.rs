//! Errors surfaced by the catalog and record services.

use crate::domain::product::id::MalformedProductId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    /// One message per failing field.
    #[error("invalid product data: {}", .0.join("; "))]
    Validation(Vec<String>),

    /// The id was well formed but no record carries it.
    #[error("no product with id {0}")]
    NotFound(String),

    #[error("invalid product id: {0}")]
    MalformedId(String),

    #[error("store error: {0}")]
    Store(#[from] anyhow::Error),
}

impl From<MalformedProductId> for CatalogError {
    fn from(err: MalformedProductId) -> Self {
        CatalogError::MalformedId(err.0)
    }
}

pub type CatalogResult<T> = Result<T, CatalogError>;
