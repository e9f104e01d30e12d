pub mod error;
pub mod product;
pub mod query;

pub use error::{CatalogError, CatalogResult};
