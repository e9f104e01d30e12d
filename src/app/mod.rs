pub mod catalog_service;
pub mod record_service;

pub use catalog_service::{CatalogService, ProductPage};
pub use record_service::RecordService;
