pub mod app;
pub mod domain;
pub mod frontend;
pub mod infra;
pub mod storage;
pub mod transport;

// Convenience re-exports (keeps call-sites clean)
pub use app::{CatalogService, ProductPage, RecordService};
pub use domain::product::{Company, NewProduct, Product, ProductId, ProductImage, ProductPatch};
pub use domain::query::{build_query, ProductQuery, QueryParams};
pub use domain::{CatalogError, CatalogResult};
pub use storage::memory::MemoryCatalogStore;
pub use storage::postgres::PostgresCatalogStore;
pub use storage::CatalogStore;
