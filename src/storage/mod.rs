//! Catalog persistence.
//!
//! The services only talk to [`CatalogStore`]; the Postgres store is what runs in
//! production and the in-memory store backs tests and throwaway dev servers.

use crate::domain::product::{NewProduct, Product, ProductId, ProductPatch};
use crate::domain::query::{ProductFilter, SortSpec, Window};
use anyhow::Result;
use async_trait::async_trait;

pub mod memory;
pub mod postgres;

pub use memory::MemoryCatalogStore;
pub use postgres::PostgresCatalogStore;

/// Contract every product store implements.
///
/// Each call is an independent operation: a `find` followed by a `count` is not
/// isolated from writes that land in between.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Returns the page of matching products selected by `sort` and `window`.
    async fn find(
        &self,
        filter: &ProductFilter,
        sort: &SortSpec,
        window: Window,
    ) -> Result<Vec<Product>>;

    /// Counts every product matching `filter`, ignoring pagination.
    async fn count(&self, filter: &ProductFilter) -> Result<u64>;

    /// Every stored product in store order.
    async fn find_all(&self) -> Result<Vec<Product>>;

    /// Assigns an id and timestamps, then persists.
    async fn insert(&self, product: NewProduct) -> Result<Product>;

    async fn get(&self, id: &ProductId) -> Result<Option<Product>>;

    /// Applies `patch` and returns the updated record, or `None` if no record has `id`.
    async fn update(&self, id: &ProductId, patch: &ProductPatch) -> Result<Option<Product>>;

    /// Returns whether a record was removed.
    async fn delete(&self, id: &ProductId) -> Result<bool>;

    /// Cheap reachability check used by the health endpoint.
    async fn ping(&self) -> Result<()>;
}
