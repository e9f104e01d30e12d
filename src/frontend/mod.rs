//! Headless catalog browser: fetches pages from the API and renders them into a
//! [`CatalogView`] (status region, product grid, pagination and company dropdown).

pub mod cards;
pub mod client;
pub mod facets;
pub mod filters;
pub mod pagination;
pub mod pipeline;
pub mod view;

pub use cards::ProductCard;
pub use client::{CatalogClient, FetchError, HttpCatalogClient, PageResponse};
pub use facets::FacetSet;
pub use filters::FilterForm;
pub use pagination::{render_pagination, total_pages, PageControl};
pub use pipeline::{RenderPipeline, Session};
pub use view::{CatalogView, StatusState};
