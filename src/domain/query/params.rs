use serde::Deserialize;
use utoipa::IntoParams;

/// Raw listing parameters, exactly as they arrive in the query string.
///
/// Every field is kept as a string: malformed values degrade to defaults in
/// [`build_query`](super::build_query) instead of rejecting the request.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct QueryParams {
    /// Case-insensitive substring of the product name.
    pub name: Option<String>,
    /// Exact company; `all` disables the filter.
    pub company: Option<String>,
    /// `true` selects featured products; any other value selects the rest.
    pub featured: Option<String>,
    /// Comma-separated sort keys, `-` prefix for descending (e.g. `-price,name`).
    pub sort: Option<String>,
    /// Comma-separated projection (e.g. `name,price`).
    pub fields: Option<String>,
    /// 1-based page number (default 1).
    pub page: Option<String>,
    /// Page size (default 10).
    pub limit: Option<String>,
}
