//! Routes outside the product API: the landing page and the catch-alls.

use crate::transport::http::handlers::common::internal_error_response;
use crate::transport::http::types::MessageResponse;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use std::any::Any;
use tracing::error;

pub const LANDING_HTML: &str =
    "<h1>Hello World!</h1><a href=\"/api/v1/products\">Go to Product Route</a>";

#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Landing page linking into the API", body = String, content_type = "text/html")
    )
)]
pub async fn landing_handler() -> Html<&'static str> {
    Html(LANDING_HTML)
}

pub async fn not_found_handler() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(MessageResponse::new("Route does not exist")),
    )
}

/// Turns a panicking handler into a 500 instead of a dropped connection.
pub fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };
    error!(panic = %detail, "Handler panicked");
    internal_error_response()
}
