use crate::domain::CatalogError;
use crate::transport::http::types::{MessageResponse, ValidationErrorResponse};
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::error;

pub const MSG_INVALID_DATA: &str = "Invalid product data";
pub const MSG_INVALID_ID: &str = "Invalid product ID";
pub const MSG_INTERNAL: &str = "Something went wrong, please try again later";

/// Maps a service error onto its HTTP status and body.
pub fn error_response(err: CatalogError) -> Response {
    match err {
        CatalogError::Validation(errors) => (
            StatusCode::BAD_REQUEST,
            Json(ValidationErrorResponse {
                msg: MSG_INVALID_DATA.to_string(),
                errors,
            }),
        )
            .into_response(),
        CatalogError::NotFound(id) => (
            StatusCode::NOT_FOUND,
            Json(MessageResponse::new(format!("No product with id {}", id))),
        )
            .into_response(),
        CatalogError::MalformedId(_) => (
            StatusCode::BAD_REQUEST,
            Json(MessageResponse::new(MSG_INVALID_ID)),
        )
            .into_response(),
        CatalogError::Store(e) => {
            error!(error = %e, "Store operation failed");
            internal_error_response()
        }
    }
}

pub fn internal_error_response() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(MessageResponse::new(MSG_INTERNAL)),
    )
        .into_response()
}

/// Unparseable bodies are reported like any other invalid product data.
pub fn json_400(err: JsonRejection) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ValidationErrorResponse {
            msg: MSG_INVALID_DATA.to_string(),
            errors: vec![format!("Invalid JSON body: {}", err.body_text())],
        }),
    )
        .into_response()
}
