use crate::domain::product::Product;
use crate::domain::query::QueryParams;
use crate::transport::http::handlers::common::{error_response, json_400};
use crate::transport::http::types::{
    AppState, MessageResponse, ProductBody, ProductListResponse, ProductResponse,
    ValidationErrorResponse,
};
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::Value as JsonValue;
use tracing::debug;

#[utoipa::path(
    get,
    path = "/api/v1/products",
    params(QueryParams),
    responses(
        (status = 200, description = "One page of matching products", body = ProductListResponse),
        (status = 500, description = "Internal server error", body = MessageResponse)
    )
)]
pub async fn list_products_handler(
    State(state): State<AppState>,
    query: Result<Query<QueryParams>, QueryRejection>,
) -> impl IntoResponse {
    // A query string we cannot decode is treated as no parameters at all.
    let params = match query {
        Ok(Query(p)) => p,
        Err(e) => {
            debug!(error = %e, "Unreadable query string; using defaults");
            QueryParams::default()
        }
    };

    match state.catalog.list_products(&params).await {
        Ok(page) => (
            StatusCode::OK,
            Json(ProductListResponse {
                products: page.products,
                nb_hits: page.nb_hits,
            }),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/products/static",
    responses(
        (status = 200, description = "Every product, unfiltered", body = [Product]),
        (status = 500, description = "Internal server error", body = MessageResponse)
    )
)]
pub async fn list_products_static_handler(State(state): State<AppState>) -> impl IntoResponse {
    match state.catalog.list_products_unfiltered().await {
        Ok(products) => (StatusCode::OK, Json(products)).into_response(),
        Err(e) => error_response(e),
    }
}

#[utoipa::path(
    post,
    path = "/api/v1/products",
    request_body = ProductBody,
    responses(
        (status = 201, description = "Product created", body = ProductResponse),
        (status = 400, description = "Invalid product data", body = ValidationErrorResponse),
        (status = 500, description = "Internal server error", body = MessageResponse)
    )
)]
pub async fn create_product_handler(
    State(state): State<AppState>,
    request: Result<Json<JsonValue>, JsonRejection>,
) -> impl IntoResponse {
    let Json(body) = match request {
        Ok(v) => v,
        Err(e) => return json_400(e),
    };

    match state.records.create_product(&body).await {
        Ok(product) => (StatusCode::CREATED, Json(ProductResponse { product })).into_response(),
        Err(e) => error_response(e),
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/products/{id}",
    params(
        ("id" = String, Path, description = "Product id (24 hex characters)")
    ),
    responses(
        (status = 200, description = "The product", body = ProductResponse),
        (status = 400, description = "Malformed id", body = MessageResponse),
        (status = 404, description = "No product with this id", body = MessageResponse),
        (status = 500, description = "Internal server error", body = MessageResponse)
    )
)]
pub async fn get_product_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    match state.records.get_product(&id).await {
        Ok(product) => (StatusCode::OK, Json(ProductResponse { product })).into_response(),
        Err(e) => error_response(e),
    }
}

#[utoipa::path(
    patch,
    path = "/api/v1/products/{id}",
    params(
        ("id" = String, Path, description = "Product id (24 hex characters)")
    ),
    request_body = ProductBody,
    responses(
        (status = 200, description = "The updated product", body = ProductResponse),
        (status = 400, description = "Malformed id or invalid product data", body = ValidationErrorResponse),
        (status = 404, description = "No product with this id", body = MessageResponse),
        (status = 500, description = "Internal server error", body = MessageResponse)
    )
)]
pub async fn update_product_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    request: Result<Json<JsonValue>, JsonRejection>,
) -> impl IntoResponse {
    let Json(body) = match request {
        Ok(v) => v,
        Err(e) => return json_400(e),
    };

    match state.records.update_product(&id, &body).await {
        Ok(product) => (StatusCode::OK, Json(ProductResponse { product })).into_response(),
        Err(e) => error_response(e),
    }
}

#[utoipa::path(
    delete,
    path = "/api/v1/products/{id}",
    params(
        ("id" = String, Path, description = "Product id (24 hex characters)")
    ),
    responses(
        (status = 200, description = "Product deleted", body = MessageResponse),
        (status = 400, description = "Malformed id", body = MessageResponse),
        (status = 404, description = "No product with this id", body = MessageResponse),
        (status = 500, description = "Internal server error", body = MessageResponse)
    )
)]
pub async fn delete_product_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    match state.records.delete_product(&id).await {
        Ok(()) => (
            StatusCode::OK,
            Json(MessageResponse::new("Product deleted successfully")),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}
