use crate::domain::product::{Company, Product, ProductImage};
use crate::transport::http::handlers::{health, products, site};
use crate::transport::http::types::{
    AppState, HealthResponse, MessageResponse, ProductBody, ProductListResponse, ProductResponse,
    ValidationErrorResponse,
};
use axum::routing::get;
use axum::Router;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        site::landing_handler,
        health::healthcheck_handler,
        products::list_products_handler,
        products::list_products_static_handler,
        products::create_product_handler,
        products::get_product_handler,
        products::update_product_handler,
        products::delete_product_handler
    ),
    components(schemas(
        Product,
        ProductImage,
        Company,
        ProductBody,
        ProductListResponse,
        ProductResponse,
        MessageResponse,
        ValidationErrorResponse,
        HealthResponse
    ))
)]
#[allow(dead_code)]
pub struct ApiDoc;

pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(site::landing_handler))
        .route("/health", get(health::healthcheck_handler))
        .route(
            "/api/v1/products",
            get(products::list_products_handler).post(products::create_product_handler),
        )
        .route(
            "/api/v1/products/static",
            get(products::list_products_static_handler),
        )
        .route(
            "/api/v1/products/:id",
            get(products::get_product_handler)
                .patch(products::update_product_handler)
                .delete(products::delete_product_handler),
        )
        .fallback(site::not_found_handler)
        .layer(CatchPanicLayer::custom(site::panic_response))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
