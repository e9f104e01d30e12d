// src/bin/api_server.rs

use anyhow::Result;
use product_catalog::infra::telemetry::{init_tracing, DEFAULT_FILTER};
use product_catalog::infra::{Config, StoreBackend};
use product_catalog::transport;
use product_catalog::{CatalogStore, MemoryCatalogStore, PostgresCatalogStore};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing(DEFAULT_FILTER);
    let config = Config::from_env()?;

    // --- Store Initialization ---
    let store: Arc<dyn CatalogStore> = match &config.store {
        StoreBackend::Postgres { database_url } => {
            info!(max_connections = config.db_max_connections, "Connecting to Postgres");
            Arc::new(PostgresCatalogStore::connect(database_url, config.db_max_connections).await?)
        }
        StoreBackend::Memory => {
            warn!("Using the in-memory store; products will not survive a restart");
            Arc::new(MemoryCatalogStore::new())
        }
    };

    let app_state =
        transport::http::AppState::new(store).with_large_limit_warn(config.large_limit_warn);

    // --- API Server Initialization ---
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);
    let app = transport::http::create_router(app_state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", transport::http::ApiDoc::openapi()))
        .layer(cors);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("API server listening on http://{}", addr);
    info!("Swagger UI available at http://{}/swagger-ui", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!(error = %e, "Failed to listen for Ctrl+C");
                std::future::pending::<()>().await;
            }
            info!("Shutdown signal received; draining connections");
        })
        .await?;

    info!("Graceful shutdown complete");
    Ok(())
}
