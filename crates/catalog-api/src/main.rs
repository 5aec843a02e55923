//! Product catalog API server entry point.

use std::net::SocketAddr;
use std::sync::Arc;

use catalog_api::config::Config;
use catalog_api::error::AppError;
use catalog_api::state::{AppState, build_notifier};
use catalog_api::{routes, telemetry};
use catalog_store::pg_product_repository::PgProductRepository;
use catalog_store::pg_seller_repository::PgSellerRepository;
use sqlx::postgres::PgPoolOptions;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let config = Config::from_env()?;
    let tracer_provider = telemetry::init_tracing(config.otlp_endpoint.as_deref())?;

    tracing::info!("Starting product catalog API server");

    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(config.db_acquire_timeout)
        .connect(&config.database_url)
        .await?;

    let notifier = build_notifier(&config);
    tracing::info!(channels = ?notifier.channel_names(), "stock notifications configured");

    let app_state = AppState::new(
        Arc::new(PgProductRepository::new(pool.clone())),
        Arc::new(PgSellerRepository::new(pool)),
        Arc::new(notifier),
        config.public_base_url.clone(),
    );

    // TODO: Replace CorsLayer::permissive() with restricted origins for production.
    let app = routes::build_router(app_state, config.request_timeout)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = config.bind_address().parse().map_err(|e| {
        AppError::Config(catalog_api::config::ConfigError::Invalid {
            key: "HOST",
            reason: format!("invalid HOST:PORT combination: {e}"),
        })
    })?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    let result = axum::serve(listener, app).await;

    telemetry::shutdown(tracer_provider);
    result?;

    Ok(())
}
