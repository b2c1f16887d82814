//! Application setup and initialization
//!
//! Wires the blob backend, object store, transfer service, sweeper, and
//! router together. Extracted from main.rs so integration tests can build
//! the full stack against an in-memory backend.

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method},
    routing::{delete, get, post},
    Json, Router,
};
use tokio::task::JoinHandle;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

use qrdrop_core::{Config, SystemClock};
use qrdrop_service::{ExpirySweeper, TransferService};
use qrdrop_store::{create_blob_store, ObjectStore, RandomIds};

use crate::api_doc::ApiDoc;
use crate::handlers;
use crate::state::AppState;

// Slack above the configured payload limit so multipart framing does not
// push a maximum-size file over the request body cap.
const MULTIPART_OVERHEAD_BYTES: u64 = 1024 * 1024;

/// Initialize the entire application
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, Router, JoinHandle<()>)> {
    // Fail fast on misconfiguration
    config.validate().context("Configuration validation failed")?;

    let blobs = create_blob_store(&config)
        .await
        .context("Failed to initialize blob storage")?;

    let clock = Arc::new(SystemClock);
    let store = Arc::new(ObjectStore::new(
        blobs,
        Arc::new(RandomIds),
        clock.clone(),
        config.ttl(),
    ));

    let transfer = TransferService::new(
        store.clone(),
        config.max_payload_bytes,
        config.public_base_url.clone(),
    );

    let sweeper = Arc::new(ExpirySweeper::new(store, clock, config.sweep_interval()));
    let sweeper_handle = sweeper.start();

    tracing::info!(
        backend = ?config.storage_backend,
        ttl_seconds = config.ttl_seconds,
        sweep_interval_seconds = config.sweep_interval_seconds,
        "Application initialized"
    );

    let state = Arc::new(AppState {
        config: config.clone(),
        transfer,
    });

    let router = build_router(&config, state.clone())?;

    Ok((state, router, sweeper_handle))
}

/// Setup all application routes
pub fn build_router(config: &Config, state: Arc<AppState>) -> Result<Router> {
    let cors = setup_cors(config)?;

    let body_limit = usize::try_from(config.max_payload_bytes + MULTIPART_OVERHEAD_BYTES)
        .unwrap_or(usize::MAX);

    let app = Router::new()
        .route("/upload", post(handlers::upload::upload_file))
        .route("/download/{token}", get(handlers::download::download_file))
        .route("/files/{token}", delete(handlers::delete::delete_file))
        .route("/health", get(handlers::health::health))
        .route("/api/openapi.json", get(|| async { Json(ApiDoc::openapi()) }))
        .with_state(state)
        .merge(utoipa_rapidoc::RapiDoc::new("/api/openapi.json").path("/docs"))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(RequestBodyLimitLayer::new(body_limit))
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    Ok(app)
}

fn setup_cors(config: &Config) -> Result<CorsLayer> {
    let cors = if config.cors_origins.contains(&"*".to_string()) {
        tracing::warn!("CORS configured to allow all origins - not recommended for production");
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
            .allow_headers(Any)
    } else {
        let origins: Result<Vec<HeaderValue>, _> =
            config.cors_origins.iter().map(|o| o.parse()).collect();

        CorsLayer::new()
            .allow_origin(origins.unwrap_or_default())
            .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
            .allow_headers(Any)
    };
    Ok(cors)
}
