//! # Markbook HTTP API Module
//!
//! This module implements the HTTP REST API server using axum.
//!
//! ## Endpoints
//!
//! - `GET /health` - Health check
//! - `GET /scale` - Grading scale
//! - `POST /grade` - Validate and classify a score
//! - `POST /aggregate` - Aggregate core/elective grade lists
//! - `POST /report` - Term report for one student of a roster
//!
//! ## Security Configuration (Environment Variables)
//!
//! - `MARKBOOK_CORS_ORIGINS`: Comma-separated list of allowed origins, or
//!   "*" for all (default: localhost only)
//!
//! Authentication and access control are the responsibility of the
//! deployment's outer layer; the engine itself holds no sensitive state.

mod handlers;
mod types;

// Re-export handlers and types for integration tests (via `markbook::api::*`)
#[allow(unused_imports)]
pub use handlers::{
    aggregate_handler, grade_handler, health_handler, report_handler, scale_handler,
};
#[allow(unused_imports)]
pub use types::{
    AggregateRequest, AggregateResponse, BandInfo, GradeRequest, GradeResponse, HealthResponse,
    ReportRequest, ReportResponse, ScaleResponse,
};

use axum::{
    Router,
    http::{HeaderValue, Method, header},
    routing::{get, post},
};
use markbook_core::{EngineConfig, EngineError};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

// =============================================================================
// SERVER STATE
// =============================================================================

/// Shared server state: the engine configuration.
///
/// The engine is stateless, so the state is immutable and needs no locking;
/// concurrent handlers share it through the `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Engine configuration applied to every request.
    pub config: Arc<EngineConfig>,
}

impl AppState {
    /// Create new app state with an engine configuration.
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }
}

// =============================================================================
// CORS CONFIGURATION
// =============================================================================

/// Build CORS layer from environment configuration.
///
/// Reads `MARKBOOK_CORS_ORIGINS` environment variable:
/// - If "*": allows all origins (development mode - use with caution!)
/// - If not set: defaults to localhost only (restrictive default)
/// - Otherwise: parses comma-separated list of allowed origins
fn build_cors_layer() -> CorsLayer {
    let origins_env = std::env::var("MARKBOOK_CORS_ORIGINS").ok();

    match origins_env.as_deref() {
        Some("*") => {
            tracing::warn!(
                "CORS: Allowing ALL origins (MARKBOOK_CORS_ORIGINS=*). This is insecure for production!"
            );
            CorsLayer::permissive()
        }
        Some(origins) => {
            let allowed_origins: Vec<HeaderValue> = origins
                .split(',')
                .filter_map(|s| {
                    let trimmed = s.trim();
                    match trimmed.parse::<HeaderValue>() {
                        Ok(hv) => {
                            tracing::info!("CORS: Allowing origin: {}", trimmed);
                            Some(hv)
                        }
                        Err(e) => {
                            tracing::warn!("CORS: Invalid origin '{}': {}", trimmed, e);
                            None
                        }
                    }
                })
                .collect();

            if allowed_origins.is_empty() {
                tracing::warn!(
                    "CORS: No valid origins in MARKBOOK_CORS_ORIGINS, defaulting to localhost only"
                );
                build_localhost_cors()
            } else {
                CorsLayer::new()
                    .allow_origin(allowed_origins)
                    .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
                    .allow_headers([header::CONTENT_TYPE])
            }
        }
        None => {
            tracing::info!("CORS: No MARKBOOK_CORS_ORIGINS set, defaulting to localhost only");
            build_localhost_cors()
        }
    }
}

/// Build a restrictive CORS layer that only allows localhost origins.
fn build_localhost_cors() -> CorsLayer {
    let localhost_origins = vec![
        "http://localhost:3000".parse::<HeaderValue>().ok(),
        "http://localhost:8080".parse::<HeaderValue>().ok(),
        "http://127.0.0.1:3000".parse::<HeaderValue>().ok(),
        "http://127.0.0.1:8080".parse::<HeaderValue>().ok(),
    ];
    let origins: Vec<HeaderValue> = localhost_origins.into_iter().flatten().collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
}

// =============================================================================
// ROUTER & SERVER
// =============================================================================

/// Build the API router with all endpoints and layers.
pub fn create_router(state: AppState) -> Router {
    let cors = build_cors_layer();

    Router::new()
        .route("/health", get(handlers::health_handler))
        .route("/scale", get(handlers::scale_handler))
        .route("/grade", post(handlers::grade_handler))
        .route("/aggregate", post(handlers::aggregate_handler))
        .route("/report", post(handlers::report_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind and run the HTTP server until shutdown.
pub async fn run_server(addr: &str, state: AppState) -> Result<(), EngineError> {
    let router = create_router(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| EngineError::Io(format!("Bind failed: {}", e)))?;

    tracing::info!("Markbook HTTP server listening on {}", addr);

    axum::serve(listener, router)
        .await
        .map_err(|e| EngineError::Io(format!("Server error: {}", e)))
}
