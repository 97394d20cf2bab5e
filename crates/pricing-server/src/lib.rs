//! HTTP service answering delivery price predictions.
//!
//! The model artifact is loaded once, before the listener is bound, and is
//! shared read-only by every request for the life of the process. A
//! [`ServerState`] can only be built from a loaded model, so a router that
//! exists is always ready to serve.

pub mod config;
pub mod dto;
pub mod error;
pub mod handlers;

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use axum::body::Body;
use axum::http::{Request, Response};
use axum::routing::{get, post};
use axum::Router;
use pricing_core::{ModelError, PriceModel};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

pub use config::{ConfigError, ServerConfig};

/// State shared by all handlers. Immutable once constructed.
pub struct ServerState {
    pub model: PriceModel,
}

impl ServerState {
    pub fn new(model: PriceModel) -> Self {
        Self { model }
    }

    /// Loads the artifact at `path`. Fails if it is missing or corrupt.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ModelError> {
        PriceModel::load(path).map(Self::new)
    }
}

/// Builds the application router over a ready state.
pub fn router(state: Arc<ServerState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|req: &Request<Body>| {
            tracing::info_span!(
                "request",
                method = %req.method(),
                uri = %req.uri(),
                version = ?req.version(),
            )
        })
        .on_response(|res: &Response<Body>, latency: Duration, _span: &tracing::Span| {
            info!(
                latency = %format!("{} ms", latency.as_millis()),
                status = %res.status().as_u16(),
                "finished processing request"
            );
        });

    let logged_routes = Router::new()
        .route("/predict", post(handlers::predict::predict))
        .route("/model", get(handlers::model::info))
        .layer(trace_layer);

    Router::new()
        .merge(logged_routes)
        .route("/health", get(handlers::health))
        .layer(cors)
        .with_state(state)
}

/// Loads the model, then binds and serves until the process is stopped.
///
/// Returns before binding if the model cannot be loaded.
pub async fn serve(config: ServerConfig) -> Result<()> {
    let state = ServerState::load(&config.model_path)
        .with_context(|| format!("failed to load model from {}", config.model_path.display()))?;
    let app = router(Arc::new(state));

    info!("Starting server on {}", config.bind_addr);
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
