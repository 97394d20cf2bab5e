//! HTTP route handlers for the pricing service.

pub mod model;
pub mod predict;

use axum::Json;

use crate::dto::HealthResponse;

/// Health check endpoint.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
