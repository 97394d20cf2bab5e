use std::sync::Arc;

use axum::extract::State;
use axum::Json;

use crate::dto::ModelInfoResponse;
use crate::ServerState;

/// GET /model - Describe the loaded model.
pub async fn info(State(state): State<Arc<ServerState>>) -> Json<ModelInfoResponse> {
    Json(ModelInfoResponse::from(&state.model))
}
