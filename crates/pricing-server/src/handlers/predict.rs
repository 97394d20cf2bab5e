//! Price prediction handler.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use pricing_core::{Features, PriceMapping};
use tracing::{debug, error, warn};

use crate::dto::{PredictRequest, PredictResponse};
use crate::error::AppError;
use crate::ServerState;

/// POST /predict - Estimate the price of one delivery.
pub async fn predict(
    State(state): State<Arc<ServerState>>,
    payload: Result<Json<PredictRequest>, JsonRejection>,
) -> Result<Json<PredictResponse>, AppError> {
    let Json(req) = payload.map_err(|rejection| {
        warn!("Rejected predict body: {}", rejection.body_text());
        AppError::from(rejection)
    })?;

    let features = Features::from(req);
    let price = state.model.predict(&features).map_err(|e| {
        let err = AppError::from(e);
        match &err {
            AppError::Validation(msg) => warn!("Invalid predict request: {}", msg),
            AppError::Internal(msg) => error!("Model evaluation failed: {}", msg),
        }
        err
    })?;

    debug!(
        distance = features.distance,
        weight = features.weight,
        volume = features.volume,
        price,
        "prediction served"
    );
    Ok(Json(PredictResponse { price }))
}
