use pricing_core::{Features, PriceModel};
use serde::{Deserialize, Serialize};

// === HTTP DTOs ===

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

impl HealthResponse {
    pub fn ok() -> Self {
        Self { status: "ok".into() }
    }
}

/// Body of `POST /predict`. Every field is required.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct PredictRequest {
    /// Trip distance in km.
    pub distance: f64,
    /// Load weight in kg.
    pub weight: f64,
    /// Load volume in m³.
    pub volume: f64,
}

impl From<PredictRequest> for Features {
    fn from(req: PredictRequest) -> Self {
        Features::new(req.distance, req.weight, req.volume)
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PredictResponse {
    pub price: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ModelInfoResponse {
    pub feature_names: Vec<String>,
    pub intercept: f64,
    pub coefficients: [f64; 3],
    pub trained_rows: usize,
    pub r2: Option<f64>,
}

impl From<&PriceModel> for ModelInfoResponse {
    fn from(model: &PriceModel) -> Self {
        Self {
            feature_names: model.feature_names.clone(),
            intercept: model.intercept,
            coefficients: model.coefficients,
            trained_rows: model.trained_rows,
            r2: model.r2,
        }
    }
}
