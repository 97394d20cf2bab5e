//! Core domain types and error definitions for delivery price prediction.
//!
//! This crate provides the pieces shared by the training job and the
//! prediction service:
//!
//! - [`PriceModel`] — the fitted linear mapping, with its JSON artifact format
//! - [`Features`] — the (distance, weight, volume) feature vector
//! - [`PriceMapping`] — anything that can turn a feature vector into a price
//! - [`ModelError`] and [`PredictError`] — load-time and query-time failures
//!
//! # Example
//!
//! ```rust
//! use pricing_core::{Features, PriceMapping, PriceModel};
//!
//! let model = PriceModel::new(5.0, [2.0, 0.5, 3.0]);
//! let features = Features::new(10.0, 100.0, 1.0);
//!
//! let price = model.predict(&features).unwrap();
//! assert_eq!(price, 5.0 + 20.0 + 50.0 + 3.0);
//! ```

mod features;
mod model;

pub use features::{Features, FEATURE_NAMES};
pub use model::{
    default_artifact_location, resolve_artifact_path, PriceMapping, PriceModel,
    DEFAULT_ARTIFACT_PATH,
};

use thiserror::Error;

/// Errors raised while loading or saving a model artifact.
#[derive(Error, Debug)]
pub enum ModelError {
    /// The artifact file could not be read or written.
    #[error("Model artifact I/O failed for {path}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The artifact is not valid JSON for a price model.
    #[error("Failed to decode model artifact: {0}")]
    Parse(#[from] serde_json::Error),

    /// The artifact decoded but its contents are unusable.
    #[error("Invalid model artifact: {0}")]
    Invalid(String),
}

/// Errors returned by a single prediction.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PredictError {
    /// The request violated an input constraint. Caller's fault.
    #[error("{0}")]
    Validation(String),

    /// The mapping failed while evaluating valid input.
    #[error("{0}")]
    Evaluation(String),
}
