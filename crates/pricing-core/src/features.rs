//! The feature vector describing a delivery request.

use crate::PredictError;

/// Column names, in the order the model's coefficients are stored.
pub const FEATURE_NAMES: [&str; 3] = ["distance", "weight", "volume"];

/// A delivery described by its trip distance and load size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Features {
    /// Trip distance in km.
    pub distance: f64,
    /// Load weight in kg.
    pub weight: f64,
    /// Load volume in m³.
    pub volume: f64,
}

impl Features {
    pub fn new(distance: f64, weight: f64, volume: f64) -> Self {
        Self { distance, weight, volume }
    }

    /// Checks that every field is a finite number strictly greater than zero.
    ///
    /// Fields are checked in column order and the first offending one is
    /// reported.
    pub fn validate(&self) -> Result<(), PredictError> {
        for (name, value) in FEATURE_NAMES.iter().zip(self.as_array()) {
            if !value.is_finite() {
                return Err(PredictError::Validation(format!(
                    "{name}: must be a finite number"
                )));
            }
            if value <= 0.0 {
                return Err(PredictError::Validation(format!(
                    "{name}: must be greater than 0, got {value}"
                )));
            }
        }
        Ok(())
    }

    pub fn as_array(&self) -> [f64; 3] {
        [self.distance, self.weight, self.volume]
    }
}
