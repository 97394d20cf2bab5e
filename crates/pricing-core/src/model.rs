//! Fitted linear price model and its on-disk artifact.

use std::path::{Path, PathBuf};
use std::{env, fs, io};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{Features, ModelError, PredictError, FEATURE_NAMES};

/// Artifact path relative to the directory it is resolved against.
pub const DEFAULT_ARTIFACT_PATH: &str = "models/price_model.json";

/// Picks the default artifact file shared by the trainer and the service.
///
/// An artifact under `work_dir` wins, then one next to the executable. When
/// neither exists the `work_dir` location is returned, which is where a fresh
/// training run writes.
pub fn resolve_artifact_path(work_dir: &Path, exe_dir: &Path) -> PathBuf {
    let local = work_dir.join(DEFAULT_ARTIFACT_PATH);
    if local.is_file() {
        return local;
    }
    let beside_exe = exe_dir.join(DEFAULT_ARTIFACT_PATH);
    if beside_exe.is_file() {
        return beside_exe;
    }
    local
}

/// [`resolve_artifact_path`] for the current process.
pub fn default_artifact_location() -> io::Result<PathBuf> {
    let work_dir = env::current_dir()?;
    let exe = env::current_exe()?;
    let exe_dir = exe.parent().unwrap_or(work_dir.as_path());
    Ok(resolve_artifact_path(&work_dir, exe_dir))
}

/// Something that maps a feature vector to a price.
///
/// Implementations must be pure: the same input always yields the same
/// output, and evaluation never mutates shared state.
pub trait PriceMapping: Send + Sync {
    /// Evaluates the mapping on `[distance, weight, volume]`.
    fn evaluate(&self, features: [f64; 3]) -> Result<f64, PredictError>;

    /// Validates the request, then evaluates it.
    fn predict(&self, features: &Features) -> Result<f64, PredictError> {
        features.validate()?;
        self.evaluate(features.as_array())
    }
}

/// A fitted linear regression: `intercept + coefficients · features`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceModel {
    /// Feature column names, matching the coefficient order.
    pub feature_names: Vec<String>,
    pub intercept: f64,
    pub coefficients: [f64; 3],
    /// Number of rows the model was fitted on.
    #[serde(default)]
    pub trained_rows: usize,
    /// Coefficient of determination on the held-out split, when one was scored.
    #[serde(default)]
    pub r2: Option<f64>,
}

impl PriceModel {
    /// Creates a model from raw parameters with no training metadata.
    pub fn new(intercept: f64, coefficients: [f64; 3]) -> Self {
        Self {
            feature_names: FEATURE_NAMES.iter().map(|s| s.to_string()).collect(),
            intercept,
            coefficients,
            trained_rows: 0,
            r2: None,
        }
    }

    pub fn with_training_info(mut self, trained_rows: usize, r2: Option<f64>) -> Self {
        self.trained_rows = trained_rows;
        self.r2 = r2;
        self
    }

    /// Reads and checks an artifact written by [`PriceModel::save`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ModelError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ModelError::Io {
            path: path.display().to_string(),
            source,
        })?;

        let model: PriceModel = serde_json::from_str(&content)?;
        model.check()?;

        info!(
            "Loaded price model from {} (intercept={:.4}, coefficients={:?})",
            path.display(),
            model.intercept,
            model.coefficients
        );
        Ok(model)
    }

    /// Writes the artifact as pretty JSON, creating parent directories.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ModelError> {
        let path = path.as_ref();
        let io_err = |source| ModelError::Io {
            path: path.display().to_string(),
            source,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content).map_err(io_err)?;
        Ok(())
    }

    /// Rejects parameters that cannot describe a usable mapping.
    pub fn check(&self) -> Result<(), ModelError> {
        if self.feature_names != FEATURE_NAMES {
            return Err(ModelError::Invalid(format!(
                "expected features {:?}, found {:?}",
                FEATURE_NAMES, self.feature_names
            )));
        }
        if !self.intercept.is_finite() || self.coefficients.iter().any(|c| !c.is_finite()) {
            return Err(ModelError::Invalid("non-finite model parameters".into()));
        }
        Ok(())
    }
}

impl PriceMapping for PriceModel {
    fn evaluate(&self, features: [f64; 3]) -> Result<f64, PredictError> {
        let price = self.intercept
            + self
                .coefficients
                .iter()
                .zip(features)
                .map(|(c, x)| c * x)
                .sum::<f64>();

        if !price.is_finite() {
            return Err(PredictError::Evaluation(format!(
                "model produced a non-finite price for features {features:?}"
            )));
        }
        Ok(price)
    }
}
