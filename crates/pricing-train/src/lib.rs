//! Offline training job for the delivery price model.
//!
//! Reads historical trips from CSV, fits a linear regression of price on
//! distance, weight and volume, scores it on a held-out split and writes the
//! artifact the prediction service loads.

pub mod dataset;
pub mod fit;

use std::path::PathBuf;

use pricing_core::{default_artifact_location, ModelError, PriceModel, DEFAULT_ARTIFACT_PATH};
use thiserror::Error;
use tracing::{info, warn};

pub use dataset::{describe, load_csv, ColumnSummary, TripRecord};
pub use fit::{fit, r2_score, train_test_split};

/// Errors that can occur while training.
#[derive(Error, Debug)]
pub enum TrainError {
    #[error("Failed to read dataset: {0}")]
    Dataset(String),

    #[error("Dataset has no rows")]
    EmptyDataset,

    #[error("Invalid train/test split: {0}")]
    Split(String),

    #[error("Least-squares solve failed: {0}")]
    Solver(String),

    #[error("Failed to score model on the test split: {0}")]
    Scoring(String),

    #[error(transparent)]
    Artifact(#[from] ModelError),
}

/// Inputs for one training run.
#[derive(Debug, Clone)]
pub struct TrainConfig {
    pub data_path: PathBuf,
    pub output_path: PathBuf,
    /// Fraction of rows held out for scoring.
    pub test_size: f64,
    pub seed: u64,
}

impl Default for TrainConfig {
    /// Writes to the same artifact file the service loads by default.
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("data/trips.csv"),
            output_path: default_artifact_location()
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_ARTIFACT_PATH)),
            test_size: 0.2,
            seed: 42,
        }
    }
}

/// Runs the whole job: load, summarize, split, fit, score, save.
pub fn run(config: &TrainConfig) -> Result<PriceModel, TrainError> {
    let records = load_csv(&config.data_path)?;
    info!("Loaded {} trips from {}", records.len(), config.data_path.display());

    for record in records.iter().take(5) {
        info!(
            "  distance={} weight={} volume={} price={}",
            record.distance, record.weight, record.volume, record.price
        );
    }
    for column in describe(&records) {
        info!("  {}", column);
    }

    let (train, test) = train_test_split(&records, config.test_size, config.seed)?;
    info!("Split into {} training and {} test rows", train.len(), test.len());

    let model = fit(&train)?;
    let r2 = r2_score(&model, &test)?;
    match r2 {
        Some(r2) => info!("Test R²: {:.2}", r2),
        None => warn!("Test R² undefined for {} held-out rows", test.len()),
    }

    let model = model.with_training_info(train.len(), r2);
    model.save(&config.output_path)?;
    info!("Model saved to {}", config.output_path.display());

    Ok(model)
}
