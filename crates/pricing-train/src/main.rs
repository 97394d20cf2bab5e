use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use pricing_train::{run, TrainConfig};

#[derive(Debug, Parser)]
#[command(
    name = "pricing-train",
    version,
    about = "Fit the delivery price model from historical trips",
    long_about = "Reads a CSV with columns distance,weight,volume,price, fits a linear \
        regression, reports R² on a held-out split and writes the model artifact \
        served by pricing-server."
)]
struct Cli {
    /// CSV dataset of past trips
    #[arg(long, default_value = "data/trips.csv")]
    data: PathBuf,

    /// Where to write the fitted model (defaults to the file pricing-server loads)
    #[arg(long)]
    output: Option<PathBuf>,

    /// Fraction of rows held out for evaluation
    #[arg(long, default_value_t = 0.2)]
    test_size: f64,

    /// Seed for the train/test shuffle
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .compact()
        .init();

    let cli = Cli::parse();
    let defaults = TrainConfig::default();
    let config = TrainConfig {
        data_path: cli.data,
        output_path: cli.output.unwrap_or(defaults.output_path),
        test_size: cli.test_size,
        seed: cli.seed,
    };

    run(&config).with_context(|| format!("training from {} failed", config.data_path.display()))?;
    Ok(())
}
