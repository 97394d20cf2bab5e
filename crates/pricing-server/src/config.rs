//! Service configuration read from the environment.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

use pricing_core::default_artifact_location;
use thiserror::Error;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid BIND_ADDR {0:?}: {1}")]
    InvalidAddr(String, std::net::AddrParseError),

    #[error("Cannot resolve default model location")]
    ModelLocation(#[source] std::io::Error),
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Location of the fitted model artifact.
    pub model_path: PathBuf,
    pub bind_addr: SocketAddr,
}

impl ServerConfig {
    /// Reads `PRICE_MODEL_PATH` and `BIND_ADDR`.
    ///
    /// Without `PRICE_MODEL_PATH` the artifact is the one the training job
    /// writes by default: `models/price_model.json` under the working
    /// directory, or beside the executable when only that one exists.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let model_path = match lookup("PRICE_MODEL_PATH").filter(|p| !p.is_empty()) {
            Some(path) => PathBuf::from(path),
            None => default_artifact_location().map_err(ConfigError::ModelLocation)?,
        };

        let addr = lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.into());
        let bind_addr = addr
            .parse()
            .map_err(|e| ConfigError::InvalidAddr(addr.clone(), e))?;

        Ok(Self { model_path, bind_addr })
    }
}
