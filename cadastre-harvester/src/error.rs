use std::path::PathBuf;

use cadastre::error::CadastreError;
use cadastre_config::load::LoadConfigError;
use cadastre_config::shared::ValidationError;
use thiserror::Error;

/// Result type for harvester operations.
pub type HarvesterResult<T> = Result<T, HarvesterError>;

/// Error type for the harvester service.
///
/// Wraps [`CadastreError`] for pipeline errors and provides variants for
/// infrastructure errors hit before the pipeline starts.
#[derive(Debug, Error)]
pub enum HarvesterError {
    /// Pipeline or harvest-related error.
    #[error(transparent)]
    Harvest(#[from] CadastreError),

    /// Configuration loading error.
    #[error("configuration error: {0}")]
    Config(#[from] LoadConfigError),

    /// Configuration validation error.
    #[error("invalid configuration: {0}")]
    Validation(#[from] ValidationError),

    /// Tracing initialization error.
    #[error("telemetry error: {0}")]
    Telemetry(#[from] tracing::subscriber::SetGlobalDefaultError),

    /// Ward universe file is missing or holds no codes.
    #[error("no ward codes found in {path}")]
    NoWardCodes { path: PathBuf },

    /// I/O error.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}
