//! Error types shared by the generator and its outer layers.

use std::io;

use thiserror::Error;

use crate::config::ConfigError;

/// Errors surfaced by series generation, configuration, and export.
#[derive(Debug, Error)]
pub enum SeriesError {
    /// The requested period is not one of `hourly`, `daily`, or `monthly`.
    #[error("invalid period \"{0}\", expected one of: hourly, daily, monthly")]
    InvalidPeriod(String),

    /// A device id that is not part of the fleet was selected.
    #[error("unknown device \"{0}\"")]
    UnknownDevice(String),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("i/o error: {0}")]
    Io(#[from] io::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias for results carrying a [`SeriesError`].
pub type Result<T> = std::result::Result<T, SeriesError>;
