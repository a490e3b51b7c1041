//! TOML configuration for the series generator and CLI defaults.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::devices::{DeviceSelection, LoadPolicy};
use crate::labels::ClockStyle;
use crate::period::Period;

/// Top-level configuration parsed from TOML.
///
/// Every section is optional and falls back to the defaults of the
/// analytics view: hourly power for the whole house.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Which series to generate.
    #[serde(default)]
    pub series: SeriesConfig,
    /// Base loads per selection.
    #[serde(default)]
    pub loads: LoadPolicy,
    /// Label rendering.
    #[serde(default)]
    pub labels: LabelsConfig,
}

/// Series selection.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SeriesConfig {
    pub period: Period,
    /// `"all"` or a device id.
    pub device: String,
    pub include_energy: bool,
    /// Seed for reproducible output; unseeded runs draw from the thread RNG.
    pub seed: Option<u64>,
}

impl Default for SeriesConfig {
    fn default() -> Self {
        Self {
            period: Period::Hourly,
            device: "all".to_string(),
            include_energy: false,
            seed: None,
        }
    }
}

impl SeriesConfig {
    pub fn selection(&self) -> DeviceSelection {
        self.device.parse().unwrap_or_default()
    }
}

/// Label rendering.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LabelsConfig {
    pub clock: ClockStyle,
}

/// Configuration error with field path and constraint description.
#[derive(Debug, Clone, Error)]
#[error("config error: {field}: {message}")]
pub struct ConfigError {
    /// Dotted field path (e.g., `"loads.device_base_w"`).
    pub field: String,
    pub message: String,
}

impl AppConfig {
    /// Parses a configuration file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError {
            field: "config".to_string(),
            message: format!("cannot read \"{}\": {e}", path.display()),
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError {
            field: "toml".to_string(),
            message: e.to_string(),
        })
    }

    /// Validates all fields and returns every violation found.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        for (field, value) in [
            ("loads.aggregate_base_w", self.loads.aggregate_base_w),
            ("loads.device_base_w", self.loads.device_base_w),
        ] {
            if !value.is_finite() || value < 0.0 {
                errors.push(ConfigError {
                    field: field.into(),
                    message: format!("must be a finite value >= 0, got {value}"),
                });
            }
        }

        if self.series.device.trim().is_empty() {
            errors.push(ConfigError {
                field: "series.device".into(),
                message: "must be \"all\" or a device id".into(),
            });
        }

        errors
    }
}
