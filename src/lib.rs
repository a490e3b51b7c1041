//! Synthetic home-energy chart data: per-period power and energy series,
//! a 24h dashboard profile, and a mock device fleet.

pub mod cli;
pub mod config;
/// Mock device fleet and base-load policy.
pub mod devices;
pub mod error;
pub mod io;
pub mod labels;
/// Period resolution: counts, steps, and points in time.
pub mod period;
pub mod profile;
pub mod reporting;
pub mod runner;
/// Sequence assembly and series summaries.
pub mod series;
/// Power and energy formulas behind an injectable random source.
pub mod synth;

pub use error::{Result, SeriesError};
pub use period::Period;
pub use series::{SamplePoint, SeriesRequest, generate_series, generate_series_at};
