//! Sequence assembly: resolved period plus synthesized samples.

use std::fmt;

use chrono::{DateTime, FixedOffset, Local, TimeZone};
use serde::{Deserialize, Serialize};

use crate::labels::{ChronoLabels, PeriodLabels};
use crate::period::Period;
use crate::synth::{UniformSource, synthesize};

/// One point of a generated series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SamplePoint {
    pub label: String,
    /// Underlying point in time, used for ordering and export.
    pub at: DateTime<FixedOffset>,
    pub power: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub energy: Option<f64>,
}

impl fmt::Display for SamplePoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:>10} | {:>6} W", self.label, self.power)?;
        if let Some(energy) = self.energy {
            write!(f, " | {energy:>6.2} kWh")?;
        }
        Ok(())
    }
}

/// Caller-held selection that a series is derived from.
///
/// Regenerate on every change; nothing is cached.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesRequest {
    pub period: Period,
    /// Nominal load (W) the synthetic readings fluctuate around.
    pub base_value: f64,
    pub include_energy: bool,
}

impl SeriesRequest {
    pub fn new(period: Period, base_value: f64, include_energy: bool) -> Self {
        Self {
            period,
            base_value,
            include_energy,
        }
    }
}

/// Generates a series ending at the current local time, drawing from the
/// thread RNG and labelling with the default 24h English formatter.
pub fn generate_series(period: Period, base_value: f64, include_energy: bool) -> Vec<SamplePoint> {
    generate_series_at(
        &SeriesRequest::new(period, base_value, include_energy),
        &Local::now(),
        &mut rand::rng(),
        &ChronoLabels::default(),
    )
}

/// Generates a series ending at `now`.
///
/// Points run from `count` steps back to `now` itself, oldest first. Every
/// point shares the single `now` captured by the caller.
pub fn generate_series_at<Tz, S, L>(
    request: &SeriesRequest,
    now: &DateTime<Tz>,
    source: &mut S,
    labels: &L,
) -> Vec<SamplePoint>
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
    S: UniformSource + ?Sized,
    L: PeriodLabels,
{
    let resolution = request.period.resolve();
    let points: Vec<SamplePoint> = resolution
        .points_in_time(now)
        .into_iter()
        .map(|at| {
            let reading = synthesize(source, request.base_value, request.include_energy);
            SamplePoint {
                label: labels.label(request.period, &at),
                at: at.fixed_offset(),
                power: reading.power_w,
                energy: reading.energy_kwh,
            }
        })
        .collect();

    tracing::debug!(
        period = %request.period,
        base_value = request.base_value,
        include_energy = request.include_energy,
        points = points.len(),
        "generated series"
    );
    points
}

/// Aggregate figures over one series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SeriesSummary {
    pub points: usize,
    /// Sum of point energies; 0 when energy was not generated.
    pub total_energy_kwh: f64,
    pub peak_power_w: u32,
}

impl SeriesSummary {
    pub fn from_points(points: &[SamplePoint]) -> Self {
        Self {
            points: points.len(),
            total_energy_kwh: points.iter().filter_map(|p| p.energy).sum(),
            peak_power_w: points.iter().map(|p| p.power).max().unwrap_or(0),
        }
    }
}

impl fmt::Display for SeriesSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Points:       {}", self.points)?;
        writeln!(f, "Peak power:   {} W", self.peak_power_w)?;
        write!(f, "Total energy: {:.2} kWh", self.total_energy_kwh)
    }
}
