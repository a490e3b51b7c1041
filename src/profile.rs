//! 24h household power profile for the dashboard overview chart.
//!
//! Unlike the flat series in [`crate::series`], the load here follows the
//! hour of day: a low night base, an active daytime band, and an evening peak.

use std::fmt;

use chrono::{DateTime, FixedOffset, TimeZone, Timelike};
use serde::Serialize;

use crate::labels::PeriodLabels;
use crate::period::Period;
use crate::synth::UniformSource;

/// One point of the daily profile.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfilePoint {
    pub label: String,
    pub at: DateTime<FixedOffset>,
    /// Power in whole watts.
    pub value: u32,
}

/// Load band an hour of day falls in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadBand {
    /// 00:00–06:59, 150–200 W.
    Night,
    /// 07:00–17:59 and 22:00–23:59, 400–700 W.
    Active,
    /// 18:00–21:59, 800–1100 W.
    EveningPeak,
}

impl LoadBand {
    pub fn for_hour(hour: u32) -> Self {
        match hour {
            18..=21 => LoadBand::EveningPeak,
            7..=23 => LoadBand::Active,
            _ => LoadBand::Night,
        }
    }

    /// Inclusive-exclusive watt range a draw in `[0, 1)` maps onto.
    pub fn range_w(self) -> (f64, f64) {
        match self {
            LoadBand::Night => (150.0, 200.0),
            LoadBand::Active => (400.0, 700.0),
            LoadBand::EveningPeak => (800.0, 1100.0),
        }
    }

    fn sample(self, u: f64) -> u32 {
        let (lo, hi) = self.range_w();
        (lo + u * (hi - lo)).floor() as u32
    }
}

/// Builds the 25 hourly points ending at `now`, oldest first.
pub fn daily_profile<Tz, S, L>(now: &DateTime<Tz>, source: &mut S, labels: &L) -> Vec<ProfilePoint>
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
    S: UniformSource + ?Sized,
    L: PeriodLabels,
{
    Period::Hourly
        .resolve()
        .points_in_time(now)
        .into_iter()
        .map(|at| {
            let band = LoadBand::for_hour(at.hour());
            ProfilePoint {
                label: labels.label(Period::Hourly, &at),
                value: band.sample(source.next_unit()),
                at: at.fixed_offset(),
            }
        })
        .collect()
}
