//! Time label formatting keyed by period.

use std::fmt::Display;
use std::str::FromStr;

use chrono::{DateTime, TimeZone};
use serde::{Deserialize, Serialize};

use crate::config::ConfigError;
use crate::period::Period;

/// Renders the label of a sample point for a given period.
///
/// Implement this to plug in platform or locale specific formatting.
pub trait PeriodLabels {
    fn label<Tz: TimeZone>(&self, period: Period, at: &DateTime<Tz>) -> String
    where
        Tz::Offset: Display;
}

/// Hour display for time-of-day labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ClockStyle {
    /// `14:00`
    #[default]
    #[serde(rename = "24h")]
    TwentyFourHour,
    /// `02:00 PM`
    #[serde(rename = "12h")]
    TwelveHour,
}

impl FromStr for ClockStyle {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "24h" => Ok(ClockStyle::TwentyFourHour),
            "12h" => Ok(ClockStyle::TwelveHour),
            other => Err(ConfigError {
                field: "labels.clock".to_string(),
                message: format!("must be \"24h\" or \"12h\", got \"{other}\""),
            }),
        }
    }
}

/// English labels rendered with chrono format strings.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChronoLabels {
    pub clock: ClockStyle,
}

impl ChronoLabels {
    pub fn new(clock: ClockStyle) -> Self {
        Self { clock }
    }

    /// Format string used for `period`.
    pub fn pattern(&self, period: Period) -> &'static str {
        match (period, self.clock) {
            (Period::Hourly, ClockStyle::TwentyFourHour) => "%H:%M",
            (Period::Hourly, ClockStyle::TwelveHour) => "%I:%M %p",
            (Period::Daily, _) => "%b %-d",
            (Period::Monthly, _) => "%b %y",
        }
    }
}

impl PeriodLabels for ChronoLabels {
    fn label<Tz: TimeZone>(&self, period: Period, at: &DateTime<Tz>) -> String
    where
        Tz::Offset: Display,
    {
        at.format(self.pattern(period)).to_string()
    }
}
