//! Period resolution: sample count, step, and label pattern per granularity.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, Months, NaiveDate, TimeDelta, TimeZone};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::SeriesError;

/// Milliseconds in one hour.
pub const HOUR_MS: i64 = 3_600_000;
/// Milliseconds in one day.
pub const DAY_MS: i64 = 86_400_000;

/// Charting granularity.
///
/// Serializes lowercase; deserializes any ASCII case, like [`FromStr`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    #[default]
    Hourly,
    Daily,
    Monthly,
}

impl Period {
    /// All periods in selector order.
    pub const ALL: [Period; 3] = [Period::Hourly, Period::Daily, Period::Monthly];

    /// Resolves this period into its sampling parameters.
    ///
    /// # Examples
    ///
    /// ```
    /// use energy_series::period::{Period, Step};
    ///
    /// let r = Period::Daily.resolve();
    /// assert_eq!(r.count, 30);
    /// assert_eq!(r.step, Step::Fixed(86_400_000));
    /// ```
    pub fn resolve(self) -> Resolution {
        match self {
            Period::Hourly => Resolution {
                period: self,
                count: 24,
                step: Step::Fixed(HOUR_MS),
            },
            Period::Daily => Resolution {
                period: self,
                count: 30,
                step: Step::Fixed(DAY_MS),
            },
            Period::Monthly => Resolution {
                period: self,
                count: 12,
                step: Step::CalendarMonth,
            },
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Period::Hourly => "Hourly",
            Period::Daily => "Daily",
            Period::Monthly => "Monthly",
        };
        f.write_str(name)
    }
}

impl FromStr for Period {
    type Err = SeriesError;

    /// Parses a period name, ignoring ASCII case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hourly" => Ok(Period::Hourly),
            "daily" => Ok(Period::Daily),
            "monthly" => Ok(Period::Monthly),
            _ => Err(SeriesError::InvalidPeriod(s.to_string())),
        }
    }
}

impl<'de> Deserialize<'de> for Period {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(serde::de::Error::custom)
    }
}

/// Spacing between consecutive sample points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// A fixed duration in milliseconds.
    Fixed(i64),
    /// One calendar month, with each point pinned to the first of its month.
    CalendarMonth,
}

impl Step {
    /// Fixed step length in milliseconds, or `None` for calendar months.
    pub fn millis(self) -> Option<i64> {
        match self {
            Step::Fixed(ms) => Some(ms),
            Step::CalendarMonth => None,
        }
    }
}

/// Sampling parameters derived from a [`Period`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub period: Period,
    /// Offsets run from `count` down to 0, so a series holds `count + 1` points.
    pub count: u32,
    pub step: Step,
}

impl Resolution {
    /// Number of points in a generated series.
    pub fn len(&self) -> usize {
        self.count as usize + 1
    }

    /// Always false; a series holds at least the "now" point.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Returns the point in time `offset` steps before `now`.
    ///
    /// Fixed steps subtract `offset * step` from `now`. Calendar months go
    /// back `offset` months from the current month and land on local
    /// midnight of the first day, or the first valid local time of that day
    /// when midnight is skipped by a DST change.
    pub fn point_in_time<Tz: TimeZone>(&self, now: &DateTime<Tz>, offset: u32) -> DateTime<Tz> {
        match self.step {
            Step::Fixed(ms) => now.clone() - TimeDelta::milliseconds(ms * i64::from(offset)),
            Step::CalendarMonth => month_start_before(now, offset),
        }
    }

    /// Points in time for offsets `count..=0`, oldest first.
    pub fn points_in_time<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> Vec<DateTime<Tz>> {
        (0..=self.count)
            .rev()
            .map(|offset| self.point_in_time(now, offset))
            .collect()
    }
}

fn month_start_before<Tz: TimeZone>(now: &DateTime<Tz>, months_back: u32) -> DateTime<Tz> {
    let local = now.naive_local();
    let first = NaiveDate::from_ymd_opt(local.year(), local.month(), 1)
        .and_then(|d| d.checked_sub_months(Months::new(months_back)))
        .unwrap_or(NaiveDate::MIN);
    let midnight = first.and_time(chrono::NaiveTime::MIN);
    let tz = now.timezone();
    if let Some(start) = tz.from_local_datetime(&midnight).earliest() {
        return start;
    }
    // Midnight falls inside a DST gap: take the first valid wall time of day 1.
    let after_gap = (1..=GAP_SEARCH_STEPS)
        .map(|k| midnight + TimeDelta::minutes(GAP_STEP_MINUTES * k))
        .find_map(|t| tz.from_local_datetime(&t).earliest());
    match after_gap {
        Some(start) => {
            tracing::warn!(
                month_start = %first,
                local_time = %start.naive_local(),
                "local midnight skipped by DST, month start moved forward"
            );
            start
        }
        None => {
            tracing::warn!(month_start = %first, "no valid local time on day 1, using UTC");
            tz.from_utc_datetime(&midnight)
        }
    }
}

/// Search granularity for the first valid local time after a DST gap.
const GAP_STEP_MINUTES: i64 = 30;
/// Covers a whole day of 30-minute steps.
const GAP_SEARCH_STEPS: i64 = 47;
