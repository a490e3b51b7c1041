//! Shared test fixtures for integration tests.
#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use rand::SeedableRng;
use rand::rngs::StdRng;

use energy_series::labels::ChronoLabels;
use energy_series::period::Period;
use energy_series::series::{SamplePoint, SeriesRequest, generate_series_at};

/// Aggregate ("all devices") base load (W).
pub const AGGREGATE_BASE_W: f64 = 400.0;
/// Single-device base load (W).
pub const DEVICE_BASE_W: f64 = 100.0;

/// A fixed wall-clock moment away from month and year boundaries.
pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 7, 15, 10, 20, 0).unwrap()
}

/// Seeded RNG for reproducible draws.
pub fn seeded(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Generates a series at [`fixed_now`] with a seeded RNG and default labels.
pub fn series(period: Period, base: f64, include_energy: bool, seed: u64) -> Vec<SamplePoint> {
    generate_series_at(
        &SeriesRequest::new(period, base, include_energy),
        &fixed_now(),
        &mut seeded(seed),
        &ChronoLabels::default(),
    )
}

/// True if `label` looks like `"HH:MM"`.
pub fn is_clock_label(label: &str) -> bool {
    let bytes = label.as_bytes();
    bytes.len() == 5 && bytes[2] == b':' && label.chars().filter(char::is_ascii_digit).count() == 4
}

/// True if `label` is a short English month name followed by a number of
/// `digits` characters (1..=2 for day-of-month, exactly 2 for years).
pub fn is_month_label(label: &str, min_digits: usize, max_digits: usize) -> bool {
    const MONTHS: [&str; 12] = [
        "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
    ];
    let Some((month, number)) = label.split_once(' ') else {
        return false;
    };
    MONTHS.contains(&month)
        && (min_digits..=max_digits).contains(&number.len())
        && number.chars().all(|c| c.is_ascii_digit())
}
