//! Resolves CLI and config settings and renders one dashboard view.

use std::fmt;
use std::io::Write;

use chrono::{DateTime, TimeZone};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;

use crate::cli::{CliOptions, OutputFormat, View};
use crate::config::AppConfig;
use crate::devices::{Device, DeviceSelection, Fleet, Overview};
use crate::error::{Result, SeriesError};
use crate::io::export::{write_csv, write_json, write_profile_csv};
use crate::labels::{ChronoLabels, ClockStyle};
use crate::profile::{ProfilePoint, daily_profile};
use crate::reporting::{write_analytics_table, write_dashboard_table};
use crate::series::{SamplePoint, SeriesRequest, SeriesSummary, generate_series_at};

/// Effective settings after CLI flags override the config file.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSettings {
    pub view: View,
    pub request: SeriesRequest,
    pub selection: DeviceSelection,
    pub seed: Option<u64>,
    pub clock: ClockStyle,
    pub format: OutputFormat,
}

impl RunSettings {
    /// Merges `cli` over `config`.
    ///
    /// An explicit `--base` replaces the selection policy; otherwise the
    /// base load follows the selected device.
    pub fn resolve(config: &AppConfig, cli: &CliOptions) -> Self {
        let selection = match &cli.device {
            Some(id) => id.parse().unwrap_or_default(),
            None => config.series.selection(),
        };
        let base_value = cli
            .base
            .unwrap_or_else(|| selection.base_load(&config.loads));
        let request = SeriesRequest::new(
            cli.period.unwrap_or(config.series.period),
            base_value,
            cli.energy || config.series.include_energy,
        );
        Self {
            view: cli.view,
            request,
            selection,
            seed: cli.seed.or(config.series.seed),
            clock: cli.clock.unwrap_or(config.labels.clock),
            format: cli.format,
        }
    }

    fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }
}

/// Analytics page: one series plus its summary.
#[derive(Debug, Clone, Serialize)]
pub struct AnalyticsReport {
    pub title: String,
    pub request: SeriesRequest,
    pub summary: SeriesSummary,
    pub points: Vec<SamplePoint>,
}

/// Dashboard page: fleet overview, devices, and the 24h power profile.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardReport {
    pub overview: Overview,
    pub devices: Vec<Device>,
    pub profile: Vec<ProfilePoint>,
}

/// Builds the analytics report ending at `now`.
///
/// # Errors
///
/// Returns [`SeriesError::UnknownDevice`] if the selection is not in the fleet.
pub fn analytics<Tz>(settings: &RunSettings, now: &DateTime<Tz>) -> Result<AnalyticsReport>
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    let fleet = Fleet::mock(now);
    let title = match fleet.resolve(&settings.selection)? {
        Some(device) => device.name.clone(),
        None => "Total Consumption".to_string(),
    };
    let points = generate_series_at(
        &settings.request,
        now,
        &mut settings.rng(),
        &ChronoLabels::new(settings.clock),
    );
    Ok(AnalyticsReport {
        title,
        request: settings.request,
        summary: SeriesSummary::from_points(&points),
        points,
    })
}

/// Builds the dashboard report ending at `now`.
pub fn dashboard<Tz>(settings: &RunSettings, now: &DateTime<Tz>) -> DashboardReport
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    let fleet = Fleet::mock(now);
    let profile = daily_profile(now, &mut settings.rng(), &ChronoLabels::new(settings.clock));
    DashboardReport {
        overview: fleet.overview(),
        devices: fleet.devices,
        profile,
    }
}

/// Renders the selected view to `out` in the selected format.
///
/// # Errors
///
/// Propagates selection, serialization, and write failures.
pub fn run<Tz, W>(settings: &RunSettings, now: &DateTime<Tz>, mut out: W) -> Result<()>
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
    W: Write,
{
    match settings.view {
        View::Analytics => {
            let report = analytics(settings, now)?;
            tracing::info!(
                title = %report.title,
                period = %report.request.period,
                points = report.summary.points,
                "rendering analytics"
            );
            match settings.format {
                OutputFormat::Table => write_analytics_table(&report, &mut out)?,
                OutputFormat::Csv => write_csv(&report.points, &mut out)?,
                OutputFormat::Json => write_json(&report, &mut out)?,
            }
        }
        View::Dashboard => {
            let report = dashboard(settings, now);
            tracing::info!(devices = report.devices.len(), "rendering dashboard");
            match settings.format {
                OutputFormat::Table => write_dashboard_table(&report, &mut out)?,
                OutputFormat::Csv => write_profile_csv(&report.profile, &mut out)?,
                OutputFormat::Json => write_json(&report, &mut out)?,
            }
        }
    }
    out.flush().map_err(SeriesError::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::period::Period;
    use chrono::Utc;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 17, 14, 0, 0).unwrap()
    }

    #[test]
    fn cli_overrides_config() {
        let mut config = AppConfig::default();
        config.series.period = Period::Daily;
        config.series.seed = Some(1);
        let cli = CliOptions {
            period: Some(Period::Monthly),
            device: Some("3".into()),
            seed: Some(5),
            ..CliOptions::default()
        };
        let settings = RunSettings::resolve(&config, &cli);
        assert_eq!(settings.request.period, Period::Monthly);
        assert_eq!(settings.request.base_value, 100.0);
        assert_eq!(settings.selection, DeviceSelection::Device("3".into()));
        assert_eq!(settings.seed, Some(5));
    }

    #[test]
    fn base_override_wins_over_policy() {
        let cli = CliOptions {
            base: Some(250.0),
            ..CliOptions::default()
        };
        let settings = RunSettings::resolve(&AppConfig::default(), &cli);
        assert_eq!(settings.request.base_value, 250.0);
        assert_eq!(settings.selection, DeviceSelection::All);
    }

    #[test]
    fn seeded_runs_are_reproducible() {
        let cli = CliOptions {
            seed: Some(42),
            energy: true,
            ..CliOptions::default()
        };
        let settings = RunSettings::resolve(&AppConfig::default(), &cli);
        let a = analytics(&settings, &now()).ok().map(|r| r.points);
        let b = analytics(&settings, &now()).ok().map(|r| r.points);
        assert!(a.is_some());
        assert_eq!(a, b);
    }

    #[test]
    fn unknown_device_fails_before_output() {
        let cli = CliOptions {
            device: Some("99".into()),
            ..CliOptions::default()
        };
        let settings = RunSettings::resolve(&AppConfig::default(), &cli);
        let mut out = Vec::new();
        let result = run(&settings, &now(), &mut out);
        assert!(matches!(result, Err(SeriesError::UnknownDevice(_))));
        assert!(out.is_empty());
    }

    #[test]
    fn device_selection_titles_report() {
        let cli = CliOptions {
            device: Some("2".into()),
            seed: Some(3),
            ..CliOptions::default()
        };
        let settings = RunSettings::resolve(&AppConfig::default(), &cli);
        let report = analytics(&settings, &now()).ok();
        assert_eq!(report.map(|r| r.title), Some("Termo".to_string()));
    }

    #[test]
    fn dashboard_csv_has_profile_rows() {
        let cli = CliOptions {
            view: View::Dashboard,
            format: OutputFormat::Csv,
            seed: Some(8),
            ..CliOptions::default()
        };
        let settings = RunSettings::resolve(&AppConfig::default(), &cli);
        let mut out = Vec::new();
        assert!(run(&settings, &now(), &mut out).is_ok());
        let text = String::from_utf8(out).unwrap_or_default();
        assert_eq!(text.lines().count(), 26);
    }
}
