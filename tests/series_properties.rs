//! Structural and magnitude properties of generated series.

mod common;

use chrono::{Datelike, Months, Timelike};

use energy_series::labels::ChronoLabels;
use energy_series::period::Period;
use energy_series::series::{SeriesRequest, generate_series, generate_series_at};
use energy_series::synth::FixedSource;

#[test]
fn lengths_follow_period_counts() {
    for (period, expected) in [
        (Period::Hourly, 25),
        (Period::Daily, 31),
        (Period::Monthly, 13),
    ] {
        assert_eq!(generate_series(period, 400.0, false).len(), expected);
        assert_eq!(common::series(period, 100.0, true, 1).len(), expected);
    }
}

#[test]
fn timestamps_strictly_increase() {
    for period in Period::ALL {
        let series = common::series(period, common::AGGREGATE_BASE_W, false, 2);
        for pair in series.windows(2) {
            assert!(pair[0].at < pair[1].at, "{period}: {} !< {}", pair[0].at, pair[1].at);
        }
    }
}

#[test]
fn power_within_quarter_of_base() {
    for seed in 0..20 {
        for base in [0.0, 1.0, 100.0, 400.0, 2_500.0] {
            for p in common::series(Period::Daily, base, false, seed) {
                assert!(f64::from(p.power) <= base * 1.25, "power {} base {base}", p.power);
            }
        }
    }
    for p in common::series(Period::Hourly, 400.0, false, 99) {
        assert!((0..=600).contains(&p.power));
    }
}

#[test]
fn energy_floor_and_precision() {
    for seed in 0..10 {
        for p in common::series(Period::Monthly, common::AGGREGATE_BASE_W, true, seed) {
            let e = p.energy.unwrap_or(-1.0);
            assert!(e >= 0.1, "energy {e}");
            assert!(((e * 100.0).round() - e * 100.0).abs() < 1e-9, "energy {e}");
        }
    }
}

#[test]
fn power_only_series_has_no_energy() {
    let series = common::series(Period::Hourly, 400.0, false, 3);
    assert!(series.iter().all(|p| p.energy.is_none()));
}

#[test]
fn label_patterns_per_period() {
    for p in common::series(Period::Hourly, 400.0, false, 4) {
        assert!(common::is_clock_label(&p.label), "hourly label {}", p.label);
    }
    for p in common::series(Period::Daily, 400.0, false, 4) {
        assert!(common::is_month_label(&p.label, 1, 2), "daily label {}", p.label);
    }
    for p in common::series(Period::Monthly, 400.0, false, 4) {
        assert!(common::is_month_label(&p.label, 2, 2), "monthly label {}", p.label);
    }
}

#[test]
fn successive_calls_share_labels_not_values() {
    let first = common::series(Period::Hourly, 400.0, false, 10);
    let second = common::series(Period::Hourly, 400.0, false, 11);
    let labels = |s: &[energy_series::SamplePoint]| {
        s.iter().map(|p| p.label.clone()).collect::<Vec<_>>()
    };
    assert_eq!(first.len(), 25);
    assert_eq!(labels(&first), labels(&second));
    let powers = |s: &[energy_series::SamplePoint]| s.iter().map(|p| p.power).collect::<Vec<_>>();
    assert_ne!(powers(&first), powers(&second));
}

#[test]
fn monthly_points_step_back_calendar_months() {
    let now = common::fixed_now();
    let series = common::series(Period::Monthly, common::DEVICE_BASE_W, true, 5);
    assert_eq!(series.len(), 13);
    let current_month = now
        .date_naive()
        .with_day(1)
        .expect("day 1 always exists");
    for (idx, p) in series.iter().enumerate() {
        let months_back = 12 - idx as u32;
        let expected = current_month
            .checked_sub_months(Months::new(months_back))
            .expect("month arithmetic in range");
        assert_eq!(p.at.date_naive(), expected);
        assert_eq!((p.at.hour(), p.at.minute()), (0, 0));
    }
}

#[test]
fn zero_base_does_not_raise() {
    let series = common::series(Period::Hourly, 0.0, true, 6);
    assert_eq!(series.len(), 25);
    for p in series {
        assert_eq!(p.power, 0);
        assert_eq!(p.energy, Some(0.1));
    }
}

#[test]
fn fixed_source_reproduces_formulas() {
    let mut source = FixedSource::new([0.25, 0.9]);
    let request = SeriesRequest::new(Period::Daily, 400.0, true);
    let series = generate_series_at(
        &request,
        &common::fixed_now(),
        &mut source,
        &ChronoLabels::default(),
    );
    for p in series {
        // 400 + (0.25 - 0.5) * 200 = 350; 0.9 * 400 * 0.005 = 1.8
        assert_eq!(p.power, 350);
        assert_eq!(p.energy, Some(1.8));
    }
}

#[test]
fn same_seed_same_series() {
    let a = common::series(Period::Daily, 400.0, true, 77);
    let b = common::series(Period::Daily, 400.0, true, 77);
    assert_eq!(a, b);
}
