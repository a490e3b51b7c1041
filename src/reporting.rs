use std::io::{self, Write};

use crate::runner::{AnalyticsReport, DashboardReport};

pub fn write_analytics_table(report: &AnalyticsReport, out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "--- {} ({}) ---", report.title, report.request.period)?;
    for point in &report.points {
        writeln!(out, "{point}")?;
    }
    writeln!(out, "\n{}", report.summary)
}

pub fn write_dashboard_table(report: &DashboardReport, out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "--- Overview ---")?;
    writeln!(out, "{}", report.overview)?;
    writeln!(out, "\n--- Devices ---")?;
    for device in &report.devices {
        writeln!(out, "{device}")?;
    }
    writeln!(out, "\n--- Power Consumption (24h) ---")?;
    for point in &report.profile {
        writeln!(out, "{:>10} | {:>6} W", point.label, point.value)?;
    }
    Ok(())
}
