//! CSV and JSON export for generated series.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::Result;
use crate::profile::ProfilePoint;
use crate::series::SamplePoint;

/// Column header for CSV export.
pub const HEADER: [&str; 4] = ["label", "timestamp", "power_w", "energy_kwh"];

/// Column header for daily profile export.
pub const PROFILE_HEADER: [&str; 3] = ["label", "timestamp", "power_w"];

/// Creates (or truncates) the file at `path` as a buffered output.
///
/// # Errors
///
/// Returns an error if the file cannot be created.
pub fn create_output(path: &Path) -> Result<BufWriter<File>> {
    let file = File::create(path)?;
    Ok(BufWriter::new(file))
}

/// Writes a series as CSV to any writer.
///
/// The energy column is left empty for power-only series.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_csv(points: &[SamplePoint], writer: impl Write) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);
    wtr.write_record(HEADER)?;

    for p in points {
        wtr.write_record([
            p.label.clone(),
            p.at.to_rfc3339(),
            p.power.to_string(),
            p.energy.map(|e| format!("{e:.2}")).unwrap_or_default(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Writes a daily profile as CSV to any writer.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_profile_csv(points: &[ProfilePoint], writer: impl Write) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);
    wtr.write_record(PROFILE_HEADER)?;
    for p in points {
        wtr.write_record([p.label.clone(), p.at.to_rfc3339(), p.value.to_string()])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Writes any serializable value as pretty JSON followed by a newline.
///
/// # Errors
///
/// Returns an error if serialization or writing fails.
pub fn write_json<T: serde::Serialize + ?Sized>(value: &T, mut writer: impl Write) -> Result<()> {
    serde_json::to_writer_pretty(&mut writer, value)?;
    writeln!(writer)?;
    Ok(())
}
