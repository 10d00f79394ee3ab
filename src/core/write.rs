//! CSV serialization
//!
//! Writes one header line plus one line per export row, semicolon-delimited
//! UTF-8, truncating any existing file. Numeric formatting is deterministic
//! and identical for every entity kind, which keeps re-runs byte-for-byte
//! reproducible on identical input.

use crate::domain::{AttrValue, ExportRow, Result, TransectError};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Render one field for CSV output
///
/// Rules, in order: a float with no fractional component renders as an
/// integer literal; a float with a fractional component renders with
/// exactly six digits after the decimal point; text renders as-is.
pub fn format_field(value: &AttrValue) -> String {
    match value {
        AttrValue::Number(n) if n.is_finite() && n.fract() == 0.0 => format!("{}", *n as i64),
        AttrValue::Number(n) => format!("{n:.6}"),
        AttrValue::Text(s) => s.clone(),
    }
}

/// Write header plus rows to `path`
///
/// Creates the file fresh, overwriting any prior file of the same name.
///
/// # Errors
///
/// Returns [`TransectError::Write`] on any I/O failure; the failure is
/// isolated to this one file.
pub fn write_csv(rows: &[ExportRow], headers: &[&str], path: &Path) -> Result<PathBuf> {
    let start = Instant::now();

    let mut writer = csv::WriterBuilder::new()
        .delimiter(b';')
        .from_path(path)
        .map_err(|e| TransectError::Write(format!("{}: {e}", path.display())))?;

    writer
        .write_record(headers)
        .map_err(|e| TransectError::Write(format!("{}: {e}", path.display())))?;

    for row in rows {
        let fields: Vec<String> = row.iter().map(format_field).collect();
        writer
            .write_record(&fields)
            .map_err(|e| TransectError::Write(format!("{}: {e}", path.display())))?;
    }

    writer
        .flush()
        .map_err(|e| TransectError::Write(format!("{}: {e}", path.display())))?;

    tracing::info!(
        path = %path.display(),
        rows = rows.len(),
        elapsed_secs = format!("{:.2}", start.elapsed().as_secs_f64()),
        "CSV file written"
    );

    Ok(path.to_path_buf())
}
