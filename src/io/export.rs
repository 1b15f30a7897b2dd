//! CSV export and import for combined feature frames.

use std::fs::File;
use std::io::{self, Read, Write};
use std::path::Path;

use crate::error::ExportError;
use crate::frame::FeatureFrame;

/// Exports a feature frame to a CSV file at the given path.
///
/// Writes a header row of column names followed by one data row per frame
/// row. `NaN` cells are written as empty fields.
///
/// # Errors
///
/// Returns an `ExportError` if file creation or writing fails.
pub fn export_csv(frame: &FeatureFrame, path: &Path) -> Result<(), ExportError> {
    let file = File::create(path)?;
    let buf = io::BufWriter::new(file);
    write_csv(frame, buf)
}

/// Writes a feature frame as CSV to any writer.
///
/// Values use the shortest representation that parses back to the same
/// `f64`, so [`read_csv`] recovers the frame exactly.
///
/// # Errors
///
/// Returns an `ExportError` if writing fails.
pub fn write_csv(frame: &FeatureFrame, writer: impl Write) -> Result<(), ExportError> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    wtr.write_record(frame.column_names())?;
    for row in frame.rows() {
        wtr.write_record(row.iter().map(|v| if v.is_nan() { String::new() } else { v.to_string() }))?;
    }

    wtr.flush()?;
    Ok(())
}

/// Reads a feature frame from CSV with a header row.
///
/// Empty fields become `NaN`.
///
/// # Errors
///
/// Returns `ExportError::Parse` for a non-numeric cell, `ExportError::Csv`
/// for malformed CSV, and `ExportError::Frame` for duplicate headers.
pub fn read_csv(reader: impl Read) -> Result<FeatureFrame, ExportError> {
    let mut rdr = csv::ReaderBuilder::new().from_reader(reader);
    let names: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();

    let mut rows = Vec::new();
    for (row, record) in rdr.records().enumerate() {
        let record = record?;
        let mut values = Vec::with_capacity(names.len());
        for (cell, name) in record.iter().zip(&names) {
            let value = if cell.trim().is_empty() {
                f64::NAN
            } else {
                cell.trim().parse::<f64>().map_err(|_| ExportError::Parse {
                    row,
                    column: name.clone(),
                    value: cell.to_string(),
                })?
            };
            values.push(value);
        }
        rows.push(values);
    }

    Ok(FeatureFrame::from_rows(&names, &rows)?)
}

/// Reads a feature frame from a CSV file.
///
/// # Errors
///
/// Same as [`read_csv`], plus `ExportError::Io` if the file cannot be opened.
pub fn import_csv(path: &Path) -> Result<FeatureFrame, ExportError> {
    let file = File::open(path)?;
    read_csv(io::BufReader::new(file))
}
