//! Error types for frames, recorders, forecasting, configuration, and CSV I/O.

use std::io;

use thiserror::Error;

/// Errors raised while building or concatenating feature frames.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FrameError {
    /// A column name appears more than once in one frame.
    #[error("duplicate column \"{0}\"")]
    DuplicateColumn(String),

    /// A column's length differs from the frame's first column.
    #[error("column \"{column}\" has {found} rows, expected {expected}")]
    ColumnLength {
        column: String,
        expected: usize,
        found: usize,
    },

    /// A row passed to a row-major constructor has the wrong width.
    #[error("row {row} has {found} values, expected {expected}")]
    RowWidth {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// A batch carries a different column set than the first batch.
    #[error("schema mismatch in batch {batch}: expected columns {expected:?}, found {found:?}")]
    SchemaMismatch {
        /// Zero-based index of the first offending batch.
        batch: usize,
        expected: Vec<String>,
        found: Vec<String>,
    },
}

/// Errors raised by the recursive forecasting driver.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ForecastError {
    /// A series is shorter than the largest configured lag.
    #[error("series {series} needs {needed} values of history, has {available}")]
    InsufficientHistory {
        series: usize,
        needed: usize,
        available: usize,
    },

    /// Lags must be non-empty and strictly positive.
    #[error("invalid lag set: {0}")]
    InvalidLag(String),

    /// The model needs a column the step's features do not carry.
    #[error("missing feature column \"{0}\"")]
    MissingFeature(String),

    /// The model produced the wrong number of predictions for a step.
    #[error("model returned {found} predictions, expected {expected}")]
    PredictionCount { expected: usize, found: usize },

    #[error(transparent)]
    Frame(#[from] FrameError),
}

/// Configuration error with field path and constraint description.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("config error: {field}: {message}")]
pub struct ConfigError {
    /// Dotted field path (e.g., `"forecast.horizon"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl ConfigError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Errors raised while writing or reading feature CSV files.
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("io error: {0}")]
    Io(#[from] io::Error),

    /// A cell could not be parsed as a number.
    #[error("row {row}, column \"{column}\": cannot parse \"{value}\" as a number")]
    Parse {
        row: usize,
        column: String,
        value: String,
    },

    #[error(transparent)]
    Frame(#[from] FrameError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_mismatch_message_names_batch() {
        let err = FrameError::SchemaMismatch {
            batch: 2,
            expected: vec!["t".into(), "x".into()],
            found: vec!["t".into()],
        };
        let msg = err.to_string();
        assert!(msg.contains("batch 2"), "unexpected message: {msg}");
    }

    #[test]
    fn config_error_display_includes_field() {
        let err = ConfigError::new("forecast.horizon", "must be > 0");
        assert_eq!(err.to_string(), "config error: forecast.horizon: must be > 0");
    }

    #[test]
    fn frame_error_converts_into_forecast_error() {
        let err: ForecastError = FrameError::DuplicateColumn("lag1".into()).into();
        assert!(matches!(err, ForecastError::Frame(FrameError::DuplicateColumn(_))));
    }
}
