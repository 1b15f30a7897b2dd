//! Per-step lag feature construction.

use crate::error::ForecastError;
use crate::frame::FeatureFrame;

/// Name of the column carrying the series index.
pub const SERIES_COLUMN: &str = "series";
/// Name of the column carrying the generated step index.
pub const STEP_COLUMN: &str = "step";

/// Column name for lag `lag`.
pub fn lag_column(lag: usize) -> String {
    format!("lag{lag}")
}

/// Builds the feature frame for one forecasting step.
///
/// One row per series. Columns are `series`, `step`, then `lag{l}` for each
/// lag in order, where `lag{l}` is the value `l` positions from the end of
/// that series' buffer.
///
/// # Errors
///
/// Returns `ForecastError::InsufficientHistory` if a buffer is shorter than
/// a requested lag, or `ForecastError::Frame` if `lags` repeats a value.
pub fn lag_features(step: usize, buffers: &[Vec<f64>], lags: &[usize]) -> Result<FeatureFrame, ForecastError> {
    let n = buffers.len();
    let mut columns = Vec::with_capacity(lags.len() + 2);
    columns.push((SERIES_COLUMN.to_string(), (0..n).map(|i| i as f64).collect()));
    columns.push((STEP_COLUMN.to_string(), vec![step as f64; n]));

    for &lag in lags {
        let mut values = Vec::with_capacity(n);
        for (series, buffer) in buffers.iter().enumerate() {
            let value = buffer
                .len()
                .checked_sub(lag)
                .and_then(|i| buffer.get(i))
                .ok_or(ForecastError::InsufficientHistory {
                    series,
                    needed: lag,
                    available: buffer.len(),
                })?;
            values.push(*value);
        }
        columns.push((lag_column(lag), values));
    }

    Ok(FeatureFrame::new(columns)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lags_index_from_buffer_end() {
        let buffers = vec![vec![1.0, 2.0, 3.0], vec![10.0, 20.0, 30.0]];
        let frame = lag_features(4, &buffers, &[1, 3]).expect("enough history");

        assert_eq!(
            frame.column_names(),
            &["series".to_string(), "step".to_string(), "lag1".to_string(), "lag3".to_string()]
        );
        assert_eq!(frame.column("series"), Some(&[0.0, 1.0][..]));
        assert_eq!(frame.column("step"), Some(&[4.0, 4.0][..]));
        assert_eq!(frame.column("lag1"), Some(&[3.0, 30.0][..]));
        assert_eq!(frame.column("lag3"), Some(&[1.0, 10.0][..]));
    }

    #[test]
    fn short_buffer_is_reported() {
        let buffers = vec![vec![1.0, 2.0, 3.0], vec![10.0]];
        let err = lag_features(0, &buffers, &[2]);
        assert_eq!(
            err,
            Err(ForecastError::InsufficientHistory {
                series: 1,
                needed: 2,
                available: 1,
            })
        );
    }

    #[test]
    fn no_series_gives_zero_rows() {
        let frame = lag_features(0, &[], &[1]).expect("nothing to index");
        assert_eq!(frame.n_rows(), 0);
        assert_eq!(frame.n_cols(), 3);
    }
}
