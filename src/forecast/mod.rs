//! Recursive multi-step forecasting with a per-step feature hook.

pub mod features;
pub mod history;
pub mod model;

use std::fmt;
use std::sync::Arc;

use tracing::{debug, info};

use crate::error::ForecastError;
use crate::recorder::StepHook;

pub use features::lag_features;
pub use history::SyntheticHistory;
pub use model::{ForecastModel, LagMeanModel, LastValueModel, Model};

/// Predictions from a recursive run, indexed by step then series.
#[derive(Debug, Clone, PartialEq)]
pub struct Forecast {
    steps: Vec<Vec<f64>>,
    n_series: usize,
}

impl Forecast {
    /// Number of generated steps.
    pub fn horizon(&self) -> usize {
        self.steps.len()
    }

    pub fn n_series(&self) -> usize {
        self.n_series
    }

    /// Predictions for every series at `step`.
    pub fn step(&self, step: usize) -> Option<&[f64]> {
        self.steps.get(step).map(Vec::as_slice)
    }

    /// Predictions for one series across all steps.
    pub fn series(&self, series: usize) -> Option<Vec<f64>> {
        if series >= self.n_series {
            return None;
        }
        Some(self.steps.iter().map(|s| s[series]).collect())
    }
}

impl fmt::Display for Forecast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (step, values) in self.steps.iter().enumerate() {
            write!(f, "h={:>3} |", step + 1)?;
            for v in values {
                write!(f, " {v:>10.4}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Forecaster that feeds its own predictions back as lags.
///
/// Generic over `M: Model` for static dispatch. At each step it builds the
/// lag features from history plus earlier predictions, passes them through
/// a [`StepHook`], and predicts from whatever batch the hook returns.
///
/// # Examples
///
/// ```
/// use feature_recorder::forecast::{LastValueModel, RecursiveForecaster};
/// use feature_recorder::recorder::FeatureRecorder;
///
/// let forecaster = RecursiveForecaster::new(LastValueModel, vec![1]).unwrap();
/// let mut recorder = FeatureRecorder::new();
/// let forecast = forecaster.predict(&[vec![1.0, 2.0]], 3, &mut recorder).unwrap();
/// assert_eq!(forecast.series(0), Some(vec![2.0, 2.0, 2.0]));
/// assert_eq!(recorder.len(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct RecursiveForecaster<M: Model> {
    model: M,
    lags: Vec<usize>,
}

impl<M: Model> RecursiveForecaster<M> {
    /// Creates a forecaster.
    ///
    /// # Arguments
    ///
    /// * `model` - One-step-ahead model
    /// * `lags` - Lags to expose as features, in column order
    ///
    /// # Errors
    ///
    /// Returns `ForecastError::InvalidLag` if `lags` is empty, contains 0,
    /// or repeats a value.
    pub fn new(model: M, lags: Vec<usize>) -> Result<Self, ForecastError> {
        if lags.is_empty() {
            return Err(ForecastError::InvalidLag("no lags given".into()));
        }
        if lags.contains(&0) {
            return Err(ForecastError::InvalidLag("lags must be >= 1".into()));
        }
        for (i, lag) in lags.iter().enumerate() {
            if lags[..i].contains(lag) {
                return Err(ForecastError::InvalidLag(format!("lag {lag} repeated")));
            }
        }
        Ok(Self { model, lags })
    }

    pub fn lags(&self) -> &[usize] {
        &self.lags
    }

    /// Largest configured lag, i.e. the history each series needs.
    pub fn max_lag(&self) -> usize {
        self.lags.iter().copied().max().unwrap_or(0)
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    /// Forecasts `horizon` steps for every series in `history`.
    ///
    /// `hook` is invoked exactly once per step, in step order.
    ///
    /// # Errors
    ///
    /// Returns `ForecastError::InsufficientHistory` if a series is shorter
    /// than the largest lag, or any error the model raises.
    pub fn predict<H: StepHook + ?Sized>(
        &self,
        history: &[Vec<f64>],
        horizon: usize,
        hook: &mut H,
    ) -> Result<Forecast, ForecastError> {
        let needed = self.max_lag();
        if let Some((series, values)) = history.iter().enumerate().find(|(_, v)| v.len() < needed) {
            return Err(ForecastError::InsufficientHistory {
                series,
                needed,
                available: values.len(),
            });
        }

        let mut buffers = history.to_vec();
        let mut steps = Vec::with_capacity(horizon);
        for step in 0..horizon {
            let features = Arc::new(lag_features(step, &buffers, &self.lags)?);
            let features = hook.on_step(step, features);
            let predictions = self.model.predict(&features)?;
            if predictions.len() != buffers.len() {
                return Err(ForecastError::PredictionCount {
                    expected: buffers.len(),
                    found: predictions.len(),
                });
            }
            for (buffer, p) in buffers.iter_mut().zip(&predictions) {
                buffer.push(*p);
            }
            debug!(step, hook = hook.name(), "generated step");
            steps.push(predictions);
        }

        info!(
            horizon,
            n_series = history.len(),
            model = self.model.name(),
            "recursive forecast complete"
        );
        Ok(Forecast {
            steps,
            n_series: history.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::FeatureFrame;
    use crate::recorder::{FeatureRecorder, FnHook};

    #[test]
    fn new_rejects_bad_lags() {
        assert!(RecursiveForecaster::new(LastValueModel, vec![]).is_err());
        assert!(RecursiveForecaster::new(LastValueModel, vec![0, 1]).is_err());
        assert!(RecursiveForecaster::new(LastValueModel, vec![1, 2, 1]).is_err());
    }

    #[test]
    fn predictions_feed_back_as_lags() {
        let forecaster = RecursiveForecaster::new(LagMeanModel, vec![1, 2]).expect("valid lags");
        let mut recorder = FeatureRecorder::new();
        let forecast = forecaster
            .predict(&[vec![2.0, 4.0]], 3, &mut recorder)
            .expect("enough history");

        // mean(4, 2) = 3, mean(3, 4) = 3.5, mean(3.5, 3) = 3.25
        assert_eq!(forecast.series(0), Some(vec![3.0, 3.5, 3.25]));
        let step2 = &recorder.batches()[2];
        assert_eq!(step2.column("lag1"), Some(&[3.5][..]));
        assert_eq!(step2.column("lag2"), Some(&[3.0][..]));
    }

    #[test]
    fn hook_output_drives_the_model() {
        let forecaster = RecursiveForecaster::new(LastValueModel, vec![1]).expect("valid lags");
        let mut doubler = FnHook::new("double_lag1", |_, batch: Arc<FeatureFrame>| {
            let rows: Vec<Vec<f64>> = batch.rows().map(|r| vec![r[0], r[1], r[2] * 2.0]).collect();
            Arc::new(FeatureFrame::from_rows(batch.column_names(), &rows).expect("valid rows"))
        });
        let forecast = forecaster
            .predict(&[vec![1.0]], 3, &mut doubler)
            .expect("enough history");
        assert_eq!(forecast.series(0), Some(vec![2.0, 4.0, 8.0]));
    }

    #[test]
    fn short_history_is_rejected_before_any_step() {
        let forecaster = RecursiveForecaster::new(LastValueModel, vec![1, 3]).expect("valid lags");
        let mut recorder = FeatureRecorder::new();
        let err = forecaster.predict(&[vec![1.0, 2.0, 3.0], vec![1.0]], 2, &mut recorder);
        assert_eq!(
            err,
            Err(ForecastError::InsufficientHistory {
                series: 1,
                needed: 3,
                available: 1,
            })
        );
        assert!(recorder.is_empty());
    }

    #[test]
    fn zero_horizon_never_calls_hook() {
        let forecaster = RecursiveForecaster::new(LastValueModel, vec![1]).expect("valid lags");
        let mut recorder = FeatureRecorder::new();
        let forecast = forecaster
            .predict(&[vec![1.0]], 0, &mut recorder)
            .expect("nothing to do");
        assert_eq!(forecast.horizon(), 0);
        assert!(recorder.is_empty());
    }

    #[test]
    fn prediction_count_mismatch_is_reported() {
        struct Always(Vec<f64>);
        impl Model for Always {
            fn predict(&self, _: &FeatureFrame) -> Result<Vec<f64>, ForecastError> {
                Ok(self.0.clone())
            }
            fn name(&self) -> &'static str {
                "always"
            }
        }

        let forecaster = RecursiveForecaster::new(Always(vec![1.0, 2.0]), vec![1]).expect("valid lags");
        let mut recorder = FeatureRecorder::new();
        let err = forecaster.predict(&[vec![1.0]], 1, &mut recorder);
        assert_eq!(
            err,
            Err(ForecastError::PredictionCount {
                expected: 1,
                found: 2,
            })
        );
    }
}
