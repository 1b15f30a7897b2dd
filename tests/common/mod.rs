//! Shared test fixtures for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use feature_recorder::config::RunConfig;
use feature_recorder::forecast::{LagMeanModel, RecursiveForecaster, SyntheticHistory};
use feature_recorder::frame::FeatureFrame;

/// A `{t, x}` batch built from `(t, x)` row pairs.
pub fn tx_batch(rows: &[(f64, f64)]) -> Arc<FeatureFrame> {
    let rows: Vec<Vec<f64>> = rows.iter().map(|(t, x)| vec![*t, *x]).collect();
    Arc::new(FeatureFrame::from_rows(&["t", "x"], &rows).expect("valid rows"))
}

/// Default run configuration (2 series, 48 values, lags 1/2/24, horizon 12).
pub fn default_config() -> RunConfig {
    RunConfig::default()
}

/// History generated from the default configuration.
pub fn default_history(config: &RunConfig) -> Vec<Vec<f64>> {
    let h = &config.history;
    SyntheticHistory::new(h.base, h.amplitude, h.period, h.noise_std, h.seed)
        .generate(h.n_series, h.length)
}

/// Lag-mean forecaster with the configured lags.
pub fn default_forecaster(config: &RunConfig) -> RecursiveForecaster<LagMeanModel> {
    RecursiveForecaster::new(LagMeanModel, config.forecast.lags.clone()).expect("valid lags")
}
