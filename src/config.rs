//! TOML-based run configuration.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;
use crate::forecast::ForecastModel;
use crate::frame::SchemaPolicy;

/// Top-level run configuration parsed from TOML.
///
/// Every section is optional and falls back to its defaults. Load from
/// TOML with [`RunConfig::from_toml_file`] or use [`RunConfig::default`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunConfig {
    /// Feature recorder settings.
    #[serde(default)]
    pub recorder: RecorderConfig,
    /// Synthetic history settings.
    #[serde(default)]
    pub history: HistoryConfig,
    /// Recursive forecast settings.
    #[serde(default)]
    pub forecast: ForecastConfig,
}

/// Feature recorder settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RecorderConfig {
    /// How batches with differing columns are combined: `"strict"` or `"union"`.
    pub schema_policy: SchemaPolicy,
}

/// Synthetic history settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HistoryConfig {
    /// Number of series (must be > 0).
    pub n_series: usize,
    /// Values of history per series (must cover the largest lag).
    pub length: usize,
    /// Season length in steps (must be > 0).
    pub period: usize,
    /// Level the series oscillate around.
    pub base: f64,
    /// Seasonal amplitude.
    pub amplitude: f64,
    /// Gaussian noise standard deviation (must be >= 0).
    pub noise_std: f64,
    /// Master random seed.
    pub seed: u64,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            n_series: 2,
            length: 48,
            period: 24,
            base: 10.0,
            amplitude: 3.0,
            noise_std: 0.5,
            seed: 42,
        }
    }
}

/// Recursive forecast settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ForecastConfig {
    /// Steps to generate (must be > 0).
    pub horizon: usize,
    /// Lags exposed as features, in column order.
    pub lags: Vec<usize>,
    /// Model name: `"last_value"` or `"lag_mean"`.
    pub model: String,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            horizon: 12,
            lags: vec![1, 2, 24],
            model: "lag_mean".to_string(),
        }
    }
}

impl RunConfig {
    /// Parses a configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)
            .map_err(|e| ConfigError::new("config", format!("cannot read \"{}\": {e}", path.display())))?;
        Self::from_toml_str(&content)
    }

    /// Parses a configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError::new("toml", e.to_string()))
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        let h = &self.history;
        if h.n_series == 0 {
            errors.push(ConfigError::new("history.n_series", "must be > 0"));
        }
        if h.period == 0 {
            errors.push(ConfigError::new("history.period", "must be > 0"));
        }
        if h.noise_std.is_nan() || h.noise_std < 0.0 {
            errors.push(ConfigError::new("history.noise_std", "must be >= 0"));
        }

        let f = &self.forecast;
        if f.horizon == 0 {
            errors.push(ConfigError::new("forecast.horizon", "must be > 0"));
        }
        if f.lags.is_empty() {
            errors.push(ConfigError::new("forecast.lags", "must not be empty"));
        }
        if f.lags.contains(&0) {
            errors.push(ConfigError::new("forecast.lags", "every lag must be >= 1"));
        }
        if f.lags.iter().enumerate().any(|(i, lag)| f.lags[..i].contains(lag)) {
            errors.push(ConfigError::new("forecast.lags", "lags must be distinct"));
        }
        if let Some(max_lag) = f.lags.iter().copied().max() {
            if max_lag > h.length {
                errors.push(ConfigError::new(
                    "history.length",
                    format!("must be >= largest lag ({max_lag}), got {}", h.length),
                ));
            }
        }
        if ForecastModel::from_name(&f.model).is_none() {
            errors.push(ConfigError::new(
                "forecast.model",
                format!(
                    "must be one of {}, got \"{}\"",
                    ForecastModel::NAMES.join(", "),
                    f.model
                ),
            ));
        }

        errors
    }
}
