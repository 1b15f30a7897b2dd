//! Models that turn one step's features into one prediction per series.

use super::features::lag_column;
use crate::error::ForecastError;
use crate::frame::FeatureFrame;

/// A one-step-ahead model evaluated on a step's feature frame.
pub trait Model {
    /// Predicts one value per row of `features`.
    ///
    /// # Errors
    ///
    /// Returns `ForecastError::MissingFeature` when a required column is absent.
    fn predict(&self, features: &FeatureFrame) -> Result<Vec<f64>, ForecastError>;

    /// Returns a human-readable model name.
    fn name(&self) -> &'static str;
}

/// Naive "next is last" model: predicts `lag1`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LastValueModel;

impl Model for LastValueModel {
    fn predict(&self, features: &FeatureFrame) -> Result<Vec<f64>, ForecastError> {
        let name = lag_column(1);
        features
            .column(&name)
            .map(<[f64]>::to_vec)
            .ok_or(ForecastError::MissingFeature(name))
    }

    fn name(&self) -> &'static str {
        "last_value"
    }
}

/// Predicts the mean of every `lag*` column in the row.
#[derive(Debug, Default, Clone, Copy)]
pub struct LagMeanModel;

impl Model for LagMeanModel {
    fn predict(&self, features: &FeatureFrame) -> Result<Vec<f64>, ForecastError> {
        let lags: Vec<&[f64]> = features
            .columns()
            .filter(|(name, _)| is_lag_column(name))
            .map(|(_, values)| values)
            .collect();
        if lags.is_empty() {
            return Err(ForecastError::MissingFeature("lag*".to_string()));
        }

        let k = lags.len() as f64;
        Ok((0..features.n_rows())
            .map(|row| lags.iter().map(|col| col[row]).sum::<f64>() / k)
            .collect())
    }

    fn name(&self) -> &'static str {
        "lag_mean"
    }
}

fn is_lag_column(name: &str) -> bool {
    name.strip_prefix("lag")
        .is_some_and(|rest| !rest.is_empty() && rest.bytes().all(|b| b.is_ascii_digit()))
}

/// Model selected by name at run time.
#[derive(Debug, Clone, Copy)]
pub enum ForecastModel {
    LastValue(LastValueModel),
    LagMean(LagMeanModel),
}

impl ForecastModel {
    /// Available model names.
    pub const NAMES: &[&str] = &["last_value", "lag_mean"];

    /// Looks a model up by name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "last_value" => Some(Self::LastValue(LastValueModel)),
            "lag_mean" => Some(Self::LagMean(LagMeanModel)),
            _ => None,
        }
    }
}

impl Model for ForecastModel {
    fn predict(&self, features: &FeatureFrame) -> Result<Vec<f64>, ForecastError> {
        match self {
            Self::LastValue(m) => m.predict(features),
            Self::LagMean(m) => m.predict(features),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Self::LastValue(m) => m.name(),
            Self::LagMean(m) => m.name(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn features() -> FeatureFrame {
        FeatureFrame::from_rows(
            &["series", "step", "lag1", "lag2"],
            &[vec![0.0, 0.0, 4.0, 2.0], vec![1.0, 0.0, 10.0, 20.0]],
        )
        .expect("valid rows")
    }

    #[test]
    fn last_value_returns_lag1() {
        let preds = LastValueModel.predict(&features()).expect("lag1 present");
        assert_eq!(preds, vec![4.0, 10.0]);
    }

    #[test]
    fn last_value_requires_lag1() {
        let frame = FeatureFrame::from_rows(&["lag2"], &[vec![1.0]]).expect("valid rows");
        assert_eq!(
            LastValueModel.predict(&frame),
            Err(ForecastError::MissingFeature("lag1".into()))
        );
    }

    #[test]
    fn lag_mean_ignores_non_lag_columns() {
        let preds = LagMeanModel.predict(&features()).expect("lags present");
        assert_eq!(preds, vec![3.0, 15.0]);
    }

    #[test]
    fn lag_mean_requires_some_lag() {
        let frame = FeatureFrame::from_rows(&["step", "lagged"], &[vec![0.0, 1.0]]).expect("valid rows");
        assert!(matches!(
            LagMeanModel.predict(&frame),
            Err(ForecastError::MissingFeature(_))
        ));
    }

    #[test]
    fn models_resolve_by_name() {
        for name in ForecastModel::NAMES {
            let model = ForecastModel::from_name(name);
            assert_eq!(model.map(|m| m.name()), Some(*name));
        }
        assert!(ForecastModel::from_name("arima").is_none());
    }
}
