//! Per-step feature recording for recursive forecasting runs.

pub mod hook;
pub mod shared;

use std::sync::Arc;

use tracing::{debug, trace};

use crate::error::FrameError;
use crate::frame::{FeatureFrame, SchemaPolicy};

pub use hook::{FnHook, HookChain, StepHook};
pub use shared::SharedFeatureRecorder;

/// Records the feature batch seen at every forecasting step.
///
/// Batches are stored as shared handles in call order and never copied or
/// modified. [`FeatureRecorder::get_features`] concatenates them on every
/// call, so it always reflects exactly the batches recorded so far.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use feature_recorder::frame::FeatureFrame;
/// use feature_recorder::recorder::FeatureRecorder;
///
/// let mut recorder = FeatureRecorder::new();
/// let batch = Arc::new(FeatureFrame::from_rows(&["t", "x"], &[vec![1.0, 10.0]]).unwrap());
/// let out = recorder.record(Arc::clone(&batch));
/// assert!(Arc::ptr_eq(&batch, &out));
/// assert_eq!(recorder.get_features().unwrap().n_rows(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct FeatureRecorder {
    inputs: Vec<Arc<FeatureFrame>>,
    policy: SchemaPolicy,
}

impl FeatureRecorder {
    /// Creates an empty recorder with [`SchemaPolicy::Strict`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty recorder with the given schema policy.
    pub fn with_policy(policy: SchemaPolicy) -> Self {
        Self {
            inputs: Vec::new(),
            policy,
        }
    }

    /// Stores `batch` and hands the same batch back unchanged.
    pub fn record(&mut self, batch: Arc<FeatureFrame>) -> Arc<FeatureFrame> {
        self.inputs.push(Arc::clone(&batch));
        trace!(
            batch = self.inputs.len() - 1,
            rows = batch.n_rows(),
            cols = batch.n_cols(),
            "recorded feature batch"
        );
        batch
    }

    /// Returns every recorded batch concatenated along the row axis.
    ///
    /// Returns an empty frame when nothing has been recorded.
    ///
    /// # Errors
    ///
    /// Returns `FrameError::SchemaMismatch` under [`SchemaPolicy::Strict`]
    /// when a batch's columns differ from the first batch's.
    pub fn get_features(&self) -> Result<FeatureFrame, FrameError> {
        let combined = FeatureFrame::concat(self.inputs.iter().map(Arc::as_ref), self.policy)?;
        debug!(
            batches = self.inputs.len(),
            rows = combined.n_rows(),
            cols = combined.n_cols(),
            policy = self.policy.as_str(),
            "combined recorded features"
        );
        Ok(combined)
    }

    /// Number of recorded batches.
    pub fn len(&self) -> usize {
        self.inputs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inputs.is_empty()
    }

    /// Recorded batches in call order.
    pub fn batches(&self) -> &[Arc<FeatureFrame>] {
        &self.inputs
    }

    pub fn policy(&self) -> SchemaPolicy {
        self.policy
    }
}

impl StepHook for FeatureRecorder {
    fn on_step(&mut self, _step: usize, batch: Arc<FeatureFrame>) -> Arc<FeatureFrame> {
        self.record(batch)
    }

    fn name(&self) -> &'static str {
        "FeatureRecorder"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tx(rows: &[(f64, f64)]) -> Arc<FeatureFrame> {
        let rows: Vec<Vec<f64>> = rows.iter().map(|(t, x)| vec![*t, *x]).collect();
        Arc::new(FeatureFrame::from_rows(&["t", "x"], &rows).expect("valid rows"))
    }

    #[test]
    fn fresh_recorder_returns_empty_frame() {
        let recorder = FeatureRecorder::new();
        assert!(recorder.is_empty());
        let features = recorder.get_features().expect("empty query succeeds");
        assert_eq!(features, FeatureFrame::empty());
    }

    #[test]
    fn record_returns_same_handle_and_grows_by_one() {
        let mut recorder = FeatureRecorder::new();
        let batch = tx(&[(1.0, 10.0)]);
        let out = recorder.record(Arc::clone(&batch));
        assert!(Arc::ptr_eq(&batch, &out));
        assert_eq!(recorder.len(), 1);
        assert!(Arc::ptr_eq(&recorder.batches()[0], &batch));
    }

    #[test]
    fn record_shares_rather_than_copies() {
        let mut recorder = FeatureRecorder::new();
        let batch = tx(&[(1.0, 10.0)]);
        recorder.record(Arc::clone(&batch));
        // caller handle + recorder handle
        assert_eq!(Arc::strong_count(&batch), 2);
    }

    #[test]
    fn get_features_concatenates_in_call_order() {
        let mut recorder = FeatureRecorder::new();
        recorder.record(tx(&[(1.0, 10.0), (2.0, 11.0)]));
        recorder.record(tx(&[(3.0, 12.0), (4.0, 13.0), (5.0, 14.0)]));

        let features = recorder.get_features().expect("same schema");
        let rows: Vec<Vec<f64>> = features.rows().collect();
        assert_eq!(
            rows,
            vec![
                vec![1.0, 10.0],
                vec![2.0, 11.0],
                vec![3.0, 12.0],
                vec![4.0, 13.0],
                vec![5.0, 14.0],
            ]
        );
    }

    #[test]
    fn get_features_is_repeatable() {
        let mut recorder = FeatureRecorder::new();
        recorder.record(tx(&[(1.0, 10.0)]));
        let first = recorder.get_features().expect("first query");
        let second = recorder.get_features().expect("second query");
        assert_eq!(first, second);
    }

    #[test]
    fn strict_recorder_surfaces_schema_mismatch() {
        let mut recorder = FeatureRecorder::new();
        recorder.record(tx(&[(1.0, 10.0)]));
        let other = FeatureFrame::from_rows(&["t", "y"], &[vec![2.0, 5.0]]).expect("valid rows");
        recorder.record(Arc::new(other));

        let err = recorder.get_features();
        assert!(matches!(err, Err(FrameError::SchemaMismatch { batch: 1, .. })));
        // recording still succeeded for both batches
        assert_eq!(recorder.len(), 2);
    }

    #[test]
    fn union_recorder_fills_gaps() {
        let mut recorder = FeatureRecorder::with_policy(SchemaPolicy::Union);
        recorder.record(tx(&[(1.0, 10.0)]));
        let other = FeatureFrame::from_rows(&["t", "y"], &[vec![2.0, 5.0]]).expect("valid rows");
        recorder.record(Arc::new(other));

        let features = recorder.get_features().expect("union never fails");
        assert_eq!(features.n_cols(), 3);
        assert_eq!(features.n_rows(), 2);
        assert!(features.column("y").is_some_and(|y| y[0].is_nan()));
    }

    #[test]
    fn recorder_acts_as_step_hook() {
        let mut recorder = FeatureRecorder::new();
        let batch = tx(&[(1.0, 10.0)]);
        let out = recorder.on_step(0, Arc::clone(&batch));
        assert!(Arc::ptr_eq(&batch, &out));
        assert_eq!(recorder.name(), "FeatureRecorder");
    }
}
