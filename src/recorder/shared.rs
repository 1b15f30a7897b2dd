//! Cloneable, lock-protected recorder handle.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::debug;

use super::{FeatureRecorder, StepHook};
use crate::error::FrameError;
use crate::frame::{FeatureFrame, SchemaPolicy};

/// A [`FeatureRecorder`] behind a mutex, shareable across owners and threads.
///
/// Clones share one underlying recorder: one clone can be handed to a
/// forecasting loop while another is kept for querying. Appends happen
/// under the lock; queries snapshot the recorded handles under the lock
/// and concatenate outside it.
#[derive(Debug, Clone, Default)]
pub struct SharedFeatureRecorder {
    inner: Arc<Mutex<FeatureRecorder>>,
}

impl SharedFeatureRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(policy: SchemaPolicy) -> Self {
        Self {
            inner: Arc::new(Mutex::new(FeatureRecorder::with_policy(policy))),
        }
    }

    /// Stores `batch` and hands the same batch back unchanged.
    pub fn record(&self, batch: Arc<FeatureFrame>) -> Arc<FeatureFrame> {
        self.lock().record(batch)
    }

    /// Returns every recorded batch concatenated along the row axis.
    ///
    /// # Errors
    ///
    /// Same as [`FeatureRecorder::get_features`].
    pub fn get_features(&self) -> Result<FeatureFrame, FrameError> {
        let (snapshot, policy) = {
            let guard = self.lock();
            (guard.batches().to_vec(), guard.policy())
        };
        let combined = FeatureFrame::concat(snapshot.iter().map(Arc::as_ref), policy)?;
        debug!(
            batches = snapshot.len(),
            rows = combined.n_rows(),
            "combined shared recorder snapshot"
        );
        Ok(combined)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    // Appends are a single push, so a poisoned guard still holds a consistent list.
    fn lock(&self) -> MutexGuard<'_, FeatureRecorder> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl StepHook for SharedFeatureRecorder {
    fn on_step(&mut self, _step: usize, batch: Arc<FeatureFrame>) -> Arc<FeatureFrame> {
        self.record(batch)
    }

    fn name(&self) -> &'static str {
        "SharedFeatureRecorder"
    }
}
