//! Per-step feature recording for recursive multi-step forecasting.

pub mod config;
pub mod error;
/// Recursive forecasting driver, lag features, models, and synthetic history.
pub mod forecast;
pub mod frame;
/// CSV import and export of feature frames.
pub mod io;
/// Feature recorder, per-step hooks, and the shared recorder handle.
pub mod recorder;

pub use error::{ConfigError, ExportError, ForecastError, FrameError};
pub use frame::{FeatureFrame, SchemaPolicy};
pub use recorder::{FeatureRecorder, SharedFeatureRecorder, StepHook};
