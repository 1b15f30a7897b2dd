//! Per-step hook contract and composition.

use std::fmt;
use std::sync::Arc;

use crate::frame::FeatureFrame;

/// A callback invoked once per generated forecasting step.
///
/// The hook receives the step's feature batch and returns the batch the
/// model should predict from. Pass-through hooks return their input.
pub trait StepHook {
    /// Handles the feature batch for step `step`.
    ///
    /// # Arguments
    ///
    /// * `step` - Zero-based index of the generated timestep
    /// * `batch` - Features for this step, one row per series
    ///
    /// # Returns
    ///
    /// The batch handed on to the next hook (or to the model).
    fn on_step(&mut self, step: usize, batch: Arc<FeatureFrame>) -> Arc<FeatureFrame>;

    /// Returns a human-readable name for the hook.
    fn name(&self) -> &'static str;
}

impl<H: StepHook + ?Sized> StepHook for &mut H {
    fn on_step(&mut self, step: usize, batch: Arc<FeatureFrame>) -> Arc<FeatureFrame> {
        (**self).on_step(step, batch)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

/// Adapts a closure into a [`StepHook`].
pub struct FnHook<F> {
    name: &'static str,
    f: F,
}

impl<F> FnHook<F>
where
    F: FnMut(usize, Arc<FeatureFrame>) -> Arc<FeatureFrame>,
{
    pub fn new(name: &'static str, f: F) -> Self {
        Self { name, f }
    }
}

impl<F> StepHook for FnHook<F>
where
    F: FnMut(usize, Arc<FeatureFrame>) -> Arc<FeatureFrame>,
{
    fn on_step(&mut self, step: usize, batch: Arc<FeatureFrame>) -> Arc<FeatureFrame> {
        (self.f)(step, batch)
    }

    fn name(&self) -> &'static str {
        self.name
    }
}

/// An ordered sequence of hooks applied one after another.
///
/// Each hook receives the previous hook's output. An empty chain returns
/// its input unchanged. Hooks can be borrowed (`&mut recorder`) so the
/// caller can still query them once the chain is dropped.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use feature_recorder::frame::FeatureFrame;
/// use feature_recorder::recorder::{FeatureRecorder, HookChain, StepHook};
///
/// let mut recorder = FeatureRecorder::new();
/// {
///     let mut chain = HookChain::new();
///     chain.push(&mut recorder);
///     chain.on_step(0, Arc::new(FeatureFrame::empty()));
/// }
/// assert_eq!(recorder.len(), 1);
/// ```
#[derive(Default)]
pub struct HookChain<'a> {
    hooks: Vec<Box<dyn StepHook + 'a>>,
}

impl<'a> HookChain<'a> {
    pub fn new() -> Self {
        Self { hooks: Vec::new() }
    }

    /// Appends a hook to the end of the chain.
    pub fn push(&mut self, hook: impl StepHook + 'a) -> &mut Self {
        self.hooks.push(Box::new(hook));
        self
    }

    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }

    /// Hook names in application order.
    pub fn names(&self) -> Vec<&'static str> {
        self.hooks.iter().map(|h| h.name()).collect()
    }
}

impl StepHook for HookChain<'_> {
    fn on_step(&mut self, step: usize, batch: Arc<FeatureFrame>) -> Arc<FeatureFrame> {
        self.hooks
            .iter_mut()
            .fold(batch, |batch, hook| hook.on_step(step, batch))
    }

    fn name(&self) -> &'static str {
        "HookChain"
    }
}

impl fmt::Debug for HookChain<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HookChain")
            .field("hooks", &self.names())
            .finish()
    }
}
