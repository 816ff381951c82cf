//! Monotonic progress reporting across engine stages
//!
//! Progress is delivered as a percentage in the range 0 to 100: source
//! analysis fills the first 30%, compositing the remainder. Reported values
//! never decrease within one run, and callbacks are fire-and-forget — the
//! engine does not wait on the observer before continuing.

use crate::io::configuration::ANALYSIS_PROGRESS_SHARE;

/// Maps per-stage completion fractions into one non-decreasing percentage
pub struct ProgressReporter {
    observer: Option<Box<dyn FnMut(f64)>>,
    last: f64,
}

impl ProgressReporter {
    /// Create a reporter that forwards every value to `observer`
    pub fn new(observer: impl FnMut(f64) + 'static) -> Self {
        Self {
            observer: Some(Box::new(observer)),
            last: 0.0,
        }
    }

    /// Create a reporter that tracks progress without forwarding it
    pub const fn disabled() -> Self {
        Self {
            observer: None,
            last: 0.0,
        }
    }

    /// Record that `analyzed` of `total` sources have been fingerprinted
    pub fn source_analyzed(&mut self, analyzed: usize, total: usize) {
        let fraction = if total == 0 {
            1.0
        } else {
            analyzed as f64 / total as f64
        };
        self.report(fraction * ANALYSIS_PROGRESS_SHARE);
    }

    /// Record that `completed` of `total` tile rows have been painted
    pub fn rows_composited(&mut self, completed: usize, total: usize) {
        let fraction = if total == 0 {
            1.0
        } else {
            completed as f64 / total as f64
        };
        self.report(fraction.mul_add(100.0 - ANALYSIS_PROGRESS_SHARE, ANALYSIS_PROGRESS_SHARE));
    }

    /// Mark the run finished
    pub fn complete(&mut self) {
        self.report(100.0);
    }

    /// The most recent value delivered, 0.0 before any report
    pub const fn last_reported(&self) -> f64 {
        self.last
    }

    fn report(&mut self, value: f64) {
        // Clamped to the reporting range and never below an earlier value
        let bounded = value.clamp(0.0, 100.0).max(self.last);
        self.last = bounded;
        if let Some(observer) = self.observer.as_mut() {
            observer(bounded);
        }
    }
}
