//! Stage progress for a pipeline run.
//!
//! [`run`](crate::run) reports one unit per stage through a
//! [`ProgressCallback`]. The binary draws it as a terminal bar; library
//! callers and tests pass [`null_progress`] and see nothing.

use std::sync::Arc;

/// Receives stage updates from [`run`](crate::run).
///
/// Shared as `Arc<dyn ProgressCallback>`, hence `Send + Sync`.
pub trait ProgressCallback: Send + Sync {
    /// Number of stages the run will report.
    fn set_total(&self, total: u64);

    /// Marks `delta` more stages as done.
    fn inc(&self, delta: u64);

    /// Names the stage now running.
    fn set_message(&self, msg: String);

    /// Called once after the last stage with a one-line result.
    fn finish(&self, msg: String);
}

/// Discards every update.
pub struct NullProgress;

impl ProgressCallback for NullProgress {
    fn set_total(&self, _total: u64) {}
    fn inc(&self, _delta: u64) {}
    fn set_message(&self, _msg: String) {}
    fn finish(&self, _msg: String) {}
}

/// A [`NullProgress`] ready to hand to [`run`](crate::run).
#[must_use]
pub fn null_progress() -> Arc<dyn ProgressCallback> {
    Arc::new(NullProgress)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_progress_accepts_a_full_run() {
        let progress = null_progress();
        progress.set_total(crate::RUN_STEPS);
        progress.set_message("Resolving counties".to_string());
        progress.inc(crate::RUN_STEPS);
        progress.finish("done".to_string());
    }
}
