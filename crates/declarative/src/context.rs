//! Apply context and progress callbacks
//!
//! These keep the pipeline free of any particular process runner or UI.

use crate::runner::CommandRunner;
use crate::types::Outcome;

/// Progress callback for execution operations
///
/// Implement this trait to receive progress updates during execution.
pub trait ProgressCallback {
    /// Called once before the first action, with the plan size
    fn on_plan_start(&mut self, count: usize, dry_run: bool);

    /// Called when starting a single action
    fn on_action_start(&mut self, id: &str, description: &str);

    /// Called when an action completes without error
    fn on_action_complete(&mut self, id: &str, outcome: Outcome);

    /// Called when an action fails; execution stops right after
    fn on_action_failed(&mut self, id: &str, error: &str);
}

/// No-op progress callback
pub struct NoProgress;

impl ProgressCallback for NoProgress {
    fn on_plan_start(&mut self, _count: usize, _dry_run: bool) {}
    fn on_action_start(&mut self, _id: &str, _description: &str) {}
    fn on_action_complete(&mut self, _id: &str, _outcome: Outcome) {}
    fn on_action_failed(&mut self, _id: &str, _error: &str) {}
}

/// Context passed to action apply operations
pub struct ApplyContext<'a> {
    /// Runner every external command goes through
    pub runner: &'a dyn CommandRunner,
}

impl<'a> ApplyContext<'a> {
    pub fn new(runner: &'a dyn CommandRunner) -> Self {
        Self { runner }
    }
}
