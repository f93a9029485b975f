//! Execution progress for converge CLI.
//!
//! Progress goes to the log (stderr) so stdout carries only the result record.

use declarative::{Outcome, ProgressCallback};

/// Logs each action as the executor reaches it
#[derive(Debug, Default)]
pub struct LogProgress {
    done: usize,
    total: usize,
}

impl ProgressCallback for LogProgress {
    fn on_plan_start(&mut self, count: usize, dry_run: bool) {
        self.total = count;
        if dry_run {
            log::info!("check mode: {count} action(s) would run");
        } else {
            log::info!("running {count} action(s)");
        }
    }

    fn on_action_start(&mut self, _id: &str, description: &str) {
        log::debug!("[{}/{}] {description}", self.done + 1, self.total);
    }

    fn on_action_complete(&mut self, id: &str, outcome: Outcome) {
        self.done += 1;
        match outcome {
            Outcome::Applied => log::info!("[{}/{}] {id}: done", self.done, self.total),
            Outcome::WouldApply => log::info!("[{}/{}] {id}: would change", self.done, self.total),
        }
    }

    fn on_action_failed(&mut self, id: &str, error: &str) {
        log::error!("[{}/{}] {id}: {error}", self.done + 1, self.total);
    }
}
