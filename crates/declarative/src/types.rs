//! Core types shared by every agent

use std::process::Output;
use std::time::Duration;

/// Captured result of one external process
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code, `-1` when the process was terminated by a signal
    pub code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl From<Output> for CommandOutput {
    fn from(output: Output) -> Self {
        Self {
            code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        }
    }
}

impl CommandOutput {
    /// Build an output by hand (fake runners, tests)
    pub fn new(code: i32, stdout: impl Into<String>, stderr: impl Into<String>) -> Self {
        Self {
            code,
            stdout: stdout.into(),
            stderr: stderr.into(),
        }
    }

    /// Shorthand for a successful, silent command
    pub fn ok() -> Self {
        Self::new(0, "", "")
    }

    /// Whether the process exited with status 0
    pub fn success(&self) -> bool {
        self.code == 0
    }
}

/// What happened to a single planned action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The action ran against the system
    Applied,
    /// Dry run: the action was recorded but nothing was issued
    WouldApply,
}

/// One entry of the execution log
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionRecord {
    pub id: String,
    pub kind: &'static str,
    pub outcome: Outcome,
}

/// Summary of an executed (or simulated) plan
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecuteSummary {
    pub records: Vec<ActionRecord>,
}

impl ExecuteSummary {
    /// True iff at least one action ran or would have run
    pub fn changed(&self) -> bool {
        !self.records.is_empty()
    }

    /// Number of actions that actually touched the system
    pub fn applied(&self) -> usize {
        self.records
            .iter()
            .filter(|r| r.outcome == Outcome::Applied)
            .count()
    }

    /// Number of actions recorded under dry run
    pub fn simulated(&self) -> usize {
        self.records
            .iter()
            .filter(|r| r.outcome == Outcome::WouldApply)
            .count()
    }

    /// Ids of every recorded action, in plan order
    pub fn ids(&self) -> Vec<&str> {
        self.records.iter().map(|r| r.id.as_str()).collect()
    }
}

/// Grace period after actions that change supervisor state
pub const DEFAULT_GRACE: Duration = Duration::from_secs(1);

/// Options for execution
#[derive(Debug, Clone)]
pub struct ExecuteOptions {
    /// Don't make changes, just record what would happen
    pub dry_run: bool,
    /// Pause after settling actions so asynchronous supervisors catch up
    pub grace: Duration,
}

impl Default for ExecuteOptions {
    fn default() -> Self {
        Self {
            dry_run: false,
            grace: DEFAULT_GRACE,
        }
    }
}

impl ExecuteOptions {
    pub fn new(dry_run: bool) -> Self {
        Self {
            dry_run,
            ..Self::default()
        }
    }

    pub fn with_grace(mut self, grace: Duration) -> Self {
        self.grace = grace;
        self
    }
}
