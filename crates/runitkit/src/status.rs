//! Decoder for `sv status` output.
//!
//! All knowledge of the status line format lives here. Typical lines:
//!
//! ```text
//! run: sshd: (pid 1234) 5678s; run: log: (pid 1233) 5678s
//! run: sshd: (pid 1234) 12s, normally down, want down
//! down: sshd: 3s, normally up
//! finish: sshd: (pid 1234) 0s
//! fail: sshd: runsv not running
//! warning: sshd: unable to open supervise/ok: file does not exist
//! ```
//!
//! Only the segment before the first `;` describes the main service; the
//! rest is the log service.

use regex::Regex;
use std::sync::LazyLock;

/// Leading state label, e.g. `run:`; `ok: ` is emitted by `sv -v`
static LABEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:ok:\s+)?(run|down|finish|fail|warning|timeout|kill):\s*")
        .expect("valid label regex")
});

/// Up marker: the supervised process id
static PID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(pid (\d+)\)").expect("valid pid regex"));

/// Seconds in the current state
static UPTIME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:\)|:)\s+(\d+)s\b").expect("valid uptime regex"));

/// State label reported by sv
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SvState {
    Run,
    Down,
    Finish,
    Fail,
    Warning,
    Timeout,
    Kill,
    /// Output did not start with a known label
    Unknown,
}

impl SvState {
    fn from_label(label: &str) -> Self {
        match label {
            "run" => SvState::Run,
            "down" => SvState::Down,
            "finish" => SvState::Finish,
            "fail" => SvState::Fail,
            "warning" => SvState::Warning,
            "timeout" => SvState::Timeout,
            "kill" => SvState::Kill,
            _ => SvState::Unknown,
        }
    }
}

/// Decoded status of the main service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SvStatus {
    pub state: SvState,
    /// Process id, present while a process is supervised
    pub pid: Option<u32>,
    /// Seconds spent in the current state
    pub seconds: Option<u64>,
    /// `normally up` / `normally down` flag, when reported
    pub normally_up: Option<bool>,
    /// `want up` / `want down` flag, when reported
    pub want_up: Option<bool>,
}

impl SvStatus {
    /// Decode the first line of `sv status` stdout.
    pub fn parse(stdout: &str) -> Self {
        let line = stdout.lines().next().unwrap_or_default().trim();
        let main = line.split(';').next().unwrap_or_default();

        let Some(caps) = LABEL.captures(main) else {
            return Self::unknown();
        };

        let state = SvState::from_label(&caps[1]);
        let pid = PID
            .captures(main)
            .and_then(|c| c[1].parse::<u32>().ok());
        let seconds = UPTIME
            .captures(main)
            .and_then(|c| c[1].parse::<u64>().ok());

        Self {
            state,
            pid,
            seconds,
            normally_up: flag(main, "normally"),
            want_up: flag(main, "want"),
        }
    }

    fn unknown() -> Self {
        Self {
            state: SvState::Unknown,
            pid: None,
            seconds: None,
            normally_up: None,
            want_up: None,
        }
    }

    /// Running requires both the `run:` label and a supervised pid.
    pub fn is_running(&self) -> bool {
        self.state == SvState::Run && self.pid.is_some()
    }
}

/// Read `<word> up` / `<word> down` out of the comma-separated tail
fn flag(line: &str, word: &str) -> Option<bool> {
    line.split(',').map(str::trim).find_map(|part| {
        match part.strip_prefix(word)?.trim() {
            "up" => Some(true),
            "down" => Some(false),
            _ => None,
        }
    })
}
