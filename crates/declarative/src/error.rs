//! Errors raised by the command runner.

use thiserror::Error;

/// Errors that can occur while running an external command.
#[derive(Debug, Error)]
pub enum Error {
    /// The process could not be spawned at all (missing binary, permissions)
    #[error("failed to execute {command}: {source}")]
    Spawn {
        /// Rendered command line
        command: String,
        /// Underlying OS error
        #[source]
        source: std::io::Error,
    },

    /// A command whose success was required exited nonzero
    #[error("command failed with exit code {code}: {command}: {}", stderr.trim())]
    CommandFailed {
        /// Rendered command line
        command: String,
        /// Exit code (-1 when terminated by a signal)
        code: i32,
        /// Captured standard error
        stderr: String,
    },

    /// The runner was handed an empty argv
    #[error("refusing to run an empty command")]
    EmptyCommand,
}

impl Error {
    /// Best human-readable detail for wrapping into an action-specific error.
    ///
    /// For failed commands this is the captured stderr (or the exit code when
    /// the tool printed nothing); otherwise the error's own message.
    pub fn detail(&self) -> String {
        match self {
            Error::CommandFailed { stderr, code, .. } if stderr.trim().is_empty() => {
                format!("exit code {code}")
            }
            Error::CommandFailed { stderr, .. } => stderr.trim().to_string(),
            other => other.to_string(),
        }
    }
}

/// Result type for runner operations.
pub type Result<T> = std::result::Result<T, Error>;
