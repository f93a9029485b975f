//! Error types for runit service reconciliation.
//!
//! Resolution errors ([`Error::ResourceNotFound`], [`Error::UnknownUser`],
//! [`Error::InvalidName`]) happen before anything is mutated and are the only
//! errors a dry run can produce. Action errors carry the service name and the
//! captured stderr of the command that failed.

use crate::planner::ServiceAction;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reconciling a runit service.
#[derive(Debug, Error)]
pub enum Error {
    /// Service name is empty or not a single path component
    #[error("invalid service name: {name:?}")]
    InvalidName {
        /// The rejected name
        name: String,
    },

    /// No service definition directory at the resolved location
    #[error("service {name} does not exist at {}", path.display())]
    ResourceNotFound {
        /// Service name
        name: String,
        /// Location that was checked
        path: PathBuf,
    },

    /// The owning user of a per-user service has no passwd entry
    #[error("unknown user: {user}")]
    UnknownUser {
        /// Requested user name
        user: String,
    },

    /// A required command failed outside of any planned action
    #[error(transparent)]
    Command(#[from] declarative::Error),

    /// Creating the registration link failed
    #[error("failed to enable service {name}: {stderr}")]
    EnableFailed {
        /// Service name
        name: String,
        /// Captured stderr or OS error
        stderr: String,
    },

    /// Removing the registration link failed
    #[error("failed to disable service {name}: {stderr}")]
    DisableFailed {
        /// Service name
        name: String,
        /// Captured stderr or OS error
        stderr: String,
    },

    /// `sv start` failed
    #[error("failed to start service {name}: {stderr}")]
    StartFailed {
        /// Service name
        name: String,
        /// Captured stderr
        stderr: String,
    },

    /// `sv stop` failed
    #[error("failed to stop service {name}: {stderr}")]
    StopFailed {
        /// Service name
        name: String,
        /// Captured stderr
        stderr: String,
    },

    /// `sv restart` failed
    #[error("failed to restart service {name}: {stderr}")]
    RestartFailed {
        /// Service name
        name: String,
        /// Captured stderr
        stderr: String,
    },

    /// `sv reload` failed
    #[error("failed to reload service {name}: {stderr}")]
    ReloadFailed {
        /// Service name
        name: String,
        /// Captured stderr
        stderr: String,
    },
}

impl Error {
    /// Build the action-specific failure for `action` on service `name`.
    pub fn action_failed(action: ServiceAction, name: &str, stderr: impl Into<String>) -> Self {
        let name = name.to_string();
        let stderr = stderr.into();
        match action {
            ServiceAction::Enable => Error::EnableFailed { name, stderr },
            ServiceAction::Disable => Error::DisableFailed { name, stderr },
            ServiceAction::Start => Error::StartFailed { name, stderr },
            ServiceAction::Stop => Error::StopFailed { name, stderr },
            ServiceAction::Restart => Error::RestartFailed { name, stderr },
            ServiceAction::Reload => Error::ReloadFailed { name, stderr },
        }
    }

    /// Whether this error was raised before any mutation was attempted.
    pub fn is_resolution(&self) -> bool {
        matches!(
            self,
            Error::InvalidName { .. } | Error::ResourceNotFound { .. } | Error::UnknownUser { .. }
        )
    }
}

/// Result type for service operations.
pub type Result<T> = std::result::Result<T, Error>;
