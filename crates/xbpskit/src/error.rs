//! Error types for xbps package reconciliation.

use crate::planner::PackageAction;
use thiserror::Error;

/// Errors that can occur while reconciling packages.
///
/// Each variant includes the package it concerns and, for failed commands,
/// what the package manager printed.
#[derive(Debug, Error)]
pub enum Error {
    /// Package is neither installed nor available from any repository
    #[error("package {name} not found in any repository")]
    ResourceNotFound {
        /// Requested package
        name: String,
    },

    /// The request itself is malformed (empty name list, misplaced wildcard)
    #[error("invalid request: {reason}")]
    InvalidRequest {
        /// What is wrong with it
        reason: String,
    },

    /// A query command could not be run at all
    #[error(transparent)]
    Command(#[from] declarative::Error),

    /// `xbps-install` failed
    #[error("failed to install package {name}: {stderr}")]
    InstallFailed {
        /// Package name
        name: String,
        /// Captured stderr
        stderr: String,
    },

    /// `xbps-remove` failed
    #[error("failed to remove package {name}: {stderr}")]
    RemoveFailed {
        /// Package name
        name: String,
        /// Captured stderr
        stderr: String,
    },

    /// `xbps-install -u` failed
    #[error("failed to update package {name}: {stderr}")]
    UpgradeFailed {
        /// Package name (`*` for a full system upgrade)
        name: String,
        /// Captured stderr
        stderr: String,
    },
}

impl Error {
    /// Build the action-specific failure for `action` on package `name`.
    pub fn action_failed(action: PackageAction, name: &str, stderr: impl Into<String>) -> Self {
        let name = name.to_string();
        let stderr = stderr.into();
        match action {
            PackageAction::Install => Error::InstallFailed { name, stderr },
            PackageAction::Remove => Error::RemoveFailed { name, stderr },
            PackageAction::Upgrade | PackageAction::UpgradeAll => {
                Error::UpgradeFailed { name, stderr }
            }
        }
    }

    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        Error::InvalidRequest {
            reason: reason.into(),
        }
    }

    /// Whether this error was raised before any mutation was attempted.
    pub fn is_resolution(&self) -> bool {
        matches!(
            self,
            Error::ResourceNotFound { .. } | Error::InvalidRequest { .. }
        )
    }
}

/// Result type for package operations.
pub type Result<T> = std::result::Result<T, Error>;
