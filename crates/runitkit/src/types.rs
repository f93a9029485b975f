//! Core types for runit service reconciliation.

use crate::layout::ServiceLayout;
use declarative::Privilege;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Requested run state of a service.
///
/// `Restarted` and `Reloaded` are transitions rather than stable states:
/// they always require an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunState {
    /// Service should be up
    #[default]
    Started,
    /// Service should be down
    Stopped,
    /// Service should be restarted unconditionally
    Restarted,
    /// Service should be sent a reload (HUP) unconditionally
    Reloaded,
}

impl std::fmt::Display for RunState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            RunState::Started => "started",
            RunState::Stopped => "stopped",
            RunState::Restarted => "restarted",
            RunState::Reloaded => "reloaded",
        };
        f.write_str(s)
    }
}

/// Desired state of a service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DesiredService {
    /// Run-state dimension
    pub state: RunState,
    /// Enable/disable dimension; `None` leaves registration untouched
    pub enabled: Option<bool>,
}

/// Point-in-time facts about a service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ObservedService {
    /// Supervisor reports the service up
    pub running: bool,
    /// Registration link is present
    pub enabled: bool,
}

/// Whose service is being managed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Scope {
    /// System-wide service under the service directory
    #[default]
    System,
    /// Per-user service living in the user's home
    User {
        /// Owning account
        name: String,
        /// Home directory of the owning account
        home: PathBuf,
    },
}

impl Scope {
    /// Resolve a scope from an optional user name.
    ///
    /// The user's home directory is read from the passwd database.
    pub fn lookup(user: Option<&str>) -> crate::Result<Self> {
        let Some(name) = user else {
            return Ok(Scope::System);
        };

        match nix::unistd::User::from_name(name) {
            Ok(Some(entry)) => Ok(Scope::User {
                name: name.to_string(),
                home: entry.dir,
            }),
            Ok(None) => Err(crate::Error::UnknownUser {
                user: name.to_string(),
            }),
            Err(e) => {
                log::debug!("passwd lookup for {name} failed: {e}");
                Err(crate::Error::UnknownUser {
                    user: name.to_string(),
                })
            }
        }
    }

    /// Principal commands for this scope run as.
    pub fn privilege(&self) -> Privilege {
        match self {
            Scope::System => Privilege::Current,
            Scope::User { name, .. } => Privilege::User(name.clone()),
        }
    }
}

/// A service resolved to a single definition directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManagedService {
    /// Service name
    pub name: String,
    /// Owning scope
    pub scope: Scope,
    /// Service definition directory (contains `run`)
    pub definition: PathBuf,
    /// Registration link that marks the service enabled
    pub link: PathBuf,
}

/// Everything needed for one reconciliation run.
#[derive(Debug, Clone)]
pub struct ServiceRequest {
    /// Service name
    pub name: String,
    /// System or per-user
    pub scope: Scope,
    /// Target state
    pub desired: DesiredService,
    /// Where definitions and links live
    pub layout: ServiceLayout,
    /// Advisory wait limit handed to `sv -w`
    pub timeout: Duration,
    /// Plan and report without touching the system
    pub dry_run: bool,
}

impl ServiceRequest {
    /// Request a system service with default layout and timeout.
    pub fn new(name: impl Into<String>, desired: DesiredService) -> Self {
        Self {
            name: name.into(),
            scope: Scope::System,
            desired,
            layout: ServiceLayout::default(),
            timeout: DEFAULT_TIMEOUT,
            dry_run: false,
        }
    }

    pub fn with_scope(mut self, scope: Scope) -> Self {
        self.scope = scope;
        self
    }

    pub fn with_layout(mut self, layout: ServiceLayout) -> Self {
        self.layout = layout;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }
}

/// Default advisory timeout for supervisor operations.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Reported run state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceStatus {
    Running,
    Stopped,
}

impl From<bool> for ServiceStatus {
    fn from(running: bool) -> Self {
        if running {
            ServiceStatus::Running
        } else {
            ServiceStatus::Stopped
        }
    }
}

impl std::fmt::Display for ServiceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ServiceStatus::Running => f.write_str("running"),
            ServiceStatus::Stopped => f.write_str("stopped"),
        }
    }
}

/// Final result of a service reconciliation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceReport {
    /// Service name
    pub service: String,
    /// Final run state
    pub state: ServiceStatus,
    /// Final registration state
    pub enabled: bool,
    /// Whether any action ran (or would have, under dry run)
    pub changed: bool,
}
