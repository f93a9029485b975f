//! Pure diff of observed against desired service state

use crate::types::{DesiredService, ObservedService, RunState};

/// One planned operation on a service
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceAction {
    Enable,
    Disable,
    Start,
    Stop,
    Restart,
    Reload,
}

impl ServiceAction {
    pub fn as_str(self) -> &'static str {
        match self {
            ServiceAction::Enable => "enable",
            ServiceAction::Disable => "disable",
            ServiceAction::Start => "start",
            ServiceAction::Stop => "stop",
            ServiceAction::Restart => "restart",
            ServiceAction::Reload => "reload",
        }
    }

    /// The `sv` subcommand for run-state actions; `None` for link actions
    pub fn sv_command(self) -> Option<&'static str> {
        match self {
            ServiceAction::Enable | ServiceAction::Disable => None,
            other => Some(other.as_str()),
        }
    }

    /// Supervisor state changes asynchronously after these
    pub fn settles(self) -> bool {
        matches!(
            self,
            ServiceAction::Start | ServiceAction::Stop | ServiceAction::Restart
        )
    }
}

impl std::fmt::Display for ServiceAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Compute the ordered actions that take `observed` to `desired`.
///
/// Registration changes always come before run-state changes.
pub fn plan(observed: &ObservedService, desired: &DesiredService) -> Vec<ServiceAction> {
    let mut actions = Vec::with_capacity(2);

    match desired.enabled {
        Some(true) if !observed.enabled => actions.push(ServiceAction::Enable),
        Some(false) if observed.enabled => actions.push(ServiceAction::Disable),
        _ => {}
    }

    match desired.state {
        RunState::Started if !observed.running => actions.push(ServiceAction::Start),
        RunState::Stopped if observed.running => actions.push(ServiceAction::Stop),
        RunState::Restarted => actions.push(ServiceAction::Restart),
        RunState::Reloaded => actions.push(ServiceAction::Reload),
        _ => {}
    }

    actions
}
