//! Final result record for a service run

use crate::types::{DesiredService, ObservedService, RunState, ServiceReport, ServiceStatus};

/// Build the report from the final observation.
///
/// Under dry run nothing was mutated, so the observation is the initial one
/// and the reported state is what the run would have produced: started and
/// restarted report running, stopped reports stopped, reloaded keeps the
/// observed state. Registration follows the request when one was given.
pub fn build(
    name: &str,
    observed: &ObservedService,
    desired: &DesiredService,
    changed: bool,
    dry_run: bool,
) -> ServiceReport {
    let (running, enabled) = if dry_run {
        let running = match desired.state {
            RunState::Started | RunState::Restarted => true,
            RunState::Stopped => false,
            RunState::Reloaded => observed.running,
        };
        (running, desired.enabled.unwrap_or(observed.enabled))
    } else {
        (observed.running, observed.enabled)
    };

    ServiceReport {
        service: name.to_string(),
        state: ServiceStatus::from(running),
        enabled,
        changed,
    }
}
