//! Current-state detection for a resolved service

use crate::error::Result;
use crate::status::SvStatus;
use crate::types::{ManagedService, ObservedService};
use declarative::{CommandRunner, argv};
use std::path::Path;

/// Take a fresh snapshot of the service's running and enabled state.
pub fn observe(runner: &dyn CommandRunner, service: &ManagedService) -> Result<ObservedService> {
    let observed = ObservedService {
        running: is_running(runner, service)?,
        enabled: is_enabled(&service.link),
    };
    log::debug!(
        "service {}: running={} enabled={}",
        service.name,
        observed.running,
        observed.enabled
    );
    Ok(observed)
}

/// Whether the supervisor reports the service up.
///
/// A nonzero exit from `sv status` is a valid "not running" answer.
pub fn is_running(runner: &dyn CommandRunner, service: &ManagedService) -> Result<bool> {
    let argv = service
        .scope
        .privilege()
        .wrap(argv!["sv", "status", service.link.to_string_lossy()]);
    let output = runner.probe(&argv)?;

    if !output.success() {
        log::debug!(
            "sv status {} exited {}: {}",
            service.name,
            output.code,
            output.stderr.trim()
        );
        return Ok(false);
    }

    Ok(SvStatus::parse(&output.stdout).is_running())
}

/// Whether the registration link is present.
///
/// A dangling symlink still counts; a missing link means disabled.
pub fn is_enabled(link: &Path) -> bool {
    link.exists() || link.is_symlink()
}
