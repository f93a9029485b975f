//! Registration links - a service is enabled when its link exists
//!
//! System links are managed with native filesystem calls. Per-user links are
//! created through `sudo -u <user>` so they end up owned by that user.

use crate::error::{Error, Result};
use crate::planner::ServiceAction;
use crate::types::{ManagedService, Scope};
use declarative::{CommandRunner, argv};
use std::fs;
use std::io;
use std::path::Path;

/// Create or replace the registration link pointing at the definition.
pub fn enable(runner: &dyn CommandRunner, service: &ManagedService) -> Result<()> {
    let result = match service.scope {
        Scope::System => {
            enable_native(&service.definition, &service.link).map_err(|e| e.to_string())
        }
        Scope::User { .. } => enable_as_user(runner, service),
    };
    result.map_err(|stderr| Error::action_failed(ServiceAction::Enable, &service.name, stderr))
}

/// Remove the registration link; an absent link is already disabled.
pub fn disable(runner: &dyn CommandRunner, service: &ManagedService) -> Result<()> {
    if !crate::observer::is_enabled(&service.link) {
        return Ok(());
    }

    let result = match service.scope {
        Scope::System => disable_native(&service.link).map_err(|e| e.to_string()),
        Scope::User { .. } => {
            let argv = service
                .scope
                .privilege()
                .wrap(argv!["rm", "-f", service.link.to_string_lossy()]);
            runner.check(&argv).map(|_| ()).map_err(|e| e.detail())
        }
    };
    result.map_err(|stderr| Error::action_failed(ServiceAction::Disable, &service.name, stderr))
}

fn enable_native(definition: &Path, link: &Path) -> io::Result<()> {
    if let Some(parent) = link.parent() {
        fs::create_dir_all(parent)?;
    }

    // Force semantics: links and files are replaced, directories are not
    match fs::symlink_metadata(link) {
        Ok(meta) if meta.is_dir() => {
            return Err(io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!("{} is a directory", link.display()),
            ));
        }
        Ok(_) => fs::remove_file(link)?,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => return Err(e),
    }

    std::os::unix::fs::symlink(definition, link)
}

fn disable_native(link: &Path) -> io::Result<()> {
    match fs::remove_file(link) {
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        other => other,
    }
}

fn enable_as_user(
    runner: &dyn CommandRunner,
    service: &ManagedService,
) -> std::result::Result<(), String> {
    if fs::symlink_metadata(&service.link).is_ok_and(|meta| meta.is_dir()) {
        return Err(format!("{} is a directory", service.link.display()));
    }

    let privilege = service.scope.privilege();

    if let Some(parent) = service.link.parent()
        && !parent.exists()
    {
        runner
            .check(&privilege.wrap(argv!["mkdir", "-p", parent.to_string_lossy()]))
            .map_err(|e| e.detail())?;
    }

    runner
        .check(&privilege.wrap(argv![
            "ln",
            "-sfn",
            service.definition.to_string_lossy(),
            service.link.to_string_lossy(),
        ]))
        .map(|_| ())
        .map_err(|e| e.detail())
}
