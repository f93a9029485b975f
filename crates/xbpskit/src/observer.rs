//! Package state lookups through `xbps-query`

use crate::error::Result;
use crate::info;
use crate::types::{ObservedPackage, PackageOptions, PackageState, QueryResult};
use declarative::{CommandRunner, argv};

/// Whether `name` is in the local package database.
pub fn is_installed(runner: &dyn CommandRunner, name: &str) -> Result<bool> {
    Ok(runner.probe(&argv!["xbps-query", name])?.success())
}

/// Whether a repository offers `name`.
///
/// A zero exit alone is not enough: the search must also print something.
pub fn is_available(
    runner: &dyn CommandRunner,
    name: &str,
    options: &PackageOptions,
) -> Result<bool> {
    let output = runner.probe(&with_repository(argv!["xbps-query"], options, ["-Rs", name]))?;
    Ok(output.success() && !output.stdout.trim().is_empty())
}

/// Repository metadata for `name`, or not found.
pub fn query(
    runner: &dyn CommandRunner,
    name: &str,
    options: &PackageOptions,
) -> Result<QueryResult> {
    let output = runner.probe(&with_repository(argv!["xbps-query"], options, ["-R", name]))?;
    if !output.success() {
        log::debug!("xbps-query -R {name} exited {}", output.code);
        return Ok(QueryResult::not_found());
    }
    Ok(QueryResult::from_info(info::parse(&output.stdout)))
}

/// Observe every requested package, in order.
///
/// Availability is only looked up for packages that would be installed from
/// the local index as it stands; with `update_cache` the index is synced by
/// the install itself, so a lookup beforehand would answer from stale data.
pub fn observe(
    runner: &dyn CommandRunner,
    names: &[String],
    state: PackageState,
    options: &PackageOptions,
) -> Result<Vec<ObservedPackage>> {
    names
        .iter()
        .map(|name| -> Result<ObservedPackage> {
            let installed = is_installed(runner, name)?;
            let lookup = state == PackageState::Present && !installed && !options.update_cache;
            let available = if lookup {
                Some(is_available(runner, name, options)?)
            } else {
                None
            };
            log::debug!("package {name}: installed={installed} available={available:?}");
            Ok(ObservedPackage {
                name: name.clone(),
                installed,
                available,
            })
        })
        .collect()
}

fn with_repository<'a>(
    mut argv: Vec<String>,
    options: &PackageOptions,
    rest: impl IntoIterator<Item = &'a str>,
) -> Vec<String> {
    argv.extend(options.repository_arg());
    argv.extend(rest.into_iter().map(String::from));
    argv
}
