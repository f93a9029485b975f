//! # xbpskit
//!
//! Idempotent package reconciliation for Void Linux's xbps.
//!
//! [`PackageAgent::reconcile`] checks each requested package against the
//! local package database, plans installs, removals or updates for the ones
//! that differ, and runs them one package at a time with `xbps-install` /
//! `xbps-remove`. The `query` state is read-only and returns repository
//! metadata instead.
//!
//! ## Example
//!
//! ```no_run
//! use declarative::SystemRunner;
//! use xbpskit::{PackageAgent, PackageRequest, PackageState};
//!
//! let request = PackageRequest::new(["vim", "git"], PackageState::Present);
//! let runner = SystemRunner;
//! let report = PackageAgent::new(&runner).reconcile(&request).expect("install packages");
//! println!("changed: {} {:?}", report.changed, report.packages);
//! ```

pub mod error;
pub mod info;
pub mod observer;
pub mod planner;
pub mod report;
pub mod step;
pub mod types;

#[cfg(test)]
mod testing;

pub use error::{Error, Result};
pub use planner::{PackageAction, PlannedPackage};
pub use types::{
    ObservedPackage, PackageOptions, PackageReport, PackageRequest, PackageState, QueryResult,
    QueryStatus, WILDCARD,
};

use declarative::{ApplyContext, CommandRunner, ExecuteOptions, NoProgress, Plan, ProgressCallback};
use std::collections::BTreeMap;
use std::time::Duration;
use step::PackageStep;

/// Drives a set of packages to their requested state.
pub struct PackageAgent<'a> {
    runner: &'a dyn CommandRunner,
}

impl<'a> PackageAgent<'a> {
    pub fn new(runner: &'a dyn CommandRunner) -> Self {
        Self { runner }
    }

    /// Reconcile without progress reporting.
    pub fn reconcile(&self, request: &PackageRequest) -> Result<PackageReport> {
        self.reconcile_with_progress(request, &mut NoProgress)
    }

    /// Reconcile, reporting each action to `progress`.
    pub fn reconcile_with_progress(
        &self,
        request: &PackageRequest,
        progress: &mut dyn ProgressCallback,
    ) -> Result<PackageReport> {
        validate(request)?;

        if request.state == PackageState::Query {
            return self.query(request);
        }

        let planned = if request.is_wildcard() {
            vec![PlannedPackage::upgrade_all()]
        } else {
            let observed =
                observer::observe(self.runner, &request.names, request.state, &request.options)?;
            planner::plan(&observed, request.state)?
        };

        let plan: Plan<PackageStep<'_>> = planned
            .into_iter()
            .map(|p| PackageStep::new(p, &request.options))
            .collect();
        log::info!(
            "packages ({}): {} action(s) planned",
            request.state,
            plan.len()
        );

        let opts = ExecuteOptions::new(request.dry_run).with_grace(Duration::ZERO);
        let ctx = ApplyContext::new(self.runner);
        let summary = declarative::execute(&plan, &opts, &ctx, progress)?;

        Ok(report::from_summary(&summary))
    }

    fn query(&self, request: &PackageRequest) -> Result<PackageReport> {
        let mut results = BTreeMap::new();
        for name in &request.names {
            let result = observer::query(self.runner, name, &request.options)?;
            results.insert(name.clone(), result);
        }
        Ok(report::from_query(&request.names, results))
    }
}

fn validate(request: &PackageRequest) -> Result<()> {
    if request.names.is_empty() {
        return Err(Error::invalid("no package names given"));
    }
    if request.names.iter().any(|n| n.trim().is_empty()) {
        return Err(Error::invalid("package names must not be empty"));
    }
    if request.is_wildcard() {
        if request.names.len() != 1 {
            return Err(Error::invalid(
                "\"*\" cannot be combined with other package names",
            ));
        }
        if request.state != PackageState::Latest {
            return Err(Error::invalid(format!(
                "\"*\" is only valid with state latest, not {}",
                request.state
            )));
        }
    }
    Ok(())
}
