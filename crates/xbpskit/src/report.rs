//! Final result records for package runs

use crate::types::{PackageReport, QueryResult};
use declarative::ExecuteSummary;
use std::collections::BTreeMap;

/// Report for install, remove and upgrade runs.
///
/// Affected packages are the targets of the actions that ran, or would have.
pub fn from_summary(summary: &ExecuteSummary) -> PackageReport {
    PackageReport {
        changed: summary.changed(),
        packages: summary.records.iter().map(|r| r.id.clone()).collect(),
        query_results: None,
    }
}

/// Report for query runs; nothing is ever changed.
pub fn from_query(names: &[String], results: BTreeMap<String, QueryResult>) -> PackageReport {
    PackageReport {
        changed: false,
        packages: names.to_vec(),
        query_results: Some(results),
    }
}
