//! Core types for xbps package reconciliation.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Name that stands for every installed package (full system upgrade)
pub const WILDCARD: &str = "*";

/// Requested state of the named packages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageState {
    /// Installed, any version
    #[default]
    Present,
    /// Not installed
    Absent,
    /// Installed packages updated to the newest version
    Latest,
    /// Read-only metadata lookup
    Query,
}

impl std::fmt::Display for PackageState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            PackageState::Present => "present",
            PackageState::Absent => "absent",
            PackageState::Latest => "latest",
            PackageState::Query => "query",
        };
        f.write_str(s)
    }
}

/// Flags passed through to the package manager.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageOptions {
    /// Sync repository indexes before installing or updating (`-S`)
    pub update_cache: bool,
    /// Force installation (`-f`)
    pub force: bool,
    /// Extra repository to consult
    pub repository: Option<String>,
    /// Remove orphans on removal (`-o`)
    pub autoremove: bool,
    /// Remove dependencies recursively (`-R`)
    pub recursive: bool,
}

impl Default for PackageOptions {
    fn default() -> Self {
        Self {
            update_cache: true,
            force: false,
            repository: None,
            autoremove: false,
            recursive: false,
        }
    }
}

impl PackageOptions {
    /// `--repository=<url>` when a repository was given
    pub fn repository_arg(&self) -> Option<String> {
        self.repository
            .as_deref()
            .map(|repo| format!("--repository={repo}"))
    }
}

/// Point-in-time facts about one requested package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObservedPackage {
    pub name: String,
    /// Present in the local package database
    pub installed: bool,
    /// Found in a repository; only looked up when an install is considered
    pub available: Option<bool>,
}

/// Everything needed for one reconciliation run.
#[derive(Debug, Clone)]
pub struct PackageRequest {
    /// Package names in caller order, duplicates allowed
    pub names: Vec<String>,
    pub state: PackageState,
    pub options: PackageOptions,
    /// Plan and report without touching the system
    pub dry_run: bool,
}

impl PackageRequest {
    pub fn new<I, S>(names: I, state: PackageState) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
            state,
            options: PackageOptions::default(),
            dry_run: false,
        }
    }

    pub fn with_options(mut self, options: PackageOptions) -> Self {
        self.options = options;
        self
    }

    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Whether this is the `"*"` full-upgrade form
    pub fn is_wildcard(&self) -> bool {
        self.names.iter().any(|n| n == WILDCARD)
    }
}

/// Marker value for packages the query could not find
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryStatus {
    NotFound,
}

/// Query outcome for one package: its metadata or `{"status": "not_found"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum QueryResult {
    Missing { status: QueryStatus },
    Found(BTreeMap<String, String>),
}

impl QueryResult {
    pub fn not_found() -> Self {
        QueryResult::Missing {
            status: QueryStatus::NotFound,
        }
    }

    /// An empty metadata map is reported as not found
    pub fn from_info(info: BTreeMap<String, String>) -> Self {
        if info.is_empty() {
            Self::not_found()
        } else {
            QueryResult::Found(info)
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, QueryResult::Found(_))
    }
}

/// Final result of a package reconciliation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageReport {
    /// Whether any action ran (or would have, under dry run)
    pub changed: bool,
    /// Affected packages; for queries, the requested names
    pub packages: Vec<String>,
    /// Per-package metadata, query mode only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query_results: Option<BTreeMap<String, QueryResult>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_state_names() {
        let state: PackageState = serde_json::from_str("\"latest\"").unwrap();
        assert_eq!(state, PackageState::Latest);
        assert_eq!(PackageState::default(), PackageState::Present);
        assert_eq!(PackageState::Query.to_string(), "query");
    }

    #[test]
    fn test_default_options_update_cache() {
        let opts = PackageOptions::default();
        assert!(opts.update_cache);
        assert!(!opts.force);
        assert_eq!(opts.repository_arg(), None);
    }

    #[test]
    fn test_repository_arg() {
        let opts = PackageOptions {
            repository: Some("https://repo-default.voidlinux.org/current".into()),
            ..Default::default()
        };
        assert_eq!(
            opts.repository_arg().as_deref(),
            Some("--repository=https://repo-default.voidlinux.org/current")
        );
    }

    #[test]
    fn test_report_json_shape() {
        let report = PackageReport {
            changed: true,
            packages: vec!["vim".into()],
            query_results: None,
        };
        assert_eq!(
            serde_json::to_value(&report).unwrap(),
            json!({"changed": true, "packages": ["vim"]})
        );
    }

    #[test]
    fn test_query_result_json_shape() {
        let mut info = BTreeMap::new();
        info.insert("pkgver".to_string(), "vim-9.1.0_1".to_string());

        let mut results = BTreeMap::new();
        results.insert("vim".to_string(), QueryResult::from_info(info));
        results.insert("nope".to_string(), QueryResult::from_info(BTreeMap::new()));

        let report = PackageReport {
            changed: false,
            packages: vec!["vim".into(), "nope".into()],
            query_results: Some(results),
        };
        assert_eq!(
            serde_json::to_value(&report).unwrap(),
            json!({
                "changed": false,
                "packages": ["vim", "nope"],
                "query_results": {
                    "vim": {"pkgver": "vim-9.1.0_1"},
                    "nope": {"status": "not_found"},
                },
            })
        );
    }

    #[test]
    fn test_wildcard_detection() {
        assert!(PackageRequest::new(["*"], PackageState::Latest).is_wildcard());
        assert!(!PackageRequest::new(["vim", "git"], PackageState::Latest).is_wildcard());
    }
}
