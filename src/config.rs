//! Argument records handed to the agents by the orchestration runtime

use crate::paths;
use anyhow::{Context, Result};
use runitkit::{DesiredService, RunState, Scope, ServiceLayout, ServiceRequest};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::io::{self, Read};
use std::path::Path;
use std::time::Duration;
use xbpskit::{PackageOptions, PackageRequest, PackageState};

/// Encoding of an argument record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordFormat {
    Json,
    Toml,
}

impl RecordFormat {
    /// TOML for `*.toml`, JSON otherwise
    pub fn for_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => Self::Toml,
            _ => Self::Json,
        }
    }
}

/// Load a record from `source`; `None` or `-` reads JSON from stdin
pub fn load<T: DeserializeOwned>(source: Option<&Path>) -> Result<T> {
    match source {
        Some(path) if path != Path::new("-") => {
            let content = fs::read_to_string(path)
                .with_context(|| format!("Could not read {}", path.display()))?;
            parse(&content, RecordFormat::for_path(path))
                .with_context(|| format!("Invalid argument record in {}", path.display()))
        }
        _ => {
            let mut content = String::new();
            io::stdin()
                .read_to_string(&mut content)
                .context("Could not read argument record from stdin")?;
            parse(&content, RecordFormat::Json).context("Invalid argument record on stdin")
        }
    }
}

pub fn parse<T: DeserializeOwned>(content: &str, format: RecordFormat) -> Result<T> {
    let record = match format {
        RecordFormat::Json => serde_json::from_str(content)?,
        RecordFormat::Toml => toml::from_str(content)?,
    };
    Ok(record)
}

// ============================================================================
// Service
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServiceRecord {
    pub name: String,
    #[serde(default)]
    pub state: RunState,
    #[serde(default)]
    pub enabled: Option<bool>,
    #[serde(default)]
    pub user: Option<String>,
    /// Seconds handed to `sv -w`
    #[serde(default = "default_timeout")]
    pub timeout: u64,
    #[serde(default = "paths::default_service_dir")]
    pub service_dir: String,
    #[serde(default = "paths::default_link_dir")]
    pub link_dir: String,
    #[serde(default)]
    pub dry_run: bool,
}

fn default_timeout() -> u64 {
    runitkit::DEFAULT_TIMEOUT.as_secs()
}

impl ServiceRecord {
    /// Resolve the record into a request; `check` forces dry run
    pub fn into_request(self, check: bool) -> Result<ServiceRequest> {
        let scope = Scope::lookup(self.user.as_deref())?;
        let layout = ServiceLayout::new(
            paths::expand(&self.service_dir),
            paths::expand(&self.link_dir),
        );
        log::debug!(
            "service layout: {} -> {}",
            paths::contract(&layout.service_dir),
            paths::contract(&layout.link_dir)
        );

        let desired = DesiredService {
            state: self.state,
            enabled: self.enabled,
        };
        Ok(ServiceRequest::new(self.name, desired)
            .with_scope(scope)
            .with_layout(layout)
            .with_timeout(Duration::from_secs(self.timeout))
            .dry_run(self.dry_run || check))
    }
}

// ============================================================================
// Package
// ============================================================================

/// A single name or a list of names
#[derive(Debug, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum Names {
    One(String),
    Many(Vec<String>),
}

impl Names {
    pub fn into_vec(self) -> Vec<String> {
        match self {
            Names::One(name) => vec![name],
            Names::Many(names) => names,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PackageRecord {
    pub name: Names,
    #[serde(default)]
    pub state: PackageState,
    #[serde(default = "default_true")]
    pub update_cache: bool,
    #[serde(default)]
    pub force: bool,
    #[serde(default)]
    pub repository: Option<String>,
    #[serde(default)]
    pub autoremove: bool,
    #[serde(default)]
    pub recursive: bool,
    #[serde(default)]
    pub dry_run: bool,
}

fn default_true() -> bool {
    true
}

impl PackageRecord {
    pub fn into_request(self, check: bool) -> PackageRequest {
        let options = PackageOptions {
            update_cache: self.update_cache,
            force: self.force,
            repository: self.repository,
            autoremove: self.autoremove,
            recursive: self.recursive,
        };
        PackageRequest::new(self.name.into_vec(), self.state)
            .with_options(options)
            .dry_run(self.dry_run || check)
    }
}
