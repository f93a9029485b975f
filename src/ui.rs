use crate::cli::OutputFormat;
use anyhow::Result;
use colored::Colorize;
use runitkit::{ServiceReport, ServiceStatus};
use serde::Serialize;
use xbpskit::{PackageReport, QueryResult};

/// Print an error message
pub fn error(msg: &str) {
    eprintln!("{} {}", "✗".red(), msg);
}

/// Format a key-value pair
fn kv(key: &str, value: &str) -> String {
    format!("  {}: {}", key.dimmed(), value)
}

/// Print the result record in the requested format
pub fn emit<T: Serialize>(
    format: OutputFormat,
    report: &T,
    text: impl Fn(&T) -> String,
) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string(report)?),
        OutputFormat::Text => println!("{}", text(report)),
    }
    Ok(())
}

/// The failure record: `{"failed": true, "msg": ...}`
pub fn failure_record(msg: &str) -> serde_json::Value {
    serde_json::json!({ "failed": true, "msg": msg })
}

/// Report a fatal error on the channel matching the output format
pub fn fail(format: OutputFormat, msg: &str) {
    match format {
        OutputFormat::Json => println!("{}", failure_record(msg)),
        OutputFormat::Text => error(msg),
    }
}

fn marker(changed: bool) -> String {
    if changed {
        "✓".green().to_string()
    } else {
        "•".dimmed().to_string()
    }
}

fn changed_label(changed: bool) -> String {
    if changed {
        "changed".yellow().to_string()
    } else {
        "unchanged".dimmed().to_string()
    }
}

pub fn service_summary(report: &ServiceReport) -> String {
    let state = match report.state {
        ServiceStatus::Running => "running".green(),
        ServiceStatus::Stopped => "stopped".red(),
    };
    let enabled = if report.enabled {
        "enabled".to_string()
    } else {
        "disabled".dimmed().to_string()
    };
    format!(
        "{} {}: {state}, {enabled} ({})",
        marker(report.changed),
        report.service.bold(),
        changed_label(report.changed)
    )
}

pub fn package_summary(report: &PackageReport) -> String {
    if let Some(results) = &report.query_results {
        let mut lines = Vec::new();
        for name in &report.packages {
            lines.push(name.bold().to_string());
            match results.get(name) {
                Some(QueryResult::Found(info)) => {
                    lines.extend(info.iter().map(|(k, v)| kv(k, v)));
                }
                _ => lines.push(kv("status", "not found")),
            }
        }
        return lines.join("\n");
    }

    if report.packages.is_empty() {
        return format!("{} packages already in desired state", marker(false));
    }
    format!(
        "{} {} ({})",
        marker(report.changed),
        report.packages.join(", "),
        changed_label(report.changed)
    )
}
