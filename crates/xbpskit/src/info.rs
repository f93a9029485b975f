//! Decoder for `xbps-query -R` package metadata.
//!
//! The output is one `key: value` pair per line:
//!
//! ```text
//! architecture: x86_64
//! pkgver: vim-9.1.0_1
//! short_desc: Vim editor (vi clone)
//! ```
//!
//! Values may themselves contain colons (`homepage: https://...`), so each
//! line is split at its first colon only.

use std::collections::BTreeMap;

/// Decode metadata lines into a key/value map.
///
/// Lines without a colon are skipped; a repeated key keeps its last value.
pub fn parse(stdout: &str) -> BTreeMap<String, String> {
    stdout
        .lines()
        .filter_map(|line| line.split_once(':'))
        .map(|(key, value)| (key.trim().to_string(), value.trim().to_string()))
        .collect()
}
