//! Path resolution for argument records
//!
//! # Environment Variables
//!
//! - `CONVERGE_SERVICE_DIR` - Default service definition directory (`/etc/sv`)
//! - `CONVERGE_LINK_DIR` - Default supervised link directory (`/var/service`)
//!
//! An explicit `service_dir` / `link_dir` in the argument record always wins.

use runitkit::{DEFAULT_LINK_DIR, DEFAULT_SERVICE_DIR};
use std::path::{Path, PathBuf};

/// Environment variable for the service directory default
pub const ENV_SERVICE_DIR: &str = "CONVERGE_SERVICE_DIR";

/// Environment variable for the link directory default
pub const ENV_LINK_DIR: &str = "CONVERGE_LINK_DIR";

/// Default service directory, honouring `CONVERGE_SERVICE_DIR`
pub fn default_service_dir() -> String {
    env_or(ENV_SERVICE_DIR, DEFAULT_SERVICE_DIR)
}

/// Default link directory, honouring `CONVERGE_LINK_DIR`
pub fn default_link_dir() -> String {
    env_or(ENV_LINK_DIR, DEFAULT_LINK_DIR)
}

fn env_or(key: &str, fallback: &str) -> String {
    match std::env::var(key) {
        Ok(dir) if !dir.is_empty() => {
            log::debug!("Using {key}: {dir}");
            dir
        }
        _ => fallback.to_string(),
    }
}

/// Expand ~ and environment variables in a path string.
///
/// Unknown variables leave the string unexpanded.
pub fn expand(path: &str) -> PathBuf {
    let expanded = shellexpand::full(path).unwrap_or(std::borrow::Cow::Borrowed(path));
    PathBuf::from(expanded.as_ref())
}

/// Shorten a path under the invoking user's home to `~/...` for display
pub fn contract(path: &Path) -> String {
    if let Some(home) = dirs::home_dir()
        && let Ok(rest) = path.strip_prefix(&home)
    {
        if rest.as_os_str().is_empty() {
            return "~".to_string();
        }
        return format!("~/{}", rest.display());
    }
    path.display().to_string()
}
