//! Where service definitions and registration links live
//!
//! System services are defined under the service directory (`/etc/sv`) and
//! enabled by a link in the link directory (`/var/service`). Per-user
//! services are looked up in a few conventional places under the user's
//! home and enabled by a link in `~/.local/share/service`.

use crate::error::{Error, Result};
use crate::types::{ManagedService, Scope};
use std::path::{Path, PathBuf};

/// Default directory holding system service definitions
pub const DEFAULT_SERVICE_DIR: &str = "/etc/sv";

/// Default directory runsvdir supervises
pub const DEFAULT_LINK_DIR: &str = "/var/service";

/// Per-user definition directories, relative to the home, in lookup order
const USER_SERVICE_DIRS: [&str; 3] = [".local/share/sv", ".config/sv", "sv"];

/// Per-user link directory, relative to the home
const USER_LINK_DIR: &str = ".local/share/service";

/// Filesystem layout for system services
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceLayout {
    /// Directory holding service definitions
    pub service_dir: PathBuf,
    /// Directory whose links mark services enabled
    pub link_dir: PathBuf,
}

impl Default for ServiceLayout {
    fn default() -> Self {
        Self {
            service_dir: PathBuf::from(DEFAULT_SERVICE_DIR),
            link_dir: PathBuf::from(DEFAULT_LINK_DIR),
        }
    }
}

impl ServiceLayout {
    pub fn new(service_dir: impl Into<PathBuf>, link_dir: impl Into<PathBuf>) -> Self {
        Self {
            service_dir: service_dir.into(),
            link_dir: link_dir.into(),
        }
    }

    /// Resolve `name` in `scope` to a single existing definition directory.
    ///
    /// Fails with [`Error::ResourceNotFound`] when the definition does not
    /// exist; nothing has been touched at that point.
    pub fn resolve(&self, name: &str, scope: &Scope) -> Result<ManagedService> {
        validate_name(name)?;

        let (definition, link) = match scope {
            Scope::System => (self.service_dir.join(name), self.link_dir.join(name)),
            Scope::User { home, .. } => (
                user_definition(home, name),
                home.join(USER_LINK_DIR).join(name),
            ),
        };

        if !definition.exists() {
            return Err(Error::ResourceNotFound {
                name: name.to_string(),
                path: definition,
            });
        }

        log::debug!(
            "service {name}: definition {}, link {}",
            definition.display(),
            link.display()
        );

        Ok(ManagedService {
            name: name.to_string(),
            scope: scope.clone(),
            definition,
            link,
        })
    }
}

/// First existing per-user definition, or the first candidate if none exists
fn user_definition(home: &Path, name: &str) -> PathBuf {
    let candidates: Vec<PathBuf> = USER_SERVICE_DIRS
        .iter()
        .map(|dir| home.join(dir).join(name))
        .collect();

    candidates
        .iter()
        .find(|path| path.exists())
        .cloned()
        .unwrap_or_else(|| candidates[0].clone())
}

/// A service name must be one plain path component
fn validate_name(name: &str) -> Result<()> {
    let plain = !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains('/')
        && !name.contains('\0');

    if plain {
        Ok(())
    } else {
        Err(Error::InvalidName {
            name: name.to_string(),
        })
    }
}
