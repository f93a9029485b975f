//! Pure diff of observed packages against the requested state

use crate::error::{Error, Result};
use crate::types::{ObservedPackage, PackageState, WILDCARD};

/// One planned package operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageAction {
    Install,
    Remove,
    Upgrade,
    /// Update every installed package
    UpgradeAll,
}

impl PackageAction {
    pub fn as_str(self) -> &'static str {
        match self {
            PackageAction::Install => "install",
            PackageAction::Remove => "remove",
            PackageAction::Upgrade => "upgrade",
            PackageAction::UpgradeAll => "upgrade-all",
        }
    }
}

/// An action bound to the package it targets
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedPackage {
    pub action: PackageAction,
    pub name: String,
}

impl PlannedPackage {
    fn new(action: PackageAction, name: &str) -> Self {
        Self {
            action,
            name: name.to_string(),
        }
    }

    pub fn upgrade_all() -> Self {
        Self::new(PackageAction::UpgradeAll, WILDCARD)
    }
}

/// Plan one entry per observed package, in input order.
///
/// Installing something the local index is known not to offer is refused
/// here, before any command has run. Packages whose availability was not
/// looked up are left to the install itself.
pub fn plan(observed: &[ObservedPackage], state: PackageState) -> Result<Vec<PlannedPackage>> {
    let mut planned = Vec::new();

    for pkg in observed {
        let action = match state {
            PackageState::Present if !pkg.installed => {
                if pkg.available == Some(false) {
                    return Err(Error::ResourceNotFound {
                        name: pkg.name.clone(),
                    });
                }
                Some(PackageAction::Install)
            }
            PackageState::Absent if pkg.installed => Some(PackageAction::Remove),
            PackageState::Latest if pkg.installed => Some(PackageAction::Upgrade),
            _ => None,
        };

        if let Some(action) = action {
            planned.push(PlannedPackage::new(action, &pkg.name));
        }
    }

    Ok(planned)
}
