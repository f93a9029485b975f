//! Planned package actions as executable steps

use crate::error::Error;
use crate::planner::{PackageAction, PlannedPackage};
use crate::types::PackageOptions;
use declarative::{Action, ApplyContext, argv};

/// A planned action together with the flags it runs with
#[derive(Debug)]
pub struct PackageStep<'a> {
    pub planned: PlannedPackage,
    pub options: &'a PackageOptions,
}

impl<'a> PackageStep<'a> {
    pub fn new(planned: PlannedPackage, options: &'a PackageOptions) -> Self {
        Self { planned, options }
    }

    /// The package manager command line for this step
    pub fn argv(&self) -> Vec<String> {
        let opts = self.options;
        let mut argv = match self.planned.action {
            PackageAction::Install => {
                let mut argv = argv!["xbps-install", "-y"];
                if opts.update_cache {
                    argv.push("-S".into());
                }
                if opts.force {
                    argv.push("-f".into());
                }
                argv.extend(opts.repository_arg());
                argv
            }
            PackageAction::Remove => {
                let mut argv = argv!["xbps-remove", "-y"];
                if opts.autoremove {
                    argv.push("-o".into());
                }
                if opts.recursive {
                    argv.push("-R".into());
                }
                argv
            }
            PackageAction::Upgrade | PackageAction::UpgradeAll => {
                let mut argv = argv!["xbps-install", "-y", "-u"];
                if opts.update_cache {
                    argv.push("-S".into());
                }
                argv.extend(opts.repository_arg());
                argv
            }
        };

        if self.planned.action != PackageAction::UpgradeAll {
            argv.push(self.planned.name.clone());
        }
        argv
    }
}

impl Action for PackageStep<'_> {
    type Error = Error;

    fn id(&self) -> String {
        self.planned.name.clone()
    }

    fn kind(&self) -> &'static str {
        self.planned.action.as_str()
    }

    fn apply(&self, ctx: &ApplyContext<'_>) -> Result<(), Error> {
        ctx.runner
            .check(&self.argv())
            .map(|_| ())
            .map_err(|e| Error::action_failed(self.planned.action, &self.planned.name, e.detail()))
    }
}
