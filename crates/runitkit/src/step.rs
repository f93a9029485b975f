//! Planned service actions as executable steps

use crate::error::Error;
use crate::link;
use crate::planner::ServiceAction;
use crate::types::ManagedService;
use declarative::{Action, ApplyContext, argv};
use std::time::Duration;

/// A [`ServiceAction`] bound to the service it acts on
#[derive(Debug)]
pub struct ServiceStep<'a> {
    pub action: ServiceAction,
    pub service: &'a ManagedService,
    /// Wait limit handed to `sv -w`
    pub timeout: Duration,
}

impl<'a> ServiceStep<'a> {
    pub fn new(action: ServiceAction, service: &'a ManagedService, timeout: Duration) -> Self {
        Self {
            action,
            service,
            timeout,
        }
    }

    /// Command line for run-state actions, already wrapped for the scope
    pub fn sv_argv(&self) -> Option<Vec<String>> {
        self.action.sv_command().map(|command| self.sv_line(command))
    }

    /// `sv` is pointed at the definition directory: it shares the supervise
    /// directory with the link, and it is still there after a disable has
    /// removed the link.
    fn sv_line(&self, command: &str) -> Vec<String> {
        let mut argv = argv!["sv"];
        if !self.timeout.is_zero() {
            argv.extend(argv!["-w", self.timeout.as_secs().to_string()]);
        }
        argv.extend(argv![command, self.service.definition.to_string_lossy()]);
        self.service.scope.privilege().wrap(argv)
    }

    fn control(&self, ctx: &ApplyContext<'_>, command: &str) -> Result<(), Error> {
        ctx.runner
            .check(&self.sv_line(command))
            .map(|_| ())
            .map_err(|e| Error::action_failed(self.action, &self.service.name, e.detail()))
    }
}

impl Action for ServiceStep<'_> {
    type Error = Error;

    fn id(&self) -> String {
        self.service.name.clone()
    }

    fn kind(&self) -> &'static str {
        self.action.as_str()
    }

    fn apply(&self, ctx: &ApplyContext<'_>) -> Result<(), Error> {
        match self.action {
            ServiceAction::Enable => link::enable(ctx.runner, self.service),
            ServiceAction::Disable => link::disable(ctx.runner, self.service),
            ServiceAction::Start => self.control(ctx, "start"),
            ServiceAction::Stop => self.control(ctx, "stop"),
            ServiceAction::Restart => self.control(ctx, "restart"),
            ServiceAction::Reload => self.control(ctx, "reload"),
        }
    }

    fn settles(&self) -> bool {
        self.action.settles()
    }
}
