//! Action trait for reconciliation steps
//!
//! An Action is one external-effecting operation an agent planned:
//! enable a service, start it, install a package, and so on.

use crate::context::ApplyContext;
use std::fmt;

/// Core trait for planned actions
///
/// Every step an agent can take implements this trait, which provides:
/// - Identity (id, kind, description)
/// - Execution (apply)
/// - Whether the executor should let the system settle afterwards
///
/// # Example
///
/// ```
/// use declarative::{Action, ApplyContext, CommandRunner, argv};
///
/// #[derive(Debug)]
/// struct Touch(String);
///
/// impl Action for Touch {
///     type Error = declarative::Error;
///
///     fn id(&self) -> String {
///         self.0.clone()
///     }
///
///     fn kind(&self) -> &'static str {
///         "touch"
///     }
///
///     fn apply(&self, ctx: &ApplyContext<'_>) -> Result<(), Self::Error> {
///         ctx.runner.check(&argv!["touch", self.0.as_str()])?;
///         Ok(())
///     }
/// }
/// ```
pub trait Action: fmt::Debug {
    /// Error raised when the action fails
    type Error;

    /// Name of the resource the action targets
    ///
    /// Examples:
    /// - "sshd" for a service
    /// - "vim" for a package
    fn id(&self) -> String;

    /// Action kind, e.g. "enable", "start", "install"
    fn kind(&self) -> &'static str;

    /// Human-readable description
    fn description(&self) -> String {
        format!("{} {}", self.kind(), self.id())
    }

    /// Apply the action against the system
    ///
    /// Never called under dry run.
    fn apply(&self, ctx: &ApplyContext<'_>) -> Result<(), Self::Error>;

    /// Whether the target changes state asynchronously after this action
    fn settles(&self) -> bool {
        false
    }
}
