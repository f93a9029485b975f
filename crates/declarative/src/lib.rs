//! # Declarative
//!
//! The reconciliation pipeline shared by converge agents.
//!
//! Each agent observes current state, diffs it against the desired state,
//! plans an ordered list of actions, executes them (or simulates them under
//! dry run) and finally reports what changed. This crate holds the parts of
//! that pipeline that do not care whether the resource is a service or a
//! package.
//!
//! ## Core Concepts
//!
//! - **CommandRunner**: Runs one external process and captures its output
//! - **Privilege**: Pass-through `sudo -u` wrapper for per-user commands
//! - **Action**: One planned, external-effecting step
//! - **Plan**: Ordered actions; plan order is execution order
//! - **Executor**: Applies a plan, stopping at the first failure
//!
//! ## Example
//!
//! ```ignore
//! use declarative::{ApplyContext, ExecuteOptions, Plan, SystemRunner, execute_simple};
//!
//! let plan: Plan<MyAction> = my_planner(&observed, &desired);
//! let runner = SystemRunner;
//! let ctx = ApplyContext::new(&runner);
//!
//! let summary = execute_simple(&plan, &ExecuteOptions::new(dry_run), &ctx)?;
//! println!("changed: {}", summary.changed());
//! ```
//!
//! ## Provider Traits
//!
//! - [`CommandRunner`]: External process execution
//! - [`ProgressCallback`]: Receives progress updates
//!
//! This allows agents to be tested with scripted runners and driven by any
//! front end.

pub mod runner;

pub mod action;
pub mod context;
pub mod error;
pub mod executor;
pub mod planner;
pub mod types;

// Re-export main types at crate root
pub use action::Action;
pub use context::{ApplyContext, NoProgress, ProgressCallback};
pub use error::{Error, Result};
pub use executor::{execute, execute_simple};
pub use planner::Plan;
pub use runner::{CommandRunner, Privilege, SystemRunner, render};
pub use types::{
    ActionRecord, CommandOutput, DEFAULT_GRACE, ExecuteOptions, ExecuteSummary, Outcome,
};
