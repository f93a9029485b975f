//! Execution engine - applies a plan in order, or records it under dry run

use crate::action::Action;
use crate::context::{ApplyContext, ProgressCallback};
use crate::planner::Plan;
use crate::types::{ActionRecord, ExecuteOptions, ExecuteSummary, Outcome};
use std::fmt::Display;
use std::thread;

/// Execute a plan with the given options and progress callback
///
/// Actions run strictly in plan order. The first failure aborts the run:
/// remaining actions are abandoned and nothing already applied is rolled
/// back. Under dry run no action is applied; each is recorded as
/// [`Outcome::WouldApply`].
///
/// # Arguments
/// * `plan` - The ordered actions to run
/// * `opts` - Execution options (dry_run, grace)
/// * `ctx` - Apply context handed to every action
/// * `progress` - Progress callback
pub fn execute<A, P>(
    plan: &Plan<A>,
    opts: &ExecuteOptions,
    ctx: &ApplyContext<'_>,
    progress: &mut P,
) -> Result<ExecuteSummary, A::Error>
where
    A: Action,
    A::Error: Display,
    P: ProgressCallback + ?Sized,
{
    let mut summary = ExecuteSummary::default();

    if plan.is_empty() {
        return Ok(summary);
    }

    progress.on_plan_start(plan.len(), opts.dry_run);

    for action in plan.actions() {
        let id = action.id();
        progress.on_action_start(&id, &action.description());

        let outcome = if opts.dry_run {
            Outcome::WouldApply
        } else {
            if let Err(e) = action.apply(ctx) {
                progress.on_action_failed(&id, &e.to_string());
                return Err(e);
            }
            if action.settles() && !opts.grace.is_zero() {
                thread::sleep(opts.grace);
            }
            Outcome::Applied
        };

        progress.on_action_complete(&id, outcome);
        summary.records.push(ActionRecord {
            id,
            kind: action.kind(),
            outcome,
        });
    }

    Ok(summary)
}

/// Simple execution without callbacks
pub fn execute_simple<A>(
    plan: &Plan<A>,
    opts: &ExecuteOptions,
    ctx: &ApplyContext<'_>,
) -> Result<ExecuteSummary, A::Error>
where
    A: Action,
    A::Error: Display,
{
    use crate::context::NoProgress;

    execute(plan, opts, ctx, &mut NoProgress)
}
