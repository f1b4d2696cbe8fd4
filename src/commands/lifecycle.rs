//! Shared handler for the plan-composing verbs.

use std::path::Path;

use anyhow::Result;

use crate::cli::CommonArgs;
use crate::command_runner::TokioCommandRunner;
use crate::error::ServiceError;
use crate::execute::{self, Mode};
use crate::output::{OutputContext, OutputSink};
use crate::plan::{self, PlanContext, Verb};
use crate::service::{ServiceIdentity, ServicePaths};

/// Run one lifecycle verb end to end: resolve the identity, derive paths,
/// check preconditions, compose the plan, and run or render it.
///
/// `service` is `None` only for verbs that do not address a service (`dir`).
///
/// # Errors
///
/// Returns an error if a fatal precondition fails or a composed command
/// cannot be issued.
pub async fn run(
    verb: Verb,
    service: Option<&str>,
    common: &CommonArgs,
    ctx: &OutputContext,
) -> Result<()> {
    let identity = ServiceIdentity::resolve(service.unwrap_or_default());
    let paths = ServicePaths::derive(&identity)?;
    let mode = Mode::from_flag(common.execute);
    let mut sink = OutputSink::open(&common.output)?;

    let plan_ctx = PlanContext {
        identity,
        paths,
        uid: current_uid(),
    };
    preflight(verb, &plan_ctx, mode, ctx)?;

    let plan = plan::compose(verb, &plan_ctx);
    execute::execute(&plan, mode, &TokioCommandRunner, &mut sink, ctx).await
}

/// Existence checks and warnings that gate plan execution, in both modes.
fn preflight(
    verb: Verb,
    plan_ctx: &PlanContext,
    mode: Mode,
    ctx: &OutputContext,
) -> Result<(), ServiceError> {
    let ServicePaths {
        source, installed, ..
    } = &plan_ctx.paths;

    match verb {
        Verb::Install | Verb::Reload { install: true } => {
            if !source.exists() {
                return Err(ServiceError::MissingSource(source.clone()));
            }
            warn_overwrite(installed, mode, ctx);
        }
        Verb::Uninstall => {
            if !installed.exists() {
                ctx.warn(&format!("\"{}\" does not exist.", installed.display()));
            }
        }
        _ => {}
    }
    Ok(())
}

fn warn_overwrite(installed: &Path, mode: Mode, ctx: &OutputContext) {
    if installed.exists() {
        match mode {
            Mode::Apply => ctx.warn(&format!("overwriting \"{}\".", installed.display())),
            Mode::DryRun => ctx.warn(&format!(
                "this command will overwrite \"{}\".",
                installed.display()
            )),
        }
    }
}

#[allow(unsafe_code)]
fn current_uid() -> u32 {
    // SAFETY: getuid takes no arguments and cannot fail.
    unsafe { libc::getuid() }
}
