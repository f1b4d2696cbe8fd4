//! Dual-mode plan execution: render commands or run them in order.

use anyhow::{Context, Result};

use crate::command_runner::CommandRunner;
use crate::output::{OutputContext, OutputSink};
use crate::plan::{CommandPlan, LifecycleCommand};

/// Whether a plan is echoed or actually run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    DryRun,
    Apply,
}

impl Mode {
    /// Map the `-x/--execute` flag to a mode.
    #[must_use]
    pub fn from_flag(execute: bool) -> Self {
        if execute { Self::Apply } else { Self::DryRun }
    }
}

/// Execute or render `plan`.
///
/// Apply mode runs every command in order, each attempted exactly once; a
/// non-zero exit status does not short-circuit the remaining commands, only
/// a spawn or filesystem failure does. Captured stdout of each invocation is
/// forwarded to `sink`. Dry-run renders each command to the report stream
/// and touches nothing.
///
/// # Errors
///
/// Returns an error if a command fails to spawn, a file operation fails, or
/// the sink cannot be written.
pub async fn execute(
    plan: &CommandPlan,
    mode: Mode,
    runner: &impl CommandRunner,
    sink: &mut OutputSink,
    ctx: &OutputContext,
) -> Result<()> {
    match mode {
        Mode::DryRun => {
            render(plan, ctx);
            Ok(())
        }
        Mode::Apply => apply(plan, runner, sink, ctx).await,
    }
}

fn render(plan: &CommandPlan, ctx: &OutputContext) {
    for command in plan.commands() {
        ctx.command(&command.render());
    }
    if plan.len() > 1 {
        ctx.info("add -x or --execute flag to execute commands.");
    } else {
        ctx.info("add -x or --execute flag to execute command.");
    }
}

async fn apply(
    plan: &CommandPlan,
    runner: &impl CommandRunner,
    sink: &mut OutputSink,
    ctx: &OutputContext,
) -> Result<()> {
    for command in plan.commands() {
        if let Some(note) = command.note() {
            ctx.info(note);
        }
        match command {
            LifecycleCommand::CopyFile { source, dest } => {
                std::fs::copy(source, dest).with_context(|| {
                    format!("copying {} to {}", source.display(), dest.display())
                })?;
            }
            LifecycleCommand::RemoveFile { path } => {
                // The missing-file warning was already issued upstream.
                if path.exists() {
                    std::fs::remove_file(path)
                        .with_context(|| format!("removing {}", path.display()))?;
                }
            }
            LifecycleCommand::Invoke { argv, .. } => {
                let Some((program, args)) = argv.split_first() else {
                    continue;
                };
                let args: Vec<&str> = args.iter().map(String::as_str).collect();
                let output = runner.run(program, &args).await?;
                sink.write_all(&output.stdout)?;
            }
        }
    }
    Ok(())
}
