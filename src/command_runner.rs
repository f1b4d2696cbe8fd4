//! External process execution.

use std::process::{Output, Stdio};

use anyhow::{Context, Result};

/// Generic command execution with captured stdout.
///
/// This trait is NOT tied to launchctl — it can run any external command.
/// The production implementation uses tokio; test doubles can return
/// canned results without spawning processes.
#[allow(async_fn_in_trait)]
pub trait CommandRunner {
    /// Run a command to completion. Stdout is captured for forwarding to
    /// the output sink; stderr is inherited and flows to the tool's own
    /// stderr. There is no timeout; a hung command hangs the tool.
    async fn run(&self, program: &str, args: &[&str]) -> Result<Output>;
}

/// Production `CommandRunner` backed by `tokio::process`.
pub struct TokioCommandRunner;

impl CommandRunner for TokioCommandRunner {
    async fn run(&self, program: &str, args: &[&str]) -> Result<Output> {
        let child = tokio::process::Command::new(program)
            .args(args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .kill_on_drop(true)
            .spawn()
            .with_context(|| format!("failed to spawn {program}"))?;

        child
            .wait_with_output()
            .await
            .with_context(|| format!("waiting for {program}"))
    }
}
