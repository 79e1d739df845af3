//! Infrastructure implementation of the `CommandRunner` port.
//!
//! `TokioCommandRunner` is the production implementation that uses tokio
//! for async process execution. Commands run to completion: `az vm create`
//! and the remote bootstrap legitimately take many minutes, so no timeout is
//! imposed beyond what `az` and `ssh` apply themselves.

use std::process::{ExitStatus, Output, Stdio};

use anyhow::{Context, Result};

use crate::application::ports::CommandRunner;

/// Production `CommandRunner` backed by `tokio::process`.
///
/// Children are killed when their future is dropped, so an interrupted run
/// does not leave `az` or `ssh` behind.
#[derive(Debug, Default, Clone, Copy)]
pub struct TokioCommandRunner {
    stdout_to_stderr: bool,
}

impl TokioCommandRunner {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Interactive children write their stdout to our stderr, leaving stdout
    /// to the `--json` document.
    #[must_use]
    pub fn stdout_to_stderr(mut self) -> Self {
        self.stdout_to_stderr = true;
        self
    }
}

impl CommandRunner for TokioCommandRunner {
    async fn run(&self, program: &str, args: &[&str]) -> Result<Output> {
        tracing::debug!(program, ?args, "running command");
        let output = tokio::process::Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output()
            .await
            .with_context(|| format!("failed to spawn {program}"))?;
        tracing::debug!(program, status = %output.status, "command finished");
        Ok(output)
    }

    async fn run_status(
        &self,
        program: &str,
        args: &[&str],
        env: &[(&str, &str)],
    ) -> Result<ExitStatus> {
        tracing::debug!(program, ?args, ?env, "running interactive command");
        let mut command = tokio::process::Command::new(program);
        command
            .args(args)
            .envs(env.iter().copied())
            .kill_on_drop(true);
        if self.stdout_to_stderr {
            command.stdout(Stdio::from(std::io::stderr()));
        }
        let mut child = command
            .spawn()
            .with_context(|| format!("failed to spawn {program}"))?;

        child
            .wait()
            .await
            .with_context(|| format!("waiting for {program}"))
    }
}
