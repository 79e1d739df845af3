//! OpenSSH adapters: key generation and remote command execution.

use std::path::Path;

use anyhow::{Context, Result};

use crate::application::ports::{CommandRunner, KeyGenerator, RemoteShell};
use crate::domain::error::describe_exit;
use crate::domain::{ProvisionError, SshTarget};

/// Drives `ssh-keygen` and `ssh` through a `CommandRunner`.
pub struct OpenSsh<R: CommandRunner> {
    runner: R,
}

impl<R: CommandRunner> OpenSsh<R> {
    /// Create an adapter with an explicit runner instance.
    pub fn new(runner: R) -> Self {
        Self { runner }
    }
}

impl<R: CommandRunner> KeyGenerator for OpenSsh<R> {
    async fn generate_key_pair(&self, private_key: &Path) -> Result<()> {
        let path = private_key.display().to_string();
        let args = ["-t", "rsa", "-N", "", "-f", path.as_str()];
        let output = self
            .runner
            .run("ssh-keygen", &args)
            .await
            .context("ssh-keygen")?;
        if !output.status.success() {
            return Err(ProvisionError::command_failed(
                "ssh-keygen",
                &args,
                output.status.code(),
                &output.stderr,
            )
            .into());
        }
        Ok(())
    }
}

impl<R: CommandRunner> RemoteShell for OpenSsh<R> {
    async fn exec(&self, target: &SshTarget, command: &str) -> Result<()> {
        let args = target.args(command);
        let args: Vec<&str> = args.iter().map(String::as_str).collect();
        let status = self
            .runner
            .run_status("ssh", &args, &target.env())
            .await
            .context("ssh")?;
        if !status.success() {
            return Err(ProvisionError::RemoteCommandFailed {
                host: target.host.clone(),
                command: command.to_owned(),
                code: describe_exit(status.code()),
            }
            .into());
        }
        Ok(())
    }
}
