//! Typed domain error enums.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All error types implement `thiserror::Error` and convert to `anyhow::Error`
//! via the `?` operator.

use std::path::PathBuf;

use thiserror::Error;

// ── Provisioning errors ───────────────────────────────────────────────────────

/// Errors raised by the provisioning sequence and its adapters.
#[derive(Debug, Error)]
pub enum ProvisionError {
    #[error("{} exists and is not a directory.", .path.display())]
    NotADirectory { path: PathBuf },

    #[error("Invalid cluster name '{0}': must match ^[a-z][a-z0-9-]{{1,61}}[a-z0-9]$")]
    InvalidClusterName(String),

    #[error("{program} {args} failed ({code}): {stderr}")]
    CommandFailed {
        program: String,
        args: String,
        code: String,
        stderr: String,
    },

    #[error("remote command `{command}` on {host} failed ({code})")]
    RemoteCommandFailed {
        host: String,
        command: String,
        code: String,
    },
}

impl ProvisionError {
    /// Stable identifier used in JSON error output.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotADirectory { .. } => "not_a_directory",
            Self::InvalidClusterName(_) => "invalid_cluster_name",
            Self::CommandFailed { .. } => "command_failed",
            Self::RemoteCommandFailed { .. } => "remote_command_failed",
        }
    }

    /// Build a [`ProvisionError::CommandFailed`] from a finished process.
    #[must_use]
    pub fn command_failed(program: &str, args: &[&str], code: Option<i32>, stderr: &[u8]) -> Self {
        Self::CommandFailed {
            program: program.to_owned(),
            args: args.join(" "),
            code: describe_exit(code),
            stderr: String::from_utf8_lossy(stderr).trim().to_owned(),
        }
    }
}

/// Render an exit code, or the fact that the process was killed by a signal.
#[must_use]
pub fn describe_exit(code: Option<i32>) -> String {
    code.map_or_else(|| "terminated by signal".to_owned(), |c| format!("exit code {c}"))
}
