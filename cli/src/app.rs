//! Application context: unified state passed to every command handler.
//!
//! `AppContext` wires the production adapters once so command handlers only
//! see port implementations and the output context.

use crate::infra::azure::AzureCli;
use crate::infra::command_runner::TokioCommandRunner;
use crate::infra::fs::LocalFs;
use crate::infra::ssh::OpenSsh;
use crate::output::{OutputContext, TerminalReporter};

/// Output rendering mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-readable terminal output (default).
    Human,
    /// Machine-readable JSON output.
    Json,
}

/// Output rendering flags passed from the top-level CLI.
pub struct OutputFlags {
    /// Disable ANSI color output.
    pub no_color: bool,
    /// Suppress non-error output.
    pub quiet: bool,
    /// Enable JSON output mode.
    pub json: bool,
}

/// Unified application context passed to every command handler.
pub struct AppContext {
    /// Terminal output context (colors, quiet mode).
    pub output: OutputContext,
    /// Output rendering mode (human vs JSON).
    pub mode: OutputMode,
    /// `az` control-plane adapter.
    pub control_plane: AzureCli<TokioCommandRunner>,
    /// `ssh-keygen` / `ssh` adapter.
    pub ssh: OpenSsh<TokioCommandRunner>,
    /// Local artifact storage.
    pub local_fs: LocalFs,
}

impl AppContext {
    /// Construct an `AppContext` from top-level CLI flags.
    ///
    /// JSON mode keeps stdout for the report, so progress output is
    /// suppressed and remote command output goes to stderr.
    #[must_use]
    pub fn new(flags: &OutputFlags) -> Self {
        let mode = if flags.json {
            OutputMode::Json
        } else {
            OutputMode::Human
        };

        // Remote output must not interleave with the JSON document.
        let runner = if flags.json {
            TokioCommandRunner::new().stdout_to_stderr()
        } else {
            TokioCommandRunner::new()
        };

        Self {
            output: OutputContext::new(flags.no_color, flags.quiet || flags.json),
            mode,
            control_plane: AzureCli::new(runner),
            ssh: OpenSsh::new(runner),
            local_fs: LocalFs,
        }
    }

    /// Returns `true` when JSON output mode is active.
    #[must_use]
    pub fn is_json(&self) -> bool {
        self.mode == OutputMode::Json
    }

    /// Progress reporter bound to this context's output settings.
    #[must_use]
    pub fn terminal_reporter(&self) -> TerminalReporter<'_> {
        TerminalReporter::new(&self.output)
    }
}
