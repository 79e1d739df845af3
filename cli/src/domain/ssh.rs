//! Remote-shell invocation shape.

use std::path::PathBuf;

/// Options every `ssh` invocation against the hub carries, ahead of the host.
///
/// Host keys are not pinned: the VM is new on every run, so its key is
/// unknown until it has booted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SshTarget {
    pub host: String,
    pub user: String,
    pub identity: PathBuf,
    /// Run `ssh` with `SSH_AUTH_SOCK` set to the empty string so a local agent
    /// cannot offer other identities.
    pub clear_agent_socket: bool,
}

impl SshTarget {
    /// Full `ssh` argument list for running `command` on the target.
    #[must_use]
    pub fn args(&self, command: &str) -> Vec<String> {
        vec![
            "-i".to_string(),
            self.identity.display().to_string(),
            "-o".to_string(),
            "UserKnownHostsFile=/dev/null".to_string(),
            "-o".to_string(),
            "StrictHostKeyChecking=no".to_string(),
            "-o".to_string(),
            "PreferredAuthentications=publickey".to_string(),
            "-o".to_string(),
            format!("User={}", self.user),
            self.host.clone(),
            command.to_string(),
        ]
    }

    /// Environment overrides for this invocation only.
    #[must_use]
    pub fn env(&self) -> Vec<(&'static str, &'static str)> {
        if self.clear_agent_socket {
            vec![("SSH_AUTH_SOCK", "")]
        } else {
            Vec::new()
        }
    }

    /// Human-readable command line, used in diagnostics.
    #[must_use]
    pub fn display_command(&self, command: &str) -> String {
        let mut parts = vec!["ssh".to_string()];
        parts.extend(self.args(command));
        parts.join(" ")
    }
}
