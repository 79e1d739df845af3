//! Port trait definitions for the Application layer.
//!
//! Ports are the interfaces (contracts) that infrastructure must fulfill.
//! This file imports only from `crate::domain`, never from `crate::infra`,
//! `crate::commands`, or `crate::output`.

use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Output};

use anyhow::Result;

use crate::domain::{
    DiskRequest, ExtensionRequest, ResourceGroup, SshTarget, VmProfile, VmRequest,
};

// ── Control Plane Port Traits ─────────────────────────────────────────────────

/// Account selection and service-principal management.
#[allow(async_fn_in_trait)]
pub trait AccountManager {
    /// Make `subscription_id` the active subscription for later calls.
    async fn set_subscription(&self, subscription_id: &str) -> Result<()>;
    /// Create a service principal with `role` on the subscription and return
    /// the raw JSON credential document.
    async fn create_service_principal(&self, subscription_id: &str, role: &str)
    -> Result<String>;
}

/// Resource group query and creation.
#[allow(async_fn_in_trait)]
pub trait ResourceGroupManager {
    /// List groups whose name equals `name`.
    async fn list_groups(&self, name: &str) -> Result<Vec<ResourceGroup>>;
    /// Create the group `name` in `location`.
    async fn create_group(&self, name: &str, location: &str) -> Result<()>;
}

/// Virtual machine, disk and extension operations.
#[allow(async_fn_in_trait)]
pub trait VmManager {
    /// Create a VM and return the raw JSON response.
    async fn create_vm(&self, request: &VmRequest<'_>) -> Result<String>;
    /// Create a new managed disk and attach it to a VM.
    async fn attach_disk(&self, request: &DiskRequest<'_>) -> Result<()>;
    /// Apply a VM extension.
    async fn set_extension(&self, request: &ExtensionRequest<'_>) -> Result<()>;
}

/// Composite trait: any type implementing all three sub-traits is a `ControlPlane`.
pub trait ControlPlane: AccountManager + ResourceGroupManager + VmManager {}

/// Blanket implementation: any type implementing all three sub-traits is a `ControlPlane`.
impl<T> ControlPlane for T where T: AccountManager + ResourceGroupManager + VmManager {}

// ── Remote Shell Port Traits ──────────────────────────────────────────────────

/// Local key pair generation.
#[allow(async_fn_in_trait)]
pub trait KeyGenerator {
    /// Generate a passphrase-less key pair at `private_key` and `private_key.pub`.
    async fn generate_key_pair(&self, private_key: &Path) -> Result<()>;
}

/// Command execution on the provisioned machine.
#[allow(async_fn_in_trait)]
pub trait RemoteShell {
    /// Run `command` on `target` with inherited stdio.
    ///
    /// # Errors
    ///
    /// Returns an error if the client cannot be spawned or the remote
    /// command exits non-zero.
    async fn exec(&self, target: &SshTarget, command: &str) -> Result<()>;
}

// ── Command Runner Port ───────────────────────────────────────────────────────

/// Abstracts process execution so infrastructure can be swapped or mocked.
#[allow(async_fn_in_trait)]
pub trait CommandRunner {
    /// Run a program and capture its output.
    async fn run(&self, program: &str, args: &[&str]) -> Result<Output>;
    /// Run a program with inherited stdio and the given environment
    /// overrides, returning only its exit status.
    ///
    /// # Errors
    ///
    /// Returns an error if the process cannot be spawned.
    async fn run_status(
        &self,
        program: &str,
        args: &[&str],
        env: &[(&str, &str)],
    ) -> Result<ExitStatus>;
}

// ── Progress Reporting Port ───────────────────────────────────────────────────

/// Abstracts progress reporting so services can emit events without
/// depending on the Presentation layer. Sync trait.
pub trait ProgressReporter {
    /// Emit an in-progress step message.
    fn step(&self, message: &str);
    /// Emit a success message.
    fn success(&self, message: &str);
    /// Emit a warning message.
    fn warn(&self, message: &str);
}

// ── Filesystem Port ───────────────────────────────────────────────────────────

/// Abstracts the local filesystem holding the cluster's artifacts.
pub trait LocalFs {
    /// Whether anything exists at `path`.
    fn exists(&self, path: &Path) -> bool;
    /// Whether `path` is a directory.
    fn is_dir(&self, path: &Path) -> bool;
    /// Create a single directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    fn create_dir(&self, path: &Path) -> Result<()>;
    /// Read a UTF-8 file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read.
    fn read_to_string(&self, path: &Path) -> Result<String>;
    /// Write `content` to `path`, replacing any previous content.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    fn write(&self, path: &Path, content: &str) -> Result<()>;
}

// ── Configuration Port ────────────────────────────────────────────────────────

/// Abstracts loading of the VM profile.
pub trait ProfileStore {
    /// Load the profile, falling back to defaults when no file exists.
    ///
    /// # Errors
    ///
    /// Returns an error if a profile file exists but cannot be parsed.
    fn load(&self) -> Result<VmProfile>;
    /// Path the profile is read from.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    fn path(&self) -> Result<PathBuf>;
}
