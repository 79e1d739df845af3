//! Domain types and validators for deployment configuration.
//!
//! Pure functions only. No I/O and no async.

use std::path::PathBuf;
use std::sync::LazyLock;

use anyhow::Result;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::domain::error::ProvisionError;

// ── Constants ────────────────────────────────────────────────────────────────

pub const DEFAULT_CREDENTIAL_FILE: &str = "rbac.json";
pub const DEFAULT_DISK_COUNT: u32 = 4;
pub const DEFAULT_DISK_SIZE_GB: u32 = 1024;
pub const DEFAULT_LOCATION: &str = "centralus";

/// Azure public DNS label rules, which also keep the name usable as a
/// directory and resource-group name.
#[allow(clippy::expect_used)] // Static regex literal, cannot fail
pub static CLUSTER_NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z][a-z0-9-]{1,61}[a-z0-9]$").expect("valid regex")
});

// ── Deploy config ────────────────────────────────────────────────────────────

/// Per-invocation deployment parameters, built from the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployConfig {
    /// Azure subscription the service principal is scoped to.
    pub subscription_id: String,
    /// Cluster name: output directory, resource group and DNS label.
    pub cluster_name: String,
    /// Service principal file, relative to the output directory.
    pub credential_file: PathBuf,
    /// Number of managed data disks to attach.
    pub disk_count: u32,
    /// Size of each data disk in GB.
    pub disk_size_gb: u32,
    /// Azure region.
    pub location: String,
}

impl DeployConfig {
    /// Public hostname Azure assigns to the VM's DNS label.
    #[must_use]
    pub fn public_hostname(&self) -> String {
        public_hostname(&self.cluster_name, &self.location)
    }
}

/// `<name>.<location>.cloudapp.azure.com`
#[must_use]
pub fn public_hostname(cluster_name: &str, location: &str) -> String {
    format!("{cluster_name}.{location}.cloudapp.azure.com")
}

/// Name of the `index`-th data disk attached to `vm_name`. Indices start at 1.
#[must_use]
pub fn disk_name(vm_name: &str, index: u32) -> String {
    format!("{vm_name}-{index}")
}

// ── VM profile ───────────────────────────────────────────────────────────────

/// Fixed shape of the hub machine and its bootstrap payload.
///
/// Every field has a default; a YAML profile may override any subset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VmProfile {
    pub vm_name: String,
    pub admin_user: String,
    pub size: String,
    pub storage_sku: String,
    pub image: String,
    /// Role granted to the service principal on the subscription.
    pub sp_role: String,
    pub extension: ExtensionProfile,
    pub playbook: PlaybookProfile,
}

impl Default for VmProfile {
    fn default() -> Self {
        Self {
            vm_name: "hub".to_string(),
            admin_user: "jupyterhub".to_string(),
            size: "Standard_E4s_v3".to_string(),
            storage_sku: "Premium_LRS".to_string(),
            image: "canonical:ubuntuserver:17.04:latest".to_string(),
            sp_role: "Contributor".to_string(),
            extension: ExtensionProfile::default(),
            playbook: PlaybookProfile::default(),
        }
    }
}

/// Custom-script VM extension applied after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExtensionProfile {
    pub name: String,
    pub publisher: String,
    /// Local settings document handed to `az vm extension set --settings`.
    pub settings: PathBuf,
}

impl Default for ExtensionProfile {
    fn default() -> Self {
        Self {
            name: "customScript".to_string(),
            publisher: "Microsoft.Azure.Extensions".to_string(),
            settings: PathBuf::from("./script-config.json"),
        }
    }
}

/// Configuration repository cloned onto the hub and its bootstrap entrypoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlaybookProfile {
    pub repository: String,
    /// Directory the clone lands in, relative to the admin user's home.
    pub directory: String,
    pub bootstrap_script: String,
}

impl Default for PlaybookProfile {
    fn default() -> Self {
        Self {
            repository: "https://github.com/ryanlovett/data100.git".to_string(),
            directory: "data100".to_string(),
            bootstrap_script: "bootstrap.bash".to_string(),
        }
    }
}

impl PlaybookProfile {
    /// Remote command that clones the repository into the home directory.
    #[must_use]
    pub fn clone_command(&self) -> String {
        format!("git clone {}", self.repository)
    }

    /// Remote command that runs the bootstrap script as root for `cluster_name`.
    #[must_use]
    pub fn bootstrap_command(&self, cluster_name: &str) -> String {
        format!(
            "sudo bash {}/{} {cluster_name}",
            self.directory, self.bootstrap_script
        )
    }
}

// ── Validators ───────────────────────────────────────────────────────────────

/// Validates a cluster name.
///
/// # Errors
///
/// Returns an error if the name is not a valid lowercase DNS label.
pub fn validate_cluster_name(name: &str) -> Result<()> {
    if !CLUSTER_NAME_RE.is_match(name) {
        return Err(ProvisionError::InvalidClusterName(name.to_string()).into());
    }
    Ok(())
}
