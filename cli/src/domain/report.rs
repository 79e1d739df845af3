//! Outcome of one provisioning run.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::Serialize;

/// What each idempotent step decided, for the human summary and `--json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProvisionReport {
    pub cluster: String,
    pub resource_group: String,
    pub location: String,
    pub hostname: String,
    pub admin_user: String,
    pub private_key: PathBuf,
    /// `false` when an existing key pair was reused.
    pub key_generated: bool,
    /// `false` when an existing credential file was loaded.
    pub credential_created: bool,
    /// `false` when a group with the cluster name already existed.
    pub group_created: bool,
    pub disks_attached: Vec<String>,
    /// `false` when the pre-flight `ssh … true` failed and the run continued.
    pub remote_access_verified: bool,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}
