//! Azure control-plane records and request shapes.
//!
//! Records are parsed from `az` JSON output; requests carry exactly what an
//! `az` invocation needs. Nothing here performs I/O.

use std::fmt;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::ser::PrettyFormatter;

// ── Records ──────────────────────────────────────────────────────────────────

/// One entry of `az group list`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ResourceGroup {
    pub name: String,
    #[serde(default)]
    pub location: Option<String>,
}

/// Returns the group whose name equals `name` exactly, if any.
#[must_use]
pub fn find_group<'a>(groups: &'a [ResourceGroup], name: &str) -> Option<&'a ResourceGroup> {
    groups.iter().find(|g| g.name == name)
}

/// Parse the JSON array printed by `az group list`.
///
/// # Errors
///
/// Returns an error if the output is not a JSON array of groups.
pub fn parse_groups(json: &str) -> Result<Vec<ResourceGroup>> {
    serde_json::from_str(json).context("parsing az group list output")
}

/// Service principal document printed by `az ad sp create-for-rbac`.
///
/// Loaded on every run; nothing downstream consumes it yet.
#[derive(Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ServicePrincipal {
    pub app_id: Option<String>,
    pub display_name: Option<String>,
    pub name: Option<String>,
    pub password: Option<String>,
    pub tenant: Option<String>,
}

impl fmt::Debug for ServicePrincipal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServicePrincipal")
            .field("app_id", &self.app_id)
            .field("display_name", &self.display_name)
            .field("name", &self.name)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("tenant", &self.tenant)
            .finish()
    }
}

impl ServicePrincipal {
    /// Parse a credential document.
    ///
    /// # Errors
    ///
    /// Returns an error if `json` is not a JSON object.
    pub fn parse(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("parsing service principal credential")
    }
}

// ── Requests ─────────────────────────────────────────────────────────────────

/// Arguments for `az vm create`.
#[derive(Debug, Clone, Copy)]
pub struct VmRequest<'a> {
    pub name: &'a str,
    pub resource_group: &'a str,
    pub admin_user: &'a str,
    pub ssh_public_key: &'a Path,
    pub size: &'a str,
    pub storage_sku: &'a str,
    pub image: &'a str,
    /// DNS label for the public IP; yields `<label>.<location>.cloudapp.azure.com`.
    pub dns_label: &'a str,
}

/// Arguments for `az vm disk attach --new`.
#[derive(Debug, Clone, Copy)]
pub struct DiskRequest<'a> {
    pub disk_name: &'a str,
    pub resource_group: &'a str,
    pub vm_name: &'a str,
    pub size_gb: u32,
    pub sku: &'a str,
}

/// Arguments for `az vm extension set`.
#[derive(Debug, Clone, Copy)]
pub struct ExtensionRequest<'a> {
    pub resource_group: &'a str,
    pub vm_name: &'a str,
    pub name: &'a str,
    pub publisher: &'a str,
    pub settings: &'a Path,
}

// ── Snapshots ────────────────────────────────────────────────────────────────

/// Render an `az` response as a 4-space indented JSON document.
///
/// Output that is not valid JSON is stored as a JSON string so the raw
/// response is never lost.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn snapshot_json(raw: &str) -> Result<String> {
    let value = serde_json::from_str::<serde_json::Value>(raw)
        .unwrap_or_else(|_| serde_json::Value::String(raw.to_owned()));
    let mut buf = Vec::new();
    let mut ser =
        serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    value
        .serialize(&mut ser)
        .context("serializing response snapshot")?;
    String::from_utf8(buf).context("snapshot is not valid UTF-8")
}
