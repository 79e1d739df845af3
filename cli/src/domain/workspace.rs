//! Workspace layout: where each cluster's local artifacts live.
//!
//! This module is intentionally free of I/O, async, and external layer imports.
//! All functions take data in and return data out.

use std::path::{Path, PathBuf};

use crate::domain::config::DeployConfig;

/// File name of the generated private key; the public key appends `.pub`.
pub const PRIVATE_KEY_FILE: &str = "id_rsa";

/// Paths of every artifact owned by one cluster's output directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspaceLayout {
    root: PathBuf,
    credential_file: PathBuf,
    vm_name: String,
}

impl WorkspaceLayout {
    /// Layout rooted at `<base>/<cluster name>`.
    #[must_use]
    pub fn new(base: &Path, config: &DeployConfig, vm_name: &str) -> Self {
        Self {
            root: base.join(&config.cluster_name),
            credential_file: config.credential_file.clone(),
            vm_name: vm_name.to_owned(),
        }
    }

    /// The output directory itself.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[must_use]
    pub fn private_key(&self) -> PathBuf {
        self.root.join(PRIVATE_KEY_FILE)
    }

    #[must_use]
    pub fn public_key(&self) -> PathBuf {
        self.root.join(format!("{PRIVATE_KEY_FILE}.pub"))
    }

    /// Service principal document, relative to the output directory.
    #[must_use]
    pub fn credential(&self) -> PathBuf {
        self.root.join(&self.credential_file)
    }

    /// Snapshot of the `az vm create` response.
    #[must_use]
    pub fn vm_record(&self) -> PathBuf {
        self.root.join(format!("{}.json", self.vm_name))
    }
}
