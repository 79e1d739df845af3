//! Infrastructure implementation of the control-plane port traits.
//!
//! `AzureCli<R>` routes every control-plane call through the `az` command
//! line via a `CommandRunner`, and turns a non-zero exit into a
//! [`ProvisionError::CommandFailed`].

use std::process::Output;

use anyhow::{Context, Result};

use crate::application::ports::{AccountManager, CommandRunner, ResourceGroupManager, VmManager};
use crate::domain::azure::parse_groups;
use crate::domain::{DiskRequest, ExtensionRequest, ProvisionError, ResourceGroup, VmRequest};

const AZ: &str = "az";

/// Infrastructure adapter that routes all `az` CLI calls through a `CommandRunner`.
///
/// Generic over `R: CommandRunner` so that tests can inject a mock runner
/// without spawning real processes.
pub struct AzureCli<R: CommandRunner> {
    runner: R,
}

impl<R: CommandRunner> AzureCli<R> {
    /// Create an adapter with an explicit runner instance.
    pub fn new(runner: R) -> Self {
        Self { runner }
    }

    /// Run `az` and return its stdout, failing on a non-zero exit.
    async fn az(&self, args: &[&str]) -> Result<String> {
        let output = self.runner.run(AZ, args).await?;
        stdout_if_success(AZ, args, output)
    }
}

fn stdout_if_success(program: &str, args: &[&str], output: Output) -> Result<String> {
    if !output.status.success() {
        return Err(ProvisionError::command_failed(
            program,
            args,
            output.status.code(),
            &output.stderr,
        )
        .into());
    }
    String::from_utf8(output.stdout).with_context(|| format!("{program} printed invalid UTF-8"))
}

impl<R: CommandRunner> AccountManager for AzureCli<R> {
    async fn set_subscription(&self, subscription_id: &str) -> Result<()> {
        self.az(&["account", "set", "-s", subscription_id])
            .await
            .context("az account set")?;
        Ok(())
    }

    async fn create_service_principal(
        &self,
        subscription_id: &str,
        role: &str,
    ) -> Result<String> {
        let scopes = format!("--scopes=/subscriptions/{subscription_id}");
        let role = format!("--role={role}");
        self.az(&["ad", "sp", "create-for-rbac", &scopes, &role])
            .await
            .context("az ad sp create-for-rbac")
    }
}

impl<R: CommandRunner> ResourceGroupManager for AzureCli<R> {
    async fn list_groups(&self, name: &str) -> Result<Vec<ResourceGroup>> {
        let query = format!("[?name=='{name}']");
        let json = self
            .az(&["group", "list", "--query", &query])
            .await
            .context("az group list")?;
        parse_groups(&json)
    }

    async fn create_group(&self, name: &str, location: &str) -> Result<()> {
        self.az(&["group", "create", "-n", name, "-l", location])
            .await
            .context("az group create")?;
        Ok(())
    }
}

impl<R: CommandRunner> VmManager for AzureCli<R> {
    async fn create_vm(&self, request: &VmRequest<'_>) -> Result<String> {
        let key = request.ssh_public_key.display().to_string();
        self.az(&[
            "vm",
            "create",
            "-n",
            request.name,
            "--admin-username",
            request.admin_user,
            "--resource-group",
            request.resource_group,
            "--ssh-key-value",
            &key,
            "--size",
            request.size,
            "--storage-sku",
            request.storage_sku,
            "--image",
            request.image,
            "--public-ip-address-dns-name",
            request.dns_label,
        ])
        .await
        .context("az vm create")
    }

    async fn attach_disk(&self, request: &DiskRequest<'_>) -> Result<()> {
        let size = request.size_gb.to_string();
        self.az(&[
            "vm",
            "disk",
            "attach",
            "--new",
            "--disk",
            request.disk_name,
            "--resource-group",
            request.resource_group,
            "--vm-name",
            request.vm_name,
            "--size-gb",
            &size,
            "--sku",
            request.sku,
        ])
        .await
        .context("az vm disk attach")?;
        Ok(())
    }

    async fn set_extension(&self, request: &ExtensionRequest<'_>) -> Result<()> {
        let settings = request.settings.display().to_string();
        self.az(&[
            "vm",
            "extension",
            "set",
            "--resource-group",
            request.resource_group,
            "--vm-name",
            request.vm_name,
            "--name",
            request.name,
            "--publisher",
            request.publisher,
            "--settings",
            &settings,
        ])
        .await
        .context("az vm extension set")?;
        Ok(())
    }
}
