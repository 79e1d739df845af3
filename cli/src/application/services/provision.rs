//! Application service: cluster provisioning use-case.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.
//! All I/O is routed through injected port traits.
//!
//! The sequence is strictly linear. Every step that owns a local artifact or
//! a named Azure object checks for it first and skips creation when it is
//! already there; VM creation, disk attachment and the extension are issued
//! on every run. The first failing step aborts the run with no rollback,
//! except the remote-access check, which only warns.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;

use crate::application::ports::{
    ControlPlane, KeyGenerator, LocalFs, ProgressReporter, RemoteShell,
};
use crate::domain::azure::{find_group, snapshot_json};
use crate::domain::config::disk_name;
use crate::domain::{
    DeployConfig, DiskRequest, ExtensionRequest, ProvisionError, ProvisionReport,
    ServicePrincipal, SshTarget, VmProfile, VmRequest, WorkspaceLayout,
};

/// Inputs of one provisioning run.
pub struct ProvisionOptions<'a, R: ProgressReporter> {
    pub reporter: &'a R,
    pub config: &'a DeployConfig,
    pub profile: &'a VmProfile,
    /// Directory the cluster's output directory is created in.
    pub base_dir: &'a Path,
}

/// Provision the hub VM for `opts.config`, creating what is missing.
///
/// Accepts port trait bounds so the caller can inject real or mock
/// implementations. The service never touches `OutputContext` or any
/// presentation type.
///
/// # Errors
///
/// Returns an error from the first step that fails, other than the
/// remote-access check.
pub async fn provision_cluster(
    control_plane: &impl ControlPlane,
    keygen: &impl KeyGenerator,
    shell: &impl RemoteShell,
    local_fs: &impl LocalFs,
    opts: ProvisionOptions<'_, impl ProgressReporter>,
) -> Result<ProvisionReport> {
    let ProvisionOptions {
        reporter,
        config,
        profile,
        base_dir,
    } = opts;
    let started_at = Utc::now();
    let layout = WorkspaceLayout::new(base_dir, config, &profile.vm_name);

    // Step 1: Output directory.
    ensure_workspace(local_fs, &layout)?;

    // Step 2: Key pair.
    let key_generated = ensure_key_pair(keygen, local_fs, &layout, reporter).await?;

    // Step 3: Subscription.
    reporter.step(&format!("selecting subscription {}...", config.subscription_id));
    control_plane
        .set_subscription(&config.subscription_id)
        .await
        .context("selecting subscription")?;

    // Step 4: Service principal.
    let (_credential, credential_created) =
        ensure_service_principal(control_plane, local_fs, &layout, config, profile, reporter)
            .await?;

    // Step 5: Resource group.
    let group_created = ensure_resource_group(control_plane, config, reporter).await?;

    // Step 6: Hub VM.
    reporter.step(&format!("creating VM '{}'...", profile.vm_name));
    create_vm(control_plane, local_fs, &layout, config, profile).await?;
    reporter.success(&format!("VM '{}' created", profile.vm_name));

    // Step 7: Data disks.
    let disks_attached = attach_disks(control_plane, config, profile, reporter).await?;

    // Step 8: Bootstrap extension.
    reporter.step(&format!("installing extension '{}'...", profile.extension.name));
    install_extension(control_plane, config, profile).await?;

    // Steps 9-11: Remote configuration.
    let target = SshTarget {
        host: config.public_hostname(),
        user: profile.admin_user.clone(),
        identity: layout.private_key(),
        clear_agent_socket: true,
    };
    let remote_access_verified = verify_remote_access(shell, &target, reporter).await;

    reporter.step(&format!("cloning {}...", profile.playbook.repository));
    shell
        .exec(&target, &profile.playbook.clone_command())
        .await
        .context("cloning configuration repository")?;

    reporter.step("running bootstrap script...");
    shell
        .exec(&target, &profile.playbook.bootstrap_command(&config.cluster_name))
        .await
        .context("running bootstrap script")?;
    reporter.success(&format!("hub ready at {}", target.host));

    Ok(ProvisionReport {
        cluster: config.cluster_name.clone(),
        resource_group: config.cluster_name.clone(),
        location: config.location.clone(),
        hostname: target.host,
        admin_user: target.user,
        private_key: target.identity,
        key_generated,
        credential_created,
        group_created,
        disks_attached,
        remote_access_verified,
        started_at,
        finished_at: Utc::now(),
    })
}

/// Create the output directory unless it already exists.
///
/// # Errors
///
/// Returns [`ProvisionError::NotADirectory`] when the path exists but is not
/// a directory, or an error if the directory cannot be created.
pub fn ensure_workspace(local_fs: &impl LocalFs, layout: &WorkspaceLayout) -> Result<()> {
    let root = layout.root();
    if !local_fs.exists(root) {
        return local_fs.create_dir(root);
    }
    if !local_fs.is_dir(root) {
        return Err(ProvisionError::NotADirectory {
            path: root.to_path_buf(),
        }
        .into());
    }
    tracing::debug!(path = %root.display(), "reusing output directory");
    Ok(())
}

/// Generate the key pair unless the private key exists, then read the public key.
///
/// Returns `true` when a new pair was generated.
///
/// # Errors
///
/// Returns an error if generation fails or the public key cannot be read.
pub async fn ensure_key_pair(
    keygen: &impl KeyGenerator,
    local_fs: &impl LocalFs,
    layout: &WorkspaceLayout,
    reporter: &impl ProgressReporter,
) -> Result<bool> {
    let private_key = layout.private_key();
    let generated = if local_fs.exists(&private_key) {
        tracing::info!(path = %private_key.display(), "reusing existing key pair");
        false
    } else {
        reporter.step("generating SSH key pair...");
        keygen
            .generate_key_pair(&private_key)
            .await
            .context("generating SSH key pair")?;
        true
    };

    let public_key = local_fs
        .read_to_string(&layout.public_key())
        .context("reading SSH public key")?;
    tracing::debug!(key = %public_key.trim(), "hub public key");
    Ok(generated)
}

/// Load the credential file, creating the service principal if it is absent.
///
/// Returns the parsed credential and `true` when it was newly created.
///
/// # Errors
///
/// Returns an error if creation, persistence, loading or parsing fails.
pub async fn ensure_service_principal(
    control_plane: &impl ControlPlane,
    local_fs: &impl LocalFs,
    layout: &WorkspaceLayout,
    config: &DeployConfig,
    profile: &VmProfile,
    reporter: &impl ProgressReporter,
) -> Result<(ServicePrincipal, bool)> {
    let path = layout.credential();
    let (raw, created) = if local_fs.exists(&path) {
        tracing::info!(path = %path.display(), "loading existing service principal");
        let raw = local_fs
            .read_to_string(&path)
            .context("loading service principal")?;
        (raw, false)
    } else {
        reporter.step("creating service principal...");
        let raw = control_plane
            .create_service_principal(&config.subscription_id, &profile.sp_role)
            .await
            .context("creating service principal")?;
        local_fs
            .write(&path, &raw)
            .context("saving service principal")?;
        (raw, true)
    };
    let credential = ServicePrincipal::parse(&raw)?;
    Ok((credential, created))
}

/// Create the resource group unless one with the exact cluster name exists.
///
/// Returns `true` when the group was created.
///
/// # Errors
///
/// Returns an error if the query or creation fails.
pub async fn ensure_resource_group(
    control_plane: &impl ControlPlane,
    config: &DeployConfig,
    reporter: &impl ProgressReporter,
) -> Result<bool> {
    let name = &config.cluster_name;
    let groups = control_plane
        .list_groups(name)
        .await
        .context("listing resource groups")?;
    if find_group(&groups, name).is_some() {
        reporter.success(&format!("Using existing group: {name}"));
        return Ok(false);
    }
    reporter.step(&format!("Creating group: {name}"));
    control_plane
        .create_group(name, &config.location)
        .await
        .context("creating resource group")?;
    Ok(true)
}

/// Create the hub VM and snapshot the response next to the other artifacts.
///
/// # Errors
///
/// Returns an error if creation fails or the snapshot cannot be written.
pub async fn create_vm(
    control_plane: &impl ControlPlane,
    local_fs: &impl LocalFs,
    layout: &WorkspaceLayout,
    config: &DeployConfig,
    profile: &VmProfile,
) -> Result<()> {
    let public_key = layout.public_key();
    let request = VmRequest {
        name: &profile.vm_name,
        resource_group: &config.cluster_name,
        admin_user: &profile.admin_user,
        ssh_public_key: &public_key,
        size: &profile.size,
        storage_sku: &profile.storage_sku,
        image: &profile.image,
        dns_label: &config.cluster_name,
    };
    let response = control_plane
        .create_vm(&request)
        .await
        .context("creating VM")?;
    local_fs
        .write(&layout.vm_record(), &snapshot_json(&response)?)
        .context("saving VM record")
}

/// Attach `config.disk_count` new managed disks named `<vm>-1` .. `<vm>-N`.
///
/// Returns the names of the attached disks.
///
/// # Errors
///
/// Returns an error on the first attachment that fails.
pub async fn attach_disks(
    control_plane: &impl ControlPlane,
    config: &DeployConfig,
    profile: &VmProfile,
    reporter: &impl ProgressReporter,
) -> Result<Vec<String>> {
    let mut attached = Vec::new();
    for index in 1..=config.disk_count {
        let name = disk_name(&profile.vm_name, index);
        reporter.step(&format!(
            "attaching disk {name} ({} GB, {})...",
            config.disk_size_gb, profile.storage_sku
        ));
        control_plane
            .attach_disk(&DiskRequest {
                disk_name: &name,
                resource_group: &config.cluster_name,
                vm_name: &profile.vm_name,
                size_gb: config.disk_size_gb,
                sku: &profile.storage_sku,
            })
            .await
            .with_context(|| format!("attaching disk {name}"))?;
        attached.push(name);
    }
    Ok(attached)
}

/// Apply the custom-script extension to the hub.
///
/// # Errors
///
/// Returns an error if the extension cannot be set.
pub async fn install_extension(
    control_plane: &impl ControlPlane,
    config: &DeployConfig,
    profile: &VmProfile,
) -> Result<()> {
    control_plane
        .set_extension(&ExtensionRequest {
            resource_group: &config.cluster_name,
            vm_name: &profile.vm_name,
            name: &profile.extension.name,
            publisher: &profile.extension.publisher,
            settings: &profile.extension.settings,
        })
        .await
        .context("installing VM extension")
}

/// Run a no-op command on the hub. Failure is reported, never propagated.
pub async fn verify_remote_access(
    shell: &impl RemoteShell,
    target: &SshTarget,
    reporter: &impl ProgressReporter,
) -> bool {
    reporter.step(&format!("verifying SSH access to {}...", target.host));
    match shell.exec(target, "true").await {
        Ok(()) => true,
        Err(e) => {
            let command = target.display_command("true");
            let error = format!("{e:#}");
            tracing::info!(%command, %error, "SSH verification failed");
            reporter.warn(&format!("Error running command:\n{command}\n{error}"));
            false
        }
    }
}
