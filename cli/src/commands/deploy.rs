//! `jhub`: provision the hub VM for one cluster.

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::application::ports::ProfileStore as _;
use crate::application::services::provision::{self as service, ProvisionOptions};
use crate::domain::DeployConfig;
use crate::domain::config::{
    DEFAULT_CREDENTIAL_FILE, DEFAULT_DISK_COUNT, DEFAULT_DISK_SIZE_GB, DEFAULT_LOCATION,
    validate_cluster_name,
};
use crate::infra::config::YamlProfileStore;
use crate::output::{human, json};

/// Arguments for a deployment.
#[derive(Args, Debug)]
pub struct DeployArgs {
    /// Azure subscription id
    #[arg(short = 's', value_name = "SUBSCRIPTION_ID", env = "AZURE_SUBSCRIPTION_ID")]
    pub subscription_id: String,

    /// Cluster name: a lowercase DNS label of 3-63 characters (letters,
    /// digits, hyphens). Names the output directory, resource group and
    /// public hostname
    #[arg(short = 'n', value_name = "NAME", value_parser = parse_cluster_name)]
    pub name: String,

    /// Service principal file, relative to the output directory; created if missing
    #[arg(short = 'r', value_name = "RBAC", default_value = DEFAULT_CREDENTIAL_FILE)]
    pub rbac: PathBuf,

    /// Managed disk count
    #[arg(short = 'd', value_name = "DISKS", default_value_t = DEFAULT_DISK_COUNT)]
    pub disks: u32,

    /// Disk size (GB)
    #[arg(
        short = 'D',
        value_name = "DISK_SIZE",
        default_value_t = DEFAULT_DISK_SIZE_GB,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub disk_size: u32,

    /// Azure region
    #[arg(short = 'l', value_name = "LOCATION", default_value = DEFAULT_LOCATION)]
    pub location: String,

    /// YAML file overriding the VM profile [default: ~/.jhub/profile.yaml]
    #[arg(long, value_name = "PATH", env = "JHUB_PROFILE")]
    pub profile: Option<PathBuf>,
}

fn parse_cluster_name(name: &str) -> Result<String, String> {
    validate_cluster_name(name)
        .map(|()| name.to_owned())
        .map_err(|e| e.to_string())
}

impl DeployArgs {
    /// Deployment parameters for the provisioning service.
    #[must_use]
    pub fn to_config(&self) -> DeployConfig {
        DeployConfig {
            subscription_id: self.subscription_id.clone(),
            cluster_name: self.name.clone(),
            credential_file: self.rbac.clone(),
            disk_count: self.disks,
            disk_size_gb: self.disk_size,
            location: self.location.clone(),
        }
    }
}

/// Run a deployment.
///
/// # Errors
///
/// Returns an error if the profile cannot be loaded or a provisioning step fails.
pub async fn run(args: &DeployArgs, app: &AppContext) -> Result<()> {
    let profile = YamlProfileStore::new(args.profile.clone()).load()?;
    let config = args.to_config();
    let reporter = app.terminal_reporter();
    tracing::info!(cluster = %config.cluster_name, location = %config.location, "starting deployment");

    let report = service::provision_cluster(
        &app.control_plane,
        &app.ssh,
        &app.ssh,
        &app.local_fs,
        ProvisionOptions {
            reporter: &reporter,
            config: &config,
            profile: &profile,
            base_dir: Path::new(""),
        },
    )
    .await?;

    if app.is_json() {
        println!("{}", json::format_report(&report)?);
    } else {
        human::print_report(&app.output, &report);
    }
    Ok(())
}
