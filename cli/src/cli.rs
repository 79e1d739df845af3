//! CLI argument parsing with clap derive

use anyhow::Result;
use clap::Parser;

use crate::app::{AppContext, OutputFlags};
use crate::commands;

/// Deploy JupyterHub on a single Azure VM
#[derive(Parser)]
#[command(name = "jhub", version)]
pub struct Cli {
    /// Output the run report in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,

    /// Log every external command (equivalent to RUST_LOG=debug)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(flatten)]
    pub deploy: commands::deploy::DeployArgs,
}

impl Cli {
    /// Execute the deployment.
    ///
    /// # Errors
    ///
    /// Returns an error if any provisioning step fails.
    pub async fn run(self) -> Result<()> {
        let Cli {
            json,
            quiet,
            no_color,
            verbose: _,
            deploy,
        } = self;
        let app = AppContext::new(&OutputFlags {
            no_color,
            quiet,
            json,
        });
        commands::deploy::run(&deploy, &app).await
    }
}
