//! jhub - Provision a single-node JupyterHub on Azure

use clap::Parser;
use tracing_subscriber::EnvFilter;

use jhub_cli::cli::Cli;
use jhub_cli::domain::ProvisionError;
use jhub_cli::output::json;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let json_mode = cli.json;
    if let Err(e) = cli.run().await {
        let message = format!("{e:#}");
        if json_mode {
            let code = e
                .downcast_ref::<ProvisionError>()
                .map_or("provision_failed", ProvisionError::code);
            match json::format_error(&message, code) {
                Ok(out) => println!("{out}"),
                Err(_) => eprintln!("Error: {message}"),
            }
        } else {
            eprintln!("Error: {message}");
        }
        std::process::exit(1);
    }
}

/// Log to stderr, filtered by `RUST_LOG` (default `warn`, `debug` with `--verbose`).
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
