//! Human-readable summary of a provisioning run.

use owo_colors::OwoColorize as _;

use crate::domain::ProvisionReport;
use crate::output::OutputContext;

fn created_or_reused(created: bool) -> &'static str {
    if created { "created" } else { "reused" }
}

/// Print the end-of-run summary. Suppressed when `quiet`.
pub fn print_report(ctx: &OutputContext, report: &ProvisionReport) {
    if ctx.quiet {
        return;
    }
    println!();
    ctx.header(&format!("Cluster {}", report.cluster));
    ctx.kv("Host", &report.hostname);
    ctx.kv("Location", &report.location);
    ctx.kv("Key pair", created_or_reused(report.key_generated));
    ctx.kv("Service principal", created_or_reused(report.credential_created));
    ctx.kv("Resource group", created_or_reused(report.group_created));
    ctx.kv("Disks", &report.disks_attached.join(", "));
    if !report.remote_access_verified {
        ctx.warn("SSH pre-check failed; remote steps ran regardless.");
    }
    let elapsed = report.finished_at - report.started_at;
    ctx.kv("Elapsed", &format!("{}s", elapsed.num_seconds()));
    let connect = format!(
        "ssh -i {} {}@{}",
        report.private_key.display(),
        report.admin_user,
        report.hostname
    );
    ctx.kv("Connect", &connect.style(ctx.styles.command).to_string());
}
