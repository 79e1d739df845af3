//! JSON output helpers for `--json` mode.

use anyhow::{Context, Result};

use crate::domain::ProvisionReport;

/// Format a JSON error object for a failed run.
///
/// Output (pretty-printed):
/// ```json
/// {
///   "error": true,
///   "message": "...",
///   "code": "..."
/// }
/// ```
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn format_error(message: &str, code: &str) -> Result<String> {
    let obj = serde_json::json!({
        "error": true,
        "message": message,
        "code": code,
    });
    serde_json::to_string_pretty(&obj).context("JSON serialization failed")
}

/// Format the report of a successful run.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn format_report(report: &ProvisionReport) -> Result<String> {
    serde_json::to_string_pretty(report).context("JSON serialization failed")
}
