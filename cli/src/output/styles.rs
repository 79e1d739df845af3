//! Output styles using owo-colors stylesheet pattern

use owo_colors::Style;

/// Centralized stylesheet for CLI output colors.
///
/// Every field is unstyled by default so piped output and `--no-color`
/// print plain text.
#[derive(Default, Clone)]
pub struct Styles {
    /// Completed steps (green)
    pub success: Style,
    /// Non-fatal failures such as the SSH pre-check (yellow)
    pub warning: Style,
    /// In-progress steps (cyan)
    pub step: Style,
    /// Report keys
    pub dim: Style,
    /// Report title
    pub header: Style,
    /// Copy-pasteable shell commands
    pub command: Style,
}

impl Styles {
    /// Apply colors to the stylesheet.
    pub fn colorize(&mut self) {
        self.success = Style::new().green();
        self.warning = Style::new().yellow();
        self.step = Style::new().cyan();
        self.dim = Style::new().dimmed();
        self.header = Style::new().bold().cyan();
        self.command = Style::new().bold();
    }
}
