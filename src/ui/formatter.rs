//! Pure formatting functions for UI output.
//!
//! Functions here build strings only; printing happens in the parent module.

use console::style;

use crate::version::Version;

/// Error line, red prefix.
pub fn format_error(message: &str) -> String {
    format!("{} {}", style("ERROR:").red().bold(), message)
}

/// Success line with a green checkmark.
pub fn format_success(message: &str) -> String {
    format!("{} {}", style("✓").green(), message)
}

/// Status line with a yellow arrow.
pub fn format_status(message: &str) -> String {
    format!("{} {}", style("→").yellow(), message)
}

/// Warning line with a yellow warning sign.
pub fn format_warning(message: &str) -> String {
    format!("{} {}", style("⚠ WARNING:").yellow(), message)
}

/// The proposed version change for a manifest.
///
/// ```text
/// Version bump (pyproject.toml):
///   From: 1.2.3
///   To:   1.2.4
/// ```
pub fn format_version_change(manifest: &str, old: &Version, new: &Version) -> String {
    format!(
        "{}\n  From: {}\n  To:   {}",
        style(format!("Version bump ({}):", manifest)).bold(),
        style(old).red(),
        style(new).green()
    )
}

/// The git command an operator can run to publish a local commit.
pub fn format_manual_push(remote: &str, branch: &str) -> String {
    format!(
        "{} To push this commit later, run:\n  {}",
        style("→").yellow(),
        style(format!("git push {} HEAD:{}", remote, branch)).cyan()
    )
}
