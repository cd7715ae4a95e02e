//! User interface module - terminal output for the bump workflow.
//!
//! - `formatter` - Pure formatting functions
//! - This module - Printing, stdout for progress and stderr for problems

pub mod formatter;

use crate::boundary::BoundaryWarning;
use crate::cli::orchestration::WorkflowResult;

/// Print an error message to stderr.
pub fn display_error(message: &str) {
    eprintln!("{}", formatter::format_error(message));
}

/// Print a success message.
pub fn display_success(message: &str) {
    println!("{}", formatter::format_success(message));
}

/// Print a status message.
pub fn display_status(message: &str) {
    println!("{}", formatter::format_status(message));
}

/// Print a boundary warning to stderr.
pub fn display_boundary_warning(warning: &BoundaryWarning) {
    eprintln!("{}", formatter::format_warning(&warning.to_string()));
}

/// Print the command to publish an unpushed commit.
pub fn display_manual_push_instruction(remote: &str, branch: &str) {
    println!("\n{}", formatter::format_manual_push(remote, branch));
}

/// Print what a run did, or would do on a dry run.
///
/// Warnings collected during the run go to stderr first.
pub fn display_summary(result: &WorkflowResult, remote: &str, branch: &str) {
    for warning in &result.warnings {
        display_boundary_warning(warning);
    }

    if let Some(commit) = &result.commit {
        display_success(&format!(
            "Updated {} to version {}",
            result.manifest.display(),
            result.next
        ));
        display_success(&format!(
            "Created commit {}: {}",
            commit.short_hash(),
            result.message
        ));
    }

    println!(
        "\n{}\n",
        formatter::format_version_change(
            &result.manifest.display().to_string(),
            &result.previous,
            &result.next
        )
    );

    match &result.commit {
        None => {
            display_status("Dry run, nothing written:");
            display_success(&format!(
                "  Step 1: would rewrite {} to version {}",
                result.manifest.display(),
                result.next
            ));
            display_success(&format!(
                "  Step 2: would stage all changes and commit \"{}\"",
                result.message
            ));
            display_success(&format!("  Step 3: would push HEAD to {}/{}", remote, branch));
        }
        Some(commit) if result.pushed => {
            display_success(&format!(
                "Published {} ({}) to {}/{}",
                result.next,
                commit.short_hash(),
                remote,
                branch
            ));
        }
        Some(commit) => {
            display_success(&format!(
                "Committed {} ({}) locally",
                result.next,
                commit.short_hash()
            ));
            display_manual_push_instruction(remote, branch);
        }
    }
}
