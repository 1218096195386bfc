//! Pure formatting functions for UI output.
//!
//! This module contains all display/formatting logic separated from user interaction.
//! Errors and warnings go to stderr, everything else to stdout.

use std::path::{Path, PathBuf};

use console::style;

use crate::boundary::BoundaryWarning;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red().bold(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Format and print a cancellation notice in red.
pub fn display_cancelled(message: &str) {
    println!("{}", style(message).red().reverse());
}

/// Display a boundary warning to the user.
pub fn display_boundary_warning(warning: &BoundaryWarning) {
    eprintln!("{} {}", style("⚠ WARNING:").yellow(), warning);
}

/// Text of the version change line, e.g. "Updating version v1.2.3 to v1.3.0."
pub fn version_change_line(current_tag: &str, new_tag: &str) -> String {
    format!(
        "Updating version {} to {}.",
        style(current_tag).red().reverse(),
        style(new_tag).green().reverse()
    )
}

/// Display the version change being proposed.
pub fn display_version_change(current_tag: &str, new_tag: &str) {
    println!("\n{}", version_change_line(current_tag, new_tag));
}

/// Display the manifest files a release writes, relative to the project root
/// when possible.
pub fn display_updated_files(project_dir: &Path, paths: &[PathBuf]) {
    println!("{}", style("Manifests:").bold());
    for path in paths {
        let shown = path.strip_prefix(project_dir).unwrap_or(path);
        println!("  - {}", shown.display());
    }
}

/// Display what a release would do without doing it.
///
/// # Arguments
/// * `branch` - Branch the release would be committed on
/// * `tag` - Tag that would be created
/// * `remote` - Remote that would receive the push (None when pushing is disabled)
pub fn display_dry_run_plan(branch: &str, tag: &str, remote: Option<&str>) {
    display_status("Dry run:");
    display_success("  Step 1: rewrite the manifests listed above");
    display_success(&format!(
        "  Step 2: commit them on '{}' and create tag {}",
        branch, tag
    ));
    match remote {
        Some(remote) => display_success(&format!(
            "  Step 3: (optional) push '{}' and {} to {}",
            branch, tag, remote
        )),
        None => display_success("  Step 3: skip pushing (--no-push)"),
    }
}

/// Display manual push instruction for a release.
///
/// Shows the git command needed to push the branch and tag to a remote.
pub fn display_manual_push_instruction(remote: &str, branch: &str, tag: &str) {
    println!(
        "\n{} To push this release later, run:\n  {}",
        style("→").yellow(),
        style(format!("git push {} {} {}", remote, branch, tag)).cyan()
    );
}
