//! Pure formatting functions for UI output.
//!
//! Everything here only prints; reading input lives in the parent module.

use console::style;

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

/// Format and print a non-fatal warning.
pub fn display_warning(message: &str) {
    eprintln!("{} {}", style("⚠ WARNING:").yellow(), message);
}

/// Banner shown once at startup.
pub fn banner_text() -> String {
    format!(
        "{} {}",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION")
    )
}

pub fn display_banner() {
    println!("\n{}\n", style(banner_text()).magenta().bold());
}

pub fn display_current_version(version: &str) {
    println!("Current version: {}", style(version).cyan());
}

/// What is about to be committed, shown before the confirmation gate.
#[derive(Debug, Clone, PartialEq)]
pub struct ReleaseSummary {
    pub old_version: String,
    pub new_version: String,
    pub tag_name: String,
    pub branch: Option<String>,
    pub files: Vec<String>,
    pub github_release: bool,
}

/// Renders the release summary as plain lines (no styling).
pub fn format_release_summary(summary: &ReleaseSummary) -> Vec<String> {
    let mut lines = vec![
        format!("Version: {} -> {}", summary.old_version, summary.new_version),
        format!("Tag:     {}", summary.tag_name),
    ];
    if let Some(branch) = &summary.branch {
        lines.push(format!("Branch:  {}", branch));
    }
    lines.push("Files:".to_string());
    for file in &summary.files {
        lines.push(format!("  - {}", file));
    }
    if summary.github_release {
        lines.push("A GitHub release will be created after pushing.".to_string());
    }
    lines
}

pub fn display_release_summary(summary: &ReleaseSummary) {
    println!("\n{}", style("Release summary:").bold());
    for line in format_release_summary(summary) {
        println!("  {}", line);
    }
}
