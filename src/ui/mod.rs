//! User interface module - interaction (prompts) and formatting.
//!
//! Separates concerns:
//! - `formatter` - Pure formatting functions
//! - This module - Interactive prompts and user input handling
//!
//! Prompts read from any [BufRead] so the release workflow can be driven by
//! scripted input in tests and by stdin in the binary.

use std::io::{self, BufRead, Write};

use crate::error::Result;

pub mod formatter;

// Re-export formatter functions for convenience
pub use formatter::{
    display_banner, display_current_version, display_error, display_release_summary,
    display_status, display_success, display_warning, ReleaseSummary,
};

/// Prints `prompt` and blocks for one line of input.
///
/// Only the line terminator is stripped; other whitespace is kept as typed.
///
/// # Returns
/// * `Ok(Some(line))` - A line was read (possibly empty)
/// * `Ok(None)` - Input is closed
/// * `Err` - Reading failed
pub fn prompt_line<R: BufRead>(input: &mut R, prompt: &str) -> Result<Option<String>> {
    print!("{}", prompt);
    io::stdout().flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }

    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }
    Ok(Some(line))
}

/// Asks for the version to release.
pub fn prompt_version<R: BufRead>(input: &mut R) -> Result<Option<String>> {
    prompt_line(input, "Enter new version: ")
}

/// Continue/abort gate before anything is committed.
///
/// Any line, including an empty one, continues. Closed input means abort;
/// Ctrl+C terminates the process before this returns.
pub fn wait_for_confirmation<R: BufRead>(input: &mut R) -> Result<bool> {
    let line = prompt_line(
        input,
        "\nChanges made. Please review and press Enter to commit and push, or Ctrl+C to abort. ",
    )?;
    Ok(line.is_some())
}
