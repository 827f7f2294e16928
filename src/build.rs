//! Runs the project's external build.

use std::path::{Path, PathBuf};
use std::process::Command;

use crate::config::BuildConfig;
use crate::error::{ReleaseError, Result};

/// Something that can produce the release artifacts.
pub trait Builder {
    /// Runs the build to completion; any failure is fatal for the release.
    fn build(&self) -> Result<()>;
}

/// Runs a configured command (`npm run build` by default) in the project root.
///
/// Output is inherited so the user sees the build tool's own progress.
#[derive(Debug, Clone)]
pub struct CommandBuilder {
    program: String,
    args: Vec<String>,
    working_dir: PathBuf,
}

impl CommandBuilder {
    pub fn new(
        program: impl Into<String>,
        args: Vec<String>,
        working_dir: impl Into<PathBuf>,
    ) -> Self {
        CommandBuilder {
            program: program.into(),
            args,
            working_dir: working_dir.into(),
        }
    }

    pub fn from_config(config: &BuildConfig, working_dir: &Path) -> Self {
        Self::new(config.program.clone(), config.args.clone(), working_dir)
    }

    fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Builder for CommandBuilder {
    fn build(&self) -> Result<()> {
        log::debug!(
            "running `{}` in {}",
            self.command_line(),
            self.working_dir.display()
        );

        let status = Command::new(&self.program)
            .args(&self.args)
            .current_dir(&self.working_dir)
            .status()
            .map_err(|e| {
                ReleaseError::build(format!("could not run `{}`: {}", self.command_line(), e))
            })?;

        if !status.success() {
            let code = status
                .code()
                .map(|c| c.to_string())
                .unwrap_or_else(|| "signal".to_string());
            return Err(ReleaseError::build(format!(
                "`{}` exited with {}",
                self.command_line(),
                code
            )));
        }

        Ok(())
    }
}
