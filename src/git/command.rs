use std::path::PathBuf;
use std::process::Command;

use crate::error::{ReleaseError, Result, VcsStep};
use crate::git::Vcs;

/// [Vcs] implementation driving the system `git` binary.
///
/// Each call is a separate process whose exit status gates the next step.
#[derive(Debug, Clone)]
pub struct GitCli {
    working_dir: PathBuf,
    remote: String,
}

impl GitCli {
    pub fn new(working_dir: impl Into<PathBuf>, remote: impl Into<String>) -> Self {
        GitCli {
            working_dir: working_dir.into(),
            remote: remote.into(),
        }
    }

    fn run(&self, step: VcsStep, args: &[&str]) -> Result<()> {
        log::debug!("running `git {}`", args.join(" "));

        let output = Command::new("git")
            .args(args)
            .current_dir(&self.working_dir)
            .output()
            .map_err(|e| ReleaseError::vcs(step, format!("could not run git: {}", e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let stdout = String::from_utf8_lossy(&output.stdout);
            let detail = if stderr.trim().is_empty() {
                stdout.trim().to_string()
            } else {
                stderr.trim().to_string()
            };
            return Err(ReleaseError::vcs(
                step,
                format!(
                    "`git {}` exited with {}: {}",
                    args.join(" "),
                    output.status.code().unwrap_or(-1),
                    detail
                ),
            ));
        }

        Ok(())
    }
}

impl Vcs for GitCli {
    fn add(&self, paths: &[String]) -> Result<()> {
        let mut args = vec!["add", "--"];
        args.extend(paths.iter().map(String::as_str));
        self.run(VcsStep::Add, &args)
    }

    fn commit(&self, message: &str) -> Result<()> {
        self.run(VcsStep::Commit, &["commit", "-m", message])
    }

    fn push(&self) -> Result<()> {
        self.run(VcsStep::Push, &["push", self.remote.as_str(), "HEAD"])
    }

    fn tag(&self, name: &str, message: &str) -> Result<()> {
        self.run(VcsStep::Tag, &["tag", "-a", name, "-m", message])
    }

    fn push_tags(&self) -> Result<()> {
        self.run(VcsStep::PushTags, &["push", self.remote.as_str(), "--tags"])
    }
}
