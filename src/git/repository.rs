use std::path::{Path, PathBuf};

use git2::Repository;
use regex::Regex;

use crate::error::Result;

/// Read-only view of the project's git repository.
///
/// Used for the release summary and to find the GitHub repository a release
/// belongs to; all mutation goes through [super::Vcs].
pub struct RepoInfo {
    repo: Repository,
}

impl RepoInfo {
    /// Discovers the repository containing `path` (or one of its parents).
    pub fn discover<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Repository::discover(path)?;
        Ok(RepoInfo { repo })
    }

    /// Working directory root, `None` for bare repositories
    pub fn root(&self) -> Option<PathBuf> {
        self.repo.workdir().map(Path::to_path_buf)
    }

    /// Name of the checked-out branch.
    ///
    /// `None` when HEAD is detached or the branch has no commits yet.
    pub fn current_branch(&self) -> Option<String> {
        let head = self.repo.head().ok()?;
        if !head.is_branch() {
            return None;
        }
        head.shorthand().map(str::to_string)
    }

    /// URL of the named remote, if configured
    pub fn remote_url(&self, remote: &str) -> Option<String> {
        let remote = self.repo.find_remote(remote).ok()?;
        remote.url().map(str::to_string)
    }

    /// Whether a tag with this name already exists locally
    pub fn tag_exists(&self, tag_name: &str) -> bool {
        self.repo
            .find_reference(&format!("refs/tags/{}", tag_name))
            .is_ok()
    }

    /// `owner/repo` of the named remote when it points at GitHub
    pub fn github_slug(&self, remote: &str) -> Option<String> {
        self.remote_url(remote)
            .as_deref()
            .and_then(github_slug_from_url)
    }
}

/// Extracts `owner/repo` from a GitHub remote URL.
///
/// Handles `https://github.com/owner/repo(.git)`, `git@github.com:owner/repo.git`
/// and `ssh://git@github.com/owner/repo.git`.
pub fn github_slug_from_url(url: &str) -> Option<String> {
    let re = Regex::new(r"github\.com[:/]([^/\s]+)/([^/\s]+?)(?:\.git)?/?$").ok()?;
    let captures = re.captures(url.trim())?;
    Some(format!("{}/{}", &captures[1], &captures[2]))
}
