//! Git operations abstraction layer
//!
//! The release commit is made through the [Vcs] trait so the step sequence
//! can run against the real `git` binary or against a recording mock.
//!
//! - [command::GitCli]: invokes the system `git`, one process per step
//! - [mock::MockVcs]: records calls and can fail at a chosen step
//! - [repository::RepoInfo]: read-only repository inspection through `git2`

pub mod command;
pub mod mock;
pub mod repository;

pub use command::GitCli;
pub use mock::{MockVcs, VcsCall};
pub use repository::{github_slug_from_url, RepoInfo};

use crate::error::Result;

/// The mutating git operations a release performs.
///
/// Every method maps its failure to [crate::error::ReleaseError::VcsStep]
/// naming the step that failed.
pub trait Vcs {
    /// Stage the given paths
    fn add(&self, paths: &[String]) -> Result<()>;

    /// Commit what is staged
    fn commit(&self, message: &str) -> Result<()>;

    /// Push the current branch
    fn push(&self) -> Result<()>;

    /// Create an annotated tag on HEAD
    fn tag(&self, name: &str, message: &str) -> Result<()>;

    /// Push all tags
    fn push_tags(&self) -> Result<()>;
}
