//! The release commit: copy the built file into place, then stage, commit,
//! push, tag and push tags.
//!
//! Steps run strictly in order and the first failure stops the sequence.
//! Nothing already done is undone.

use std::fs;
use std::path::Path;

use crate::config::ReleaseConfig;
use crate::error::{ReleaseError, Result, VcsStep};
use crate::git::Vcs;
use crate::version::ReleaseVersion;

/// What the release commit consists of.
#[derive(Debug, Clone, PartialEq)]
pub struct ReleaseCommit {
    pub commit_message: String,
    pub tag_name: String,
    /// Paths staged together, relative to the project root
    pub artifact_paths: Vec<String>,
    /// Build output copied to `published_path` before staging
    pub build_output: String,
    pub published_path: String,
}

impl ReleaseCommit {
    pub fn new(config: &ReleaseConfig, version: &ReleaseVersion) -> Self {
        ReleaseCommit {
            commit_message: version.render(&config.git.commit_template),
            tag_name: version.render(&config.git.tag_template),
            artifact_paths: config.artifact_paths(),
            build_output: config.build.output.clone(),
            published_path: config.build.published.clone(),
        }
    }
}

/// Copies the built output, then commits, pushes and tags the release.
///
/// # Returns
/// * `Ok(())` - Every step succeeded
/// * `Err(VcsStep)` - The first step that failed; later steps were not attempted
pub fn stage_and_commit<V: Vcs + ?Sized>(
    vcs: &V,
    project_root: &Path,
    release: &ReleaseCommit,
) -> Result<()> {
    copy_build_output(project_root, release)?;

    vcs.add(&release.artifact_paths)?;
    vcs.commit(&release.commit_message)?;
    vcs.push()?;
    vcs.tag(&release.tag_name, &release.commit_message)?;
    vcs.push_tags()?;

    Ok(())
}

fn copy_build_output(project_root: &Path, release: &ReleaseCommit) -> Result<()> {
    let from = project_root.join(&release.build_output);
    let to = project_root.join(&release.published_path);
    if is_same_file(&from, &to) {
        // copying a file onto itself would truncate it
        log::debug!("{} is already in place", to.display());
        return Ok(());
    }
    log::debug!("copying {} to {}", from.display(), to.display());

    if let Some(parent) = to.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            ReleaseError::vcs(VcsStep::Copy, format!("{}: {}", parent.display(), e))
        })?;
    }

    fs::copy(&from, &to).map_err(|e| {
        ReleaseError::vcs(
            VcsStep::Copy,
            format!("{} -> {}: {}", from.display(), to.display(), e),
        )
    })?;
    Ok(())
}

fn is_same_file(a: &Path, b: &Path) -> bool {
    if a == b {
        return true;
    }
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::{MockVcs, VcsCall};
    use crate::version::validate;
    use pretty_assertions::assert_eq;

    fn project_with_build_output() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("dist")).unwrap();
        fs::write(dir.path().join("dist/hyper-light-card.js"), "built").unwrap();
        dir
    }

    fn release(version: &str) -> ReleaseCommit {
        ReleaseCommit::new(&ReleaseConfig::default(), &validate(version).unwrap())
    }

    #[test]
    fn test_release_commit_from_defaults() {
        let release = release("2.1.0");
        assert_eq!(release.commit_message, ":rocket: Release version 2.1.0");
        assert_eq!(release.tag_name, "v2.1.0");
        assert_eq!(release.published_path, "hyper-light-card.js");
    }

    #[test]
    fn test_full_sequence() {
        let dir = project_with_build_output();
        let vcs = MockVcs::new();

        stage_and_commit(&vcs, dir.path(), &release("2.1.0")).unwrap();

        assert_eq!(
            fs::read_to_string(dir.path().join("hyper-light-card.js")).unwrap(),
            "built"
        );
        assert_eq!(
            vcs.calls(),
            vec![
                VcsCall::Add(ReleaseConfig::default().artifact_paths()),
                VcsCall::Commit(":rocket: Release version 2.1.0".to_string()),
                VcsCall::Push,
                VcsCall::Tag {
                    name: "v2.1.0".to_string(),
                    message: ":rocket: Release version 2.1.0".to_string(),
                },
                VcsCall::PushTags,
            ]
        );
    }

    #[test]
    fn test_each_failure_stops_later_steps() {
        let order = [
            VcsStep::Add,
            VcsStep::Commit,
            VcsStep::Push,
            VcsStep::Tag,
            VcsStep::PushTags,
        ];

        for (index, failing) in order.iter().enumerate() {
            let dir = project_with_build_output();
            let vcs = MockVcs::failing_at(*failing);

            let err = stage_and_commit(&vcs, dir.path(), &release("1.0.0")).unwrap_err();

            assert_eq!(err.vcs_step(), Some(*failing));
            let steps: Vec<VcsStep> = vcs.calls().iter().map(VcsCall::step).collect();
            assert_eq!(steps, order[..=index].to_vec());
        }
    }

    #[test]
    fn test_output_already_in_published_location_is_kept() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("card.js"), "built").unwrap();
        let mut release = release("1.0.0");
        release.build_output = "./card.js".to_string();
        release.published_path = "card.js".to_string();
        let vcs = MockVcs::new();

        stage_and_commit(&vcs, dir.path(), &release).unwrap();

        assert_eq!(
            fs::read_to_string(dir.path().join("card.js")).unwrap(),
            "built"
        );
        assert_eq!(vcs.calls().len(), 5);
    }

    #[test]
    fn test_identical_missing_paths_fail_at_copy() {
        let dir = tempfile::tempdir().unwrap();
        let mut release = release("1.0.0");
        release.build_output = "card.js".to_string();
        release.published_path = "card.js".to_string();
        let vcs = MockVcs::new();

        let err = stage_and_commit(&vcs, dir.path(), &release).unwrap_err();

        assert_eq!(err.vcs_step(), Some(VcsStep::Copy));
        assert!(vcs.calls().is_empty());
    }

    #[test]
    fn test_missing_build_output_fails_before_git() {
        let dir = tempfile::tempdir().unwrap();
        let vcs = MockVcs::new();

        let err = stage_and_commit(&vcs, dir.path(), &release("1.0.0")).unwrap_err();

        assert_eq!(err.vcs_step(), Some(VcsStep::Copy));
        assert!(vcs.calls().is_empty());
    }
}
