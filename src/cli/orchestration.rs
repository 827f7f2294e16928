//! Main workflow orchestration logic
//!
//! Drives one release from reading the manifest to publishing release notes.
//! Collaborators are passed in explicitly so the same sequence runs against
//! real git and npm in the binary and against mocks in tests.

use std::fs;
use std::io::BufRead;
use std::path::{Path, PathBuf};

use crate::build::Builder;
use crate::changelog;
use crate::config::ReleaseConfig;
use crate::error::{ReleaseError, Result};
use crate::git::{RepoInfo, Vcs};
use crate::github::ReleasePublisher;
use crate::manifest::Manifest;
use crate::publish::{self, ReleaseCommit};
use crate::ui;
use crate::version::{self, ReleaseVersion};

/// Where a release run currently is.
///
/// States are only ever entered in declaration order; any failure moves the
/// run to `Aborted`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowState {
    Start,
    VersionRead,
    VersionPrompt,
    VersionValidated,
    ManifestUpdated,
    Built,
    ConfirmPrompt,
    Published,
    Done,
    Aborted,
}

/// Result of a successful release
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowResult {
    /// Version found in the manifest before the run
    pub previous_version: String,

    /// The version that was released
    pub version: String,

    /// The tag that was created and pushed
    pub tag: String,

    /// URL of the GitHub release, when one was created
    pub release_url: Option<String>,
}

/// One interactive release run.
pub struct ReleaseWorkflow<'a, R: BufRead> {
    config: &'a ReleaseConfig,
    project_root: PathBuf,
    input: R,
    builder: &'a dyn Builder,
    vcs: &'a dyn Vcs,
    publisher: Option<&'a dyn ReleasePublisher>,
    repository: Option<&'a RepoInfo>,
    state: WorkflowState,
}

impl<'a, R: BufRead> ReleaseWorkflow<'a, R> {
    pub fn new(
        config: &'a ReleaseConfig,
        project_root: &Path,
        input: R,
        builder: &'a dyn Builder,
        vcs: &'a dyn Vcs,
    ) -> Self {
        ReleaseWorkflow {
            config,
            project_root: project_root.to_path_buf(),
            input,
            builder,
            vcs,
            publisher: None,
            repository: None,
            state: WorkflowState::Start,
        }
    }

    /// Create a GitHub release after pushing
    pub fn with_publisher(mut self, publisher: &'a dyn ReleasePublisher) -> Self {
        self.publisher = Some(publisher);
        self
    }

    /// Use the repository for the branch name and an existing-tag warning
    pub fn with_repository(mut self, repository: &'a RepoInfo) -> Self {
        self.repository = Some(repository);
        self
    }

    pub fn state(&self) -> WorkflowState {
        self.state
    }

    /// Runs the release to completion.
    ///
    /// Nothing is rolled back on failure: a pushed commit stays pushed when a
    /// later step fails.
    pub fn run(&mut self) -> Result<WorkflowResult> {
        let result = self.drive();
        if let Err(e) = &result {
            log::debug!("release aborted in state {:?}: {}", self.state, e);
            self.state = WorkflowState::Aborted;
        }
        result
    }

    fn advance(&mut self, next: WorkflowState) {
        log::debug!("{:?} -> {:?}", self.state, next);
        self.state = next;
    }

    fn drive(&mut self) -> Result<WorkflowResult> {
        let manifest = Manifest::new(self.project_root.join(&self.config.manifest));
        let current = manifest.read()?;
        self.advance(WorkflowState::VersionRead);

        ui::display_current_version(&current);
        self.advance(WorkflowState::VersionPrompt);
        let candidate = ui::prompt_version(&mut self.input)?
            .ok_or_else(|| ReleaseError::Cancelled("no version entered".to_string()))?;

        let version = version::validate(&candidate)?;
        self.advance(WorkflowState::VersionValidated);
        if version.is_newer_than(&current) == Some(false) {
            ui::display_warning(&format!(
                "{} is not newer than the current version {}",
                version, current
            ));
        }

        let release = ReleaseCommit::new(self.config, &version);
        if let Some(repository) = self.repository {
            if repository.tag_exists(&release.tag_name) {
                ui::display_warning(&format!(
                    "tag {} already exists; the tag step will fail",
                    release.tag_name
                ));
            }
        }

        manifest.write(&version)?;
        self.advance(WorkflowState::ManifestUpdated);
        ui::display_success(&format!(
            "Updated {} to {}",
            self.config.manifest, version
        ));

        ui::display_status("Building...");
        self.builder.build()?;
        self.advance(WorkflowState::Built);
        ui::display_success("Build finished");

        ui::display_release_summary(&ui::ReleaseSummary {
            old_version: current.clone(),
            new_version: version.to_string(),
            tag_name: release.tag_name.clone(),
            branch: self.repository.and_then(RepoInfo::current_branch),
            files: release.artifact_paths.clone(),
            github_release: self.publisher.is_some(),
        });
        self.advance(WorkflowState::ConfirmPrompt);
        if !ui::wait_for_confirmation(&mut self.input)? {
            return Err(ReleaseError::Cancelled(
                "input closed before confirmation".to_string(),
            ));
        }

        ui::display_status(&format!("Committing and tagging {}", release.tag_name));
        publish::stage_and_commit(self.vcs, &self.project_root, &release)?;
        ui::display_success(&format!("Pushed commit and tag {}", release.tag_name));

        let release_url = match self.publisher {
            Some(publisher) => {
                let notes = self.release_notes(&version);
                let url = publisher.publish_release(&version, &release.tag_name, &notes)?;
                ui::display_success(&format!("Created GitHub release {}", url));
                Some(url)
            }
            None => None,
        };
        self.advance(WorkflowState::Published);

        self.advance(WorkflowState::Done);
        Ok(WorkflowResult {
            previous_version: current,
            version: version.to_string(),
            tag: release.tag_name,
            release_url,
        })
    }

    fn release_notes(&self, version: &ReleaseVersion) -> String {
        let path = self.project_root.join(&self.config.changelog);
        let notes = match fs::read_to_string(&path) {
            Ok(text) => changelog::extract_notes(&text, version),
            Err(e) => {
                log::warn!("could not read {}: {}", path.display(), e);
                None
            }
        };

        notes.unwrap_or_else(|| {
            log::warn!(
                "no changelog entry for {}, using a generic release body",
                version
            );
            format!("Release {}", version)
        })
    }
}
