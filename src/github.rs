//! GitHub release creation.
//!
//! The API token comes from the environment (`GITHUB_TOKEN` unless configured
//! otherwise). A release never touches local state, so a failure here leaves
//! the already pushed tag in place.

use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

use crate::config::GitHubReleaseConfig;
use crate::error::{ReleaseError, Result};
use crate::version::ReleaseVersion;

/// Something that can publish release notes for a pushed tag.
pub trait ReleasePublisher {
    /// Creates the release and returns its URL.
    fn publish_release(&self, version: &ReleaseVersion, tag_name: &str, notes: &str)
        -> Result<String>;
}

/// Body of `POST /repos/{owner}/{repo}/releases`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateRelease {
    pub tag_name: String,
    pub name: String,
    pub body: String,
    pub draft: bool,
    pub prerelease: bool,
}

impl CreateRelease {
    pub fn new(version: &ReleaseVersion, tag_name: &str, notes: &str) -> Self {
        CreateRelease {
            tag_name: tag_name.to_string(),
            name: format!("Release {}", version),
            body: notes.to_string(),
            draft: false,
            prerelease: false,
        }
    }
}

#[derive(Debug, Deserialize)]
struct CreatedRelease {
    html_url: String,
}

/// GitHub REST client for one repository.
///
/// The token is looked up when a release is published, not at construction,
/// so a missing token only surfaces once the tag has been pushed.
#[derive(Debug, Clone)]
pub struct GitHubReleases {
    config: GitHubReleaseConfig,
    repository: Option<String>,
    client: Client,
}

impl GitHubReleases {
    /// `repository` is the `owner/repo` slug, taken from the config when set.
    pub fn new(config: GitHubReleaseConfig, repository: Option<String>) -> Self {
        let repository = config.repository.clone().or(repository);
        GitHubReleases {
            config,
            repository,
            client: Client::new(),
        }
    }

    fn token(&self) -> Result<String> {
        std::env::var(&self.config.token_env)
            .ok()
            .filter(|token| !token.trim().is_empty())
            .ok_or_else(|| {
                ReleaseError::auth(format!(
                    "environment variable {} is not set",
                    self.config.token_env
                ))
            })
    }

    fn releases_url(&self) -> Result<String> {
        let repository = self.repository.as_deref().ok_or_else(|| {
            ReleaseError::remote(
                "no GitHub repository configured and none could be inferred from the git remote",
            )
        })?;
        Ok(format!(
            "{}/repos/{}/releases",
            self.config.api_url.trim_end_matches('/'),
            repository
        ))
    }
}

impl ReleasePublisher for GitHubReleases {
    fn publish_release(
        &self,
        version: &ReleaseVersion,
        tag_name: &str,
        notes: &str,
    ) -> Result<String> {
        let token = self.token()?;
        let url = self.releases_url()?;
        log::debug!("creating release {} via {}", tag_name, url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(token)
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", "2022-11-28")
            .header(
                "User-Agent",
                concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")),
            )
            .json(&CreateRelease::new(version, tag_name, notes))
            .send()
            .map_err(|e| ReleaseError::remote(format!("request to {} failed: {}", url, e)))?;

        let status = response.status();
        if status.is_success() {
            let created: CreatedRelease = response
                .json()
                .map_err(|e| ReleaseError::remote(format!("unexpected response: {}", e)))?;
            return Ok(created.html_url);
        }

        let body = response.text().unwrap_or_default();
        Err(classify_failure(status, &body))
    }
}

fn classify_failure(status: StatusCode, body: &str) -> ReleaseError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            ReleaseError::auth(format!("{}: {}", status, body))
        }
        _ => ReleaseError::remote(format!("{}: {}", status, body)),
    }
}
