use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ReleaseError, Result};

/// File name looked up in the project root.
pub const PROJECT_CONFIG_FILE: &str = "release.toml";

/// File name looked up in the user config directory.
pub const USER_CONFIG_FILE: &str = "card-release.toml";

/// Represents the complete configuration for card-release.
///
/// Built once at startup and handed to each component; nothing reads it
/// from a global.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ReleaseConfig {
    #[serde(default = "default_manifest")]
    pub manifest: String,

    #[serde(default = "default_changelog")]
    pub changelog: String,

    #[serde(default = "default_hacs_manifest")]
    pub hacs_manifest: String,

    #[serde(default)]
    pub build: BuildConfig,

    #[serde(default)]
    pub git: GitConfig,

    #[serde(default)]
    pub release: GitHubReleaseConfig,
}

fn default_manifest() -> String {
    "package.json".to_string()
}

fn default_changelog() -> String {
    "CHANGELOG.md".to_string()
}

fn default_hacs_manifest() -> String {
    "hacs.json".to_string()
}

/// The external build command and the artifact it produces.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct BuildConfig {
    #[serde(default = "default_build_program")]
    pub program: String,

    #[serde(default = "default_build_args")]
    pub args: Vec<String>,

    /// Compiled file written by the build
    #[serde(default = "default_build_output")]
    pub output: String,

    /// Location the compiled file is copied to before committing
    #[serde(default = "default_published_output")]
    pub published: String,
}

fn default_build_program() -> String {
    "npm".to_string()
}

fn default_build_args() -> Vec<String> {
    vec!["run".to_string(), "build".to_string()]
}

fn default_build_output() -> String {
    "dist/hyper-light-card.js".to_string()
}

fn default_published_output() -> String {
    "hyper-light-card.js".to_string()
}

impl Default for BuildConfig {
    fn default() -> Self {
        BuildConfig {
            program: default_build_program(),
            args: default_build_args(),
            output: default_build_output(),
            published: default_published_output(),
        }
    }
}

/// Commit and tag settings.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct GitConfig {
    #[serde(default = "default_remote")]
    pub remote: String,

    #[serde(default = "default_commit_template")]
    pub commit_template: String,

    #[serde(default = "default_tag_template")]
    pub tag_template: String,
}

fn default_remote() -> String {
    "origin".to_string()
}

fn default_commit_template() -> String {
    ":rocket: Release version {version}".to_string()
}

fn default_tag_template() -> String {
    "v{version}".to_string()
}

impl Default for GitConfig {
    fn default() -> Self {
        GitConfig {
            remote: default_remote(),
            commit_template: default_commit_template(),
            tag_template: default_tag_template(),
        }
    }
}

/// GitHub release settings.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct GitHubReleaseConfig {
    #[serde(default = "default_release_enabled")]
    pub enabled: bool,

    /// `owner/repo`; inferred from the git remote when unset
    #[serde(default)]
    pub repository: Option<String>,

    /// Environment variable holding the API token
    #[serde(default = "default_token_env")]
    pub token_env: String,

    #[serde(default = "default_api_url")]
    pub api_url: String,
}

fn default_release_enabled() -> bool {
    true
}

fn default_token_env() -> String {
    "GITHUB_TOKEN".to_string()
}

fn default_api_url() -> String {
    "https://api.github.com".to_string()
}

impl Default for GitHubReleaseConfig {
    fn default() -> Self {
        GitHubReleaseConfig {
            enabled: default_release_enabled(),
            repository: None,
            token_env: default_token_env(),
            api_url: default_api_url(),
        }
    }
}

impl Default for ReleaseConfig {
    fn default() -> Self {
        ReleaseConfig {
            manifest: default_manifest(),
            changelog: default_changelog(),
            hacs_manifest: default_hacs_manifest(),
            build: BuildConfig::default(),
            git: GitConfig::default(),
            release: GitHubReleaseConfig::default(),
        }
    }
}

impl ReleaseConfig {
    /// Files staged together in the release commit, relative to the project root.
    pub fn artifact_paths(&self) -> Vec<String> {
        vec![
            self.manifest.clone(),
            self.hacs_manifest.clone(),
            self.changelog.clone(),
            self.build.published.clone(),
        ]
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `release.toml` in the project root
/// 3. `card-release.toml` in the user config directory
/// 4. Default configuration if no file found
///
/// # Returns
/// * `Ok(ReleaseConfig)` - Loaded or default configuration
/// * `Err` - If a file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&Path>, project_root: &Path) -> Result<ReleaseConfig> {
    let path = match config_path {
        Some(path) => Some(path.to_path_buf()),
        None => find_config_file(project_root),
    };

    let Some(path) = path else {
        log::debug!("no configuration file found, using defaults");
        return Ok(ReleaseConfig::default());
    };

    log::debug!("loading configuration from {}", path.display());
    let config_str = fs::read_to_string(&path)
        .map_err(|e| ReleaseError::config(format!("{}: {}", path.display(), e)))?;
    toml::from_str(&config_str)
        .map_err(|e| ReleaseError::config(format!("{}: {}", path.display(), e)))
}

fn find_config_file(project_root: &Path) -> Option<PathBuf> {
    let local = project_root.join(PROJECT_CONFIG_FILE);
    if local.exists() {
        return Some(local);
    }

    dirs::config_dir()
        .map(|dir| dir.join(USER_CONFIG_FILE))
        .filter(|path| path.exists())
}
