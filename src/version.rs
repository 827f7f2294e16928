use crate::error::{ReleaseError, Result};
use std::fmt;

/// A semantic version accepted for release.
///
/// Keeps the exact text the user typed alongside the parsed form, so the
/// manifest, commit message and tag all carry the same string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseVersion {
    raw: String,
    parsed: semver::Version,
}

impl ReleaseVersion {
    /// The version exactly as entered
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// The parsed semantic version
    pub fn semver(&self) -> &semver::Version {
        &self.parsed
    }

    /// Renders a template such as `v{version}` with this version.
    pub fn render(&self, template: &str) -> String {
        template.replace("{version}", &self.raw)
    }

    /// Whether this version is strictly greater than `current`.
    ///
    /// Returns `None` when `current` is not itself a semantic version.
    pub fn is_newer_than(&self, current: &str) -> Option<bool> {
        semver::Version::parse(current)
            .ok()
            .map(|current| self.parsed > current)
    }
}

impl fmt::Display for ReleaseVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Validates a candidate version string.
///
/// Accepts `MAJOR.MINOR.PATCH[-PRERELEASE][+BUILD]` and nothing else: no `v`
/// prefix, no leading zeros in numeric parts, no surrounding whitespace.
///
/// # Example
/// ```
/// use card_release::version::validate;
///
/// assert_eq!(validate("1.2.3-beta.1+build.7").unwrap().as_str(), "1.2.3-beta.1+build.7");
/// assert!(validate("v1.2.3").is_err());
/// ```
pub fn validate(candidate: &str) -> Result<ReleaseVersion> {
    if candidate.is_empty() {
        return Err(ReleaseError::InvalidVersionFormat(
            "version must not be empty".to_string(),
        ));
    }

    let parsed = semver::Version::parse(candidate)
        .map_err(|e| ReleaseError::InvalidVersionFormat(format!("'{}': {}", candidate, e)))?;

    Ok(ReleaseVersion {
        raw: candidate.to_string(),
        parsed,
    })
}
