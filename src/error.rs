use thiserror::Error;

/// One step of the release commit sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VcsStep {
    Copy,
    Add,
    Commit,
    Push,
    Tag,
    PushTags,
}

impl std::fmt::Display for VcsStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            VcsStep::Copy => "copy",
            VcsStep::Add => "add",
            VcsStep::Commit => "commit",
            VcsStep::Push => "push",
            VcsStep::Tag => "tag",
            VcsStep::PushTags => "tag-push",
        };
        f.write_str(name)
    }
}

/// Unified error type for release operations
#[derive(Error, Debug)]
pub enum ReleaseError {
    #[error("Git repository error: {0}")]
    Git(#[from] git2::Error),

    #[error("Manifest not found: {0}")]
    ManifestMissing(String),

    #[error("Manifest is not valid JSON: {0}")]
    ManifestCorrupt(String),

    #[error("Manifest has no version field: {0}")]
    ManifestFieldMissing(String),

    #[error("Failed to write manifest: {0}")]
    ManifestWrite(String),

    #[error("Invalid semantic version: {0}")]
    InvalidVersionFormat(String),

    #[error("Build failed: {0}")]
    Build(String),

    #[error("Git step '{step}' failed: {message}")]
    VcsStep { step: VcsStep, message: String },

    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Remote operation failed: {0}")]
    Remote(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Release cancelled: {0}")]
    Cancelled(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in card-release
pub type Result<T> = std::result::Result<T, ReleaseError>;

impl ReleaseError {
    /// Create a build error with context
    pub fn build(msg: impl Into<String>) -> Self {
        ReleaseError::Build(msg.into())
    }

    /// Create a git step error
    pub fn vcs(step: VcsStep, msg: impl Into<String>) -> Self {
        ReleaseError::VcsStep {
            step,
            message: msg.into(),
        }
    }

    /// Create an authentication error with context
    pub fn auth(msg: impl Into<String>) -> Self {
        ReleaseError::Auth(msg.into())
    }

    /// Create a remote error with context
    pub fn remote(msg: impl Into<String>) -> Self {
        ReleaseError::Remote(msg.into())
    }

    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        ReleaseError::Config(msg.into())
    }

    /// The failing git step, if this is a git step error
    pub fn vcs_step(&self) -> Option<VcsStep> {
        match self {
            ReleaseError::VcsStep { step, .. } => Some(*step),
            _ => None,
        }
    }
}
