pub mod build;
pub mod changelog;
pub mod cli;
pub mod config;
pub mod error;
pub mod git;
pub mod github;
pub mod manifest;
pub mod publish;
pub mod ui;
pub mod version;

pub use error::{ReleaseError, Result};
