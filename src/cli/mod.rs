//! Release workflow driven by the `card-release` binary.

pub mod orchestration;

pub use orchestration::{ReleaseWorkflow, WorkflowResult, WorkflowState};
