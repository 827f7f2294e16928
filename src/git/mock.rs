use std::cell::RefCell;

use crate::error::{ReleaseError, Result, VcsStep};
use crate::git::Vcs;

/// A call observed by [MockVcs]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VcsCall {
    Add(Vec<String>),
    Commit(String),
    Push,
    Tag { name: String, message: String },
    PushTags,
}

impl VcsCall {
    pub fn step(&self) -> VcsStep {
        match self {
            VcsCall::Add(_) => VcsStep::Add,
            VcsCall::Commit(_) => VcsStep::Commit,
            VcsCall::Push => VcsStep::Push,
            VcsCall::Tag { .. } => VcsStep::Tag,
            VcsCall::PushTags => VcsStep::PushTags,
        }
    }
}

/// Mock git for testing without touching a repository
///
/// Records every call; the call at `fail_at` is recorded and then fails.
#[derive(Debug, Default)]
pub struct MockVcs {
    calls: RefCell<Vec<VcsCall>>,
    fail_at: Option<VcsStep>,
}

impl MockVcs {
    /// Create a mock where every step succeeds
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock that fails at the given step
    pub fn failing_at(step: VcsStep) -> Self {
        MockVcs {
            calls: RefCell::new(Vec::new()),
            fail_at: Some(step),
        }
    }

    /// Calls made so far, in order
    pub fn calls(&self) -> Vec<VcsCall> {
        self.calls.borrow().clone()
    }

    fn record(&self, call: VcsCall) -> Result<()> {
        let step = call.step();
        self.calls.borrow_mut().push(call);
        if self.fail_at == Some(step) {
            return Err(ReleaseError::vcs(step, "mock failure"));
        }
        Ok(())
    }
}

impl Vcs for MockVcs {
    fn add(&self, paths: &[String]) -> Result<()> {
        self.record(VcsCall::Add(paths.to_vec()))
    }

    fn commit(&self, message: &str) -> Result<()> {
        self.record(VcsCall::Commit(message.to_string()))
    }

    fn push(&self) -> Result<()> {
        self.record(VcsCall::Push)
    }

    fn tag(&self, name: &str, message: &str) -> Result<()> {
        self.record(VcsCall::Tag {
            name: name.to_string(),
            message: message.to_string(),
        })
    }

    fn push_tags(&self) -> Result<()> {
        self.record(VcsCall::PushTags)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_calls_in_order() {
        let vcs = MockVcs::new();
        vcs.commit("msg").unwrap();
        vcs.push().unwrap();
        assert_eq!(
            vcs.calls(),
            vec![VcsCall::Commit("msg".to_string()), VcsCall::Push]
        );
    }

    #[test]
    fn test_fails_at_configured_step() {
        let vcs = MockVcs::failing_at(VcsStep::Push);
        assert!(vcs.commit("msg").is_ok());
        let err = vcs.push().unwrap_err();
        assert_eq!(err.vcs_step(), Some(VcsStep::Push));
    }
}
