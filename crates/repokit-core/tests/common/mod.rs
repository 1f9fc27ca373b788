//! Scripted in-memory backend recording the primitive call sequence
#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;

use chrono::Utc;
use repokit_git::{CommitInfo, Error, GitBackend, Result};

fn backend_error(message: &str) -> Error {
    Error::Git(git2::Error::from_str(message))
}

/// In-memory stand-in for a working copy.
///
/// Branch and status state live in `RefCell`s so the `&self` trait methods
/// can mutate them; every primitive invocation is appended to `calls` for
/// sequence assertions.
#[derive(Default)]
pub struct FakeBackend {
    pub local: RefCell<Vec<String>>,
    pub remote: RefCell<Vec<String>>,
    pub current: RefCell<Option<String>>,
    pub dirty: RefCell<Vec<String>>,
    pub last: RefCell<Option<CommitInfo>>,
    pub calls: RefCell<Vec<String>>,
    pub fail_stash: bool,
    pub fail_pull: bool,
    pub fail_push: bool,
    /// Scripted per-branch fetch outcomes, consumed front to back. Branches
    /// without a script fall back to membership in `remote`.
    pub fetch_script: RefCell<HashMap<String, Vec<bool>>>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_local(self, branches: &[&str]) -> Self {
        *self.local.borrow_mut() = branches.iter().map(|b| b.to_string()).collect();
        self
    }

    pub fn with_remote(self, branches: &[&str]) -> Self {
        *self.remote.borrow_mut() = branches.iter().map(|b| b.to_string()).collect();
        self
    }

    pub fn with_current(self, branch: &str) -> Self {
        *self.current.borrow_mut() = Some(branch.to_string());
        self
    }

    pub fn with_dirty(self, paths: &[&str]) -> Self {
        *self.dirty.borrow_mut() = paths.iter().map(|p| p.to_string()).collect();
        self
    }

    pub fn with_fetch_script(self, branch: &str, outcomes: &[bool]) -> Self {
        self.fetch_script
            .borrow_mut()
            .insert(branch.to_string(), outcomes.to_vec());
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    pub fn count_calls(&self, prefix: &str) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|call| call.starts_with(prefix))
            .count()
    }

    pub fn call_position(&self, call: &str) -> Option<usize> {
        self.calls.borrow().iter().position(|c| c == call)
    }

    fn record(&self, call: String) {
        self.calls.borrow_mut().push(call);
    }
}

impl GitBackend for FakeBackend {
    fn status(&self) -> Result<Vec<String>> {
        self.record("status".into());
        Ok(self.dirty.borrow().clone())
    }

    fn local_branches(&self) -> Result<Vec<String>> {
        self.record("local_branches".into());
        Ok(self.local.borrow().clone())
    }

    fn current_branch(&self) -> Result<Option<String>> {
        self.record("current_branch".into());
        Ok(self.current.borrow().clone())
    }

    fn fetch(&self, remote: &str, branch: &str) -> Result<()> {
        self.record(format!("fetch {} {}", remote, branch));

        let mut script = self.fetch_script.borrow_mut();
        let exists = match script.get_mut(branch) {
            Some(outcomes) if !outcomes.is_empty() => outcomes.remove(0),
            _ => self.remote.borrow().iter().any(|b| b == branch),
        };

        if exists {
            Ok(())
        } else {
            Err(backend_error("couldn't find remote ref"))
        }
    }

    fn checkout(&self, branch: &str) -> Result<()> {
        self.record(format!("checkout {}", branch));

        let known_locally = self.local.borrow().iter().any(|b| b == branch);
        if !known_locally {
            if !self.remote.borrow().iter().any(|b| b == branch) {
                return Err(Error::BranchNotFound {
                    name: branch.to_string(),
                });
            }
            // Checking out a remote-only branch creates the local
            // tracking branch.
            self.local.borrow_mut().push(branch.to_string());
        }

        *self.current.borrow_mut() = Some(branch.to_string());
        Ok(())
    }

    fn checkout_new_branch(&self, branch: &str, from: &str) -> Result<()> {
        self.record(format!("checkout_new_branch {} {}", branch, from));

        if !self.local.borrow().iter().any(|b| b == from) {
            return Err(Error::BranchNotFound {
                name: from.to_string(),
            });
        }

        self.local.borrow_mut().push(branch.to_string());
        *self.current.borrow_mut() = Some(branch.to_string());
        Ok(())
    }

    fn pull(&self, remote: &str, branch: &str) -> Result<()> {
        self.record(format!("pull {} {}", remote, branch));

        if self.fail_pull {
            return Err(Error::PullFailed {
                message: "scripted failure".into(),
            });
        }
        Ok(())
    }

    fn stash(&self) -> Result<()> {
        self.record("stash".into());

        if self.fail_stash {
            return Err(backend_error("stash failed"));
        }
        self.dirty.borrow_mut().clear();
        Ok(())
    }

    fn add(&self, paths: &[String]) -> Result<()> {
        self.record(format!("add {}", paths.join(" ")));
        Ok(())
    }

    fn commit(&self, message: &str) -> Result<()> {
        self.record(format!("commit {}", message));

        *self.last.borrow_mut() = Some(CommitInfo {
            hash: "abc1234".into(),
            message: message.to_string(),
            author: "Test User".into(),
            timestamp: Utc::now(),
        });
        self.dirty.borrow_mut().clear();
        Ok(())
    }

    fn last_commit(&self) -> Result<Option<CommitInfo>> {
        self.record("last_commit".into());
        Ok(self.last.borrow().clone())
    }

    fn push(&self, remote: &str, branch: &str) -> Result<()> {
        self.record(format!("push {} {}", remote, branch));

        if self.fail_push {
            return Err(Error::PushFailed {
                message: "scripted failure".into(),
            });
        }
        Ok(())
    }
}
