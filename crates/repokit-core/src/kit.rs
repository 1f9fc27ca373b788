//! Branch resolution and checkout orchestration

use std::collections::HashSet;
use std::path::PathBuf;

use repokit_git::{CommitInfo, GitBackend, GitRepository};

use crate::{BranchLocation, Error, Result};

/// Remote that fetch, pull, and push operations target.
pub const DEFAULT_REMOTE: &str = "origin";

/// Fallback source branch when the caller does not name one.
pub const DEFAULT_SOURCE_BRANCH: &str = "master";

/// Convenience layer over a version-control working copy.
///
/// Resolves a desired branch into a checked-out, up-to-date local state,
/// shelving uncommitted work before any branch switch. Generic over the
/// backend so the decision procedure can be exercised without a real
/// repository.
pub struct RepoKit<B> {
    pub(crate) backend: B,
}

impl RepoKit<GitRepository> {
    /// Bind to the working copy at `root`, cloning from `remote_url` first
    /// when the directory does not exist yet.
    pub fn initialize(root: impl Into<PathBuf>, remote_url: Option<&str>) -> Result<Self> {
        Ok(Self::new(GitRepository::initialize(root, remote_url)?))
    }
}

impl<B: GitBackend> RepoKit<B> {
    /// Wrap an already-bound backend.
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// The underlying backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Name of the branch HEAD points to, or `None` when detached.
    pub fn current_branch(&self) -> Result<Option<String>> {
        Ok(self.backend.current_branch()?)
    }

    /// The most recent commit, or `None` in an empty repository.
    pub fn last_commit(&self) -> Result<Option<CommitInfo>> {
        Ok(self.backend.last_commit()?)
    }

    /// Whether `name` exists at the given location.
    ///
    /// Remote existence is probed by fetching the branch from origin. Any
    /// fetch failure is treated as "does not exist": the probe cannot tell
    /// an absent branch from an unreachable remote, so callers must
    /// tolerate false negatives under network partition.
    pub fn branch_exists(&self, name: &str, location: BranchLocation) -> Result<bool> {
        match location {
            BranchLocation::Local => {
                let branches = self.backend.local_branches()?;
                Ok(branches.iter().any(|branch| branch == name))
            }
            BranchLocation::Remote => match self.backend.fetch(DEFAULT_REMOTE, name) {
                Ok(()) => Ok(true),
                Err(error) => {
                    tracing::debug!(
                        branch = name,
                        %error,
                        "fetch failed, treating branch as absent on origin"
                    );
                    Ok(false)
                }
            },
        }
    }

    /// Shelve uncommitted modifications before a destructive operation.
    ///
    /// A clean tree is a no-op; a dirty one is stashed with a single stash
    /// call, whatever the number of files. Returns the shelved paths. The
    /// stash is never popped automatically.
    pub fn guard_working_tree(&self) -> Result<Vec<String>> {
        let dirty = self.backend.status()?;
        if dirty.is_empty() {
            return Ok(dirty);
        }

        tracing::info!(files = ?dirty, "shelving local changes");
        self.backend.stash()?;
        tracing::info!("local changes stashed, use `git stash pop` to restore them");

        Ok(dirty)
    }

    /// Bring the working copy onto `branch`, creating it from `source`
    /// (default `"master"`) when it exists nowhere.
    ///
    /// Dispatch, first match wins:
    /// 1. branch exists locally: check it out, and pull when a remote
    ///    counterpart is confirmed to exist;
    /// 2. branch exists on origin only: fetch, check out a tracking
    ///    branch, pull;
    /// 3. neither, but the source exists somewhere: resolve the source the
    ///    same way, then branch off it;
    /// 4. otherwise fail with [`Error::BranchNotFound`] naming both.
    pub fn checkout(&self, branch: &str, source: Option<&str>) -> Result<()> {
        let source = source.unwrap_or(DEFAULT_SOURCE_BRANCH);
        let mut visited = HashSet::new();
        self.checkout_resolved(branch, source, &mut visited)
    }

    fn checkout_resolved(
        &self,
        target: &str,
        source: &str,
        visited: &mut HashSet<String>,
    ) -> Result<()> {
        if !visited.insert(target.to_string()) {
            return Err(Error::CyclicResolution {
                branch: target.to_string(),
            });
        }

        self.guard_working_tree()?;

        // All four predicates are evaluated up front; the remote probes
        // always run, so each invocation issues up to two fetch attempts.
        let target_local = self.branch_exists(target, BranchLocation::Local)?;
        let target_remote = self.branch_exists(target, BranchLocation::Remote)?;
        let source_local = self.branch_exists(source, BranchLocation::Local)?;
        let source_remote = self.branch_exists(source, BranchLocation::Remote)?;

        if target_local {
            self.backend.checkout(target)?;
            tracing::info!(branch = target, "checked out local branch");
            if target_remote {
                self.backend.pull(DEFAULT_REMOTE, target)?;
                tracing::info!(branch = target, "synchronized with origin");
            }
        } else if target_remote {
            self.backend.fetch(DEFAULT_REMOTE, target)?;
            self.backend.checkout(target)?;
            tracing::info!(branch = target, "checked out remote branch");
            self.backend.pull(DEFAULT_REMOTE, target)?;
            tracing::info!(branch = target, "synchronized with origin");
        } else if source_local || source_remote {
            self.checkout_resolved(source, DEFAULT_SOURCE_BRANCH, visited)?;
            self.backend.checkout_new_branch(target, source)?;
            tracing::info!(branch = target, from = source, "created branch from source");
        } else {
            return Err(Error::BranchNotFound {
                target: target.to_string(),
                source: source.to_string(),
            });
        }

        Ok(())
    }
}
