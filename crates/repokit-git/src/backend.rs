//! Backend trait listing the git primitives the orchestrator consumes

use crate::{CommitInfo, Result};

/// Trait for the git primitives RepoKit is built on.
///
/// The primitive set is small and fixed: status inspection, branch listing,
/// fetch/checkout/pull, stashing, staging, committing, and pushing. Every
/// method is a single sequential operation against the working copy;
/// callers are expected to be single-threaded and non-reentrant.
pub trait GitBackend {
    /// Paths of files that differ from HEAD, including untracked files.
    fn status(&self) -> Result<Vec<String>>;

    /// Names of all local branches.
    fn local_branches(&self) -> Result<Vec<String>>;

    /// Name of the branch HEAD points to, or `None` when HEAD is detached
    /// or unborn.
    fn current_branch(&self) -> Result<Option<String>>;

    /// Fetch a single branch from the named remote, updating the
    /// remote-tracking ref.
    fn fetch(&self, remote: &str, branch: &str) -> Result<()>;

    /// Switch the working copy to `branch`.
    ///
    /// When no local branch of that name exists but a remote-tracking ref
    /// does, a local tracking branch is created first.
    fn checkout(&self, branch: &str) -> Result<()>;

    /// Create a new local branch named `branch` starting at `from`, and
    /// switch to it.
    fn checkout_new_branch(&self, branch: &str, from: &str) -> Result<()>;

    /// Fetch `branch` from `remote` and fast-forward the local branch.
    fn pull(&self, remote: &str, branch: &str) -> Result<()>;

    /// Shelve all uncommitted modifications, untracked files included.
    fn stash(&self) -> Result<()>;

    /// Stage the given paths.
    fn add(&self, paths: &[String]) -> Result<()>;

    /// Commit the staged changes with `message`.
    fn commit(&self, message: &str) -> Result<()>;

    /// The commit HEAD points to, or `None` in an empty repository.
    fn last_commit(&self) -> Result<Option<CommitInfo>>;

    /// Push `branch` to `remote`.
    fn push(&self, remote: &str, branch: &str) -> Result<()>;
}
