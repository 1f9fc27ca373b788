//! Commit and push helpers
//!
//! Thin sequential delegation; these assume the orchestrator already placed
//! the working copy on the right branch.

use repokit_git::GitBackend;

use crate::{Error, Result, RepoKit, kit::DEFAULT_REMOTE};

impl<B: GitBackend> RepoKit<B> {
    /// Stage and commit every dirty file.
    ///
    /// Returns the pre-commit status snapshot in both cases; a clean tree
    /// commits nothing. The resulting commit hash is reported through the
    /// log stream.
    pub fn commit_local_changes(&self, message: &str) -> Result<Vec<String>> {
        let dirty = self.backend.status()?;
        if dirty.is_empty() {
            tracing::info!("no local changes to commit");
            return Ok(dirty);
        }

        tracing::info!(files = ?dirty, "committing local changes");
        self.backend.add(&dirty)?;
        self.backend.commit(message)?;

        if let Some(commit) = self.backend.last_commit()? {
            tracing::info!(hash = %commit.hash, "commit created");
        }

        Ok(dirty)
    }

    /// Push the current branch to origin.
    ///
    /// Fails with [`Error::DetachedHead`] when HEAD does not point at a
    /// branch.
    pub fn push_to_remote(&self) -> Result<()> {
        let branch = self.backend.current_branch()?.ok_or(Error::DetachedHead)?;
        let last = self.backend.last_commit()?;

        self.backend.push(DEFAULT_REMOTE, &branch)?;

        match last {
            Some(commit) => {
                tracing::info!(hash = %commit.hash, branch = %branch, "pushed to origin")
            }
            None => tracing::info!(branch = %branch, "pushed to origin"),
        }

        Ok(())
    }
}
