//! Commit record extraction from git repositories.

use chrono::{DateTime, TimeZone, Utc};
use git2::{ErrorCode, Repository};

use crate::Result;

/// Information about a single commit.
#[derive(Debug, Clone)]
pub struct CommitInfo {
    /// Short commit hash (7 characters)
    pub hash: String,

    /// First line of the commit message
    pub message: String,

    /// Commit author name
    pub author: String,

    /// Commit timestamp
    pub timestamp: DateTime<Utc>,
}

/// Read the commit HEAD currently points to.
///
/// Returns `None` when the repository has no commits yet (unborn HEAD).
pub fn latest_commit(repo: &Repository) -> Result<Option<CommitInfo>> {
    let head = match repo.head() {
        Ok(head) => head,
        Err(e) if e.code() == ErrorCode::UnbornBranch || e.code() == ErrorCode::NotFound => {
            return Ok(None);
        }
        Err(e) => return Err(e.into()),
    };

    let commit = head.peel_to_commit()?;

    let timestamp: DateTime<Utc> = Utc
        .timestamp_opt(commit.time().seconds(), 0)
        .single()
        .unwrap_or_default();

    let author = commit.author();

    Ok(Some(CommitInfo {
        hash: format!("{:.7}", commit.id()),
        message: commit.summary().unwrap_or("").to_string(),
        author: author.name().unwrap_or("Unknown").to_string(),
        timestamp,
    }))
}
