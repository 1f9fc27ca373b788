//! Error types for repokit-git

use std::path::PathBuf;

/// Result type for repokit-git operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in repokit-git operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Git error: {0}")]
    Git(#[from] git2::Error),

    #[error("Repository directory {path} does not exist and no remote URL was given")]
    RepositoryMissing { path: PathBuf },

    #[error("Branch '{name}' not found")]
    BranchNotFound { name: String },

    #[error("Remote '{name}' not found")]
    RemoteNotFound { name: String },

    #[error("Push failed: {message}")]
    PushFailed { message: String },

    #[error("Pull failed: {message}")]
    PullFailed { message: String },

    #[error("Cannot fast-forward: {message}")]
    CannotFastForward { message: String },
}
