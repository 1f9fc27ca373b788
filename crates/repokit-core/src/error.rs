//! Error types for repokit-core

/// Result type for repokit-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in repokit-core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Neither the target branch nor the source branch exists anywhere
    #[error(
        "Branch '{target}' not found locally or on origin, and source branch '{source}' does not exist"
    )]
    BranchNotFound { target: String, source: String },

    /// Source-branch resolution revisited a branch it already tried
    #[error("Cyclic branch resolution detected at '{branch}'")]
    CyclicResolution { branch: String },

    /// Unrecognized branch-location string
    #[error("Invalid branch location: {value}")]
    InvalidLocation { value: String },

    /// HEAD does not point at a branch
    #[error("HEAD is detached; cannot determine current branch")]
    DetachedHead,

    /// Git error from repokit-git
    #[error(transparent)]
    Backend(#[from] repokit_git::Error),
}
