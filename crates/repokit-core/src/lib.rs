//! Branch resolution and checkout orchestration for RepoKit
//!
//! Given a working copy and a target branch, [`RepoKit`] decides whether the
//! branch exists locally, on origin, or must be created from a source
//! branch, and brings the working copy onto it, shelving uncommitted work
//! first. Commit and push helpers sit alongside.
//!
//! # Architecture
//!
//! ```text
//!        host (CLI, script, service)
//!                   |
//!             repokit-core        resolver + guard + orchestrator
//!                   |
//!             repokit-git         GitBackend trait, git2 implementation
//! ```
//!
//! Informational progress (shelved files, chosen decision branch, commit
//! hashes) is emitted as `tracing` events; installing a subscriber is the
//! host's job.

pub mod error;
pub mod kit;
pub mod location;
pub mod publish;

pub use error::{Error, Result};
pub use kit::{DEFAULT_REMOTE, DEFAULT_SOURCE_BRANCH, RepoKit};
pub use location::BranchLocation;
pub use repokit_git::{CommitInfo, GitBackend, GitRepository};
