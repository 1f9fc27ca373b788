//! Git backend layer for RepoKit
//!
//! Defines the fixed set of git primitives the checkout orchestrator
//! consumes ([`GitBackend`]) and a `git2`-backed implementation bound to a
//! working-copy directory ([`GitRepository`]).

pub mod backend;
pub mod commits;
pub mod error;
pub mod repository;

pub use backend::GitBackend;
pub use commits::CommitInfo;
pub use error::{Error, Result};
pub use repository::GitRepository;
