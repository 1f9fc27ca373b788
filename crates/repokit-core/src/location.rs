//! Branch location classification

use std::fmt;
use std::str::FromStr;

use crate::Error;

/// Where a branch name is looked up.
///
/// A branch name has no intrinsic location; whether it exists locally or on
/// origin is a point-in-time question answered by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BranchLocation {
    /// The working copy's local branch list
    Local,

    /// Fetchable from the remote named "origin"
    Remote,
}

impl fmt::Display for BranchLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BranchLocation::Local => write!(f, "local"),
            BranchLocation::Remote => write!(f, "remote"),
        }
    }
}

impl FromStr for BranchLocation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "local" => Ok(BranchLocation::Local),
            "remote" => Ok(BranchLocation::Remote),
            other => Err(Error::InvalidLocation {
                value: other.to_string(),
            }),
        }
    }
}
