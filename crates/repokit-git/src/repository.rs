//! `git2`-backed implementation of the backend trait

use std::path::{Path, PathBuf};

use git2::{
    BranchType, ErrorCode, IndexAddOption, Repository, StashFlags, StatusOptions,
    build::CheckoutBuilder,
};

use crate::{CommitInfo, Error, GitBackend, Result, commits};

/// A working copy bound to a local directory.
///
/// The repository handle is opened per operation rather than cached; the
/// working directory on disk is the only persistent state.
pub struct GitRepository {
    root: PathBuf,
}

impl GitRepository {
    /// Bind to an existing working copy at `root`.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        Repository::open(&root)?;
        Ok(Self { root })
    }

    /// Resolve a directory into a bound working copy, cloning if needed.
    ///
    /// A missing directory is cloned from `remote_url` when one is given;
    /// a missing directory without a remote URL is a configuration error.
    pub fn initialize(root: impl Into<PathBuf>, remote_url: Option<&str>) -> Result<Self> {
        let root = root.into();

        if !root.exists() {
            let url = match remote_url {
                Some(url) => url,
                None => return Err(Error::RepositoryMissing { path: root }),
            };
            tracing::info!(path = %root.display(), url, "directory does not exist, cloning");
            Repository::clone(url, &root)?;
        }

        Self::open(root)
    }

    /// Directory this working copy is bound to.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn repo(&self) -> Result<Repository> {
        Ok(Repository::open(&self.root)?)
    }
}

/// Point HEAD at a local branch and update the working tree.
fn switch_head(repo: &Repository, branch: &str) -> Result<()> {
    let refname = format!("refs/heads/{}", branch);
    let object = repo.revparse_single(&refname)?;
    repo.checkout_tree(&object, None)?;
    repo.set_head(&refname)?;
    Ok(())
}

impl GitBackend for GitRepository {
    fn status(&self) -> Result<Vec<String>> {
        let repo = self.repo()?;

        let mut opts = StatusOptions::new();
        opts.include_untracked(true).recurse_untracked_dirs(true);

        let statuses = repo.statuses(Some(&mut opts))?;
        let files = statuses
            .iter()
            .map(|entry| String::from_utf8_lossy(entry.path_bytes()).into_owned())
            .collect();

        Ok(files)
    }

    fn local_branches(&self) -> Result<Vec<String>> {
        let repo = self.repo()?;

        let mut names = Vec::new();
        for entry in repo.branches(Some(BranchType::Local))? {
            let (branch, _) = entry?;
            if let Some(name) = branch.name()? {
                names.push(name.to_string());
            }
        }

        Ok(names)
    }

    fn current_branch(&self) -> Result<Option<String>> {
        let repo = self.repo()?;

        let head = match repo.head() {
            Ok(head) => head,
            Err(e) if e.code() == ErrorCode::UnbornBranch || e.code() == ErrorCode::NotFound => {
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };

        if head.is_branch() {
            Ok(head.shorthand().map(str::to_owned))
        } else {
            // Detached HEAD
            Ok(None)
        }
    }

    fn fetch(&self, remote: &str, branch: &str) -> Result<()> {
        let repo = self.repo()?;

        let mut remote_handle = repo.find_remote(remote).map_err(|_| Error::RemoteNotFound {
            name: remote.to_string(),
        })?;

        // Explicit destination so the remote-tracking ref is updated, not
        // just FETCH_HEAD.
        let refspec = format!("+refs/heads/{0}:refs/remotes/{1}/{0}", branch, remote);
        remote_handle.fetch(&[&refspec], None, None)?;

        Ok(())
    }

    fn checkout(&self, branch: &str) -> Result<()> {
        let repo = self.repo()?;

        if repo.find_branch(branch, BranchType::Local).is_ok() {
            return switch_head(&repo, branch);
        }

        // No local branch of that name; create one tracking the
        // remote-tracking ref if it exists.
        let remote_name = format!("origin/{}", branch);
        let remote_branch = repo
            .find_branch(&remote_name, BranchType::Remote)
            .map_err(|_| Error::BranchNotFound {
                name: branch.to_string(),
            })?;

        let commit = remote_branch.get().peel_to_commit()?;
        let mut local = repo.branch(branch, &commit, false)?;
        local.set_upstream(Some(&remote_name))?;

        switch_head(&repo, branch)
    }

    fn checkout_new_branch(&self, branch: &str, from: &str) -> Result<()> {
        let repo = self.repo()?;

        let base = repo
            .find_branch(from, BranchType::Local)
            .map_err(|_| Error::BranchNotFound {
                name: from.to_string(),
            })?;
        let commit = base.get().peel_to_commit()?;

        repo.branch(branch, &commit, false)?;
        switch_head(&repo, branch)
    }

    fn pull(&self, remote: &str, branch: &str) -> Result<()> {
        let repo = self.repo()?;

        let mut remote_handle = repo.find_remote(remote).map_err(|_| Error::RemoteNotFound {
            name: remote.to_string(),
        })?;

        remote_handle
            .fetch(&[branch], None, None)
            .map_err(|e| Error::PullFailed {
                message: format!("Fetch failed: {}", e.message()),
            })?;

        let fetch_head = repo
            .find_reference("FETCH_HEAD")
            .map_err(|e| Error::PullFailed {
                message: format!("Could not find FETCH_HEAD: {}", e.message()),
            })?;

        let fetch_commit = fetch_head.peel_to_commit().map_err(|e| Error::PullFailed {
            message: format!("Could not resolve FETCH_HEAD: {}", e.message()),
        })?;

        let head_commit = repo.head()?.peel_to_commit()?;

        let (analysis, _) =
            repo.merge_analysis(&[&repo.find_annotated_commit(fetch_commit.id())?])?;

        if analysis.is_up_to_date() {
            return Ok(());
        }

        if analysis.is_fast_forward() {
            let refname = format!("refs/heads/{}", branch);
            let mut reference = repo.find_reference(&refname)?;
            reference.set_target(
                fetch_commit.id(),
                &format!("pull: fast-forward to {}", fetch_commit.id()),
            )?;
            repo.checkout_head(Some(CheckoutBuilder::default().force()))?;
            return Ok(());
        }

        Err(Error::CannotFastForward {
            message: format!(
                "Cannot fast-forward {} from {} to {}. Manual merge required.",
                branch,
                head_commit.id(),
                fetch_commit.id()
            ),
        })
    }

    fn stash(&self) -> Result<()> {
        let mut repo = self.repo()?;

        let signature = repo.signature()?;
        repo.stash_save(
            &signature,
            "repokit: shelved before branch switch",
            Some(StashFlags::INCLUDE_UNTRACKED),
        )?;

        Ok(())
    }

    fn add(&self, paths: &[String]) -> Result<()> {
        let repo = self.repo()?;

        let mut index = repo.index()?;
        index.add_all(
            paths.iter().map(String::as_str),
            IndexAddOption::DEFAULT,
            None,
        )?;
        // add_all only picks up files present on disk; stage deletions too.
        index.update_all(paths.iter().map(String::as_str), None)?;
        index.write()?;

        Ok(())
    }

    fn commit(&self, message: &str) -> Result<()> {
        let repo = self.repo()?;

        let mut index = repo.index()?;
        let tree_id = index.write_tree()?;
        let tree = repo.find_tree(tree_id)?;
        let signature = repo.signature()?;

        let parent = match repo.head() {
            Ok(head) => Some(head.peel_to_commit()?),
            Err(_) => None,
        };
        let parents: Vec<&git2::Commit> = parent.iter().collect();

        repo.commit(Some("HEAD"), &signature, &signature, message, &tree, &parents)?;

        Ok(())
    }

    fn last_commit(&self) -> Result<Option<CommitInfo>> {
        let repo = self.repo()?;
        commits::latest_commit(&repo)
    }

    fn push(&self, remote: &str, branch: &str) -> Result<()> {
        let repo = self.repo()?;

        let mut remote_handle = repo.find_remote(remote).map_err(|_| Error::RemoteNotFound {
            name: remote.to_string(),
        })?;

        let refspec = format!("refs/heads/{0}:refs/heads/{0}", branch);

        // Push using default options (relies on credential helpers)
        remote_handle
            .push(&[&refspec], None)
            .map_err(|e| Error::PushFailed {
                message: e.message().to_string(),
            })?;

        Ok(())
    }
}
