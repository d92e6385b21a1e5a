use crate::error::Result;
use crate::git::GitAdapter;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

pub const ORIGIN: &str = "origin";

/// A working copy found under the root. Read-only once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryHandle {
    pub working_dir: PathBuf,
    pub remote_url: Option<String>,
    pub branches: BTreeSet<String>,
}

impl RepositoryHandle {
    pub fn open(git: &dyn GitAdapter, working_dir: &Path) -> Result<Self> {
        Ok(RepositoryHandle {
            working_dir: working_dir.to_path_buf(),
            remote_url: git.remote_url(working_dir, ORIGIN)?,
            branches: git.branches(working_dir)?,
        })
    }

    /// True when every local branch is `main` or `master` (vacuously true with no branches).
    pub fn only_default_branches(&self) -> bool {
        self.branches.iter().all(|b| is_default_branch(b))
    }
}

pub fn is_default_branch(name: &str) -> bool {
    matches!(name, "main" | "master")
}
