//! In-memory [`GitAdapter`] for unit tests.

use crate::error::{Error, PullSkipped, RemoteFetchError, Result};
use crate::git::GitAdapter;
use crate::repository::RepositoryHandle;
use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default)]
pub struct FakeRepo {
    current_branch: Option<String>,
    branches: BTreeSet<String>,
    status: String,
    dirty: bool,
    remote_url: Option<String>,
    fetch_error: Option<String>,
    pull_result: Option<std::result::Result<String, String>>,
    broken: bool,
}

impl FakeRepo {
    pub fn on(branch: &str) -> Self {
        FakeRepo {
            current_branch: Some(branch.to_string()),
            branches: BTreeSet::from([branch.to_string()]),
            status: format!(
                "On branch {branch}\nYour branch is up to date with 'origin/{branch}'.\n\nnothing to commit, working tree clean"
            ),
            ..Default::default()
        }
    }

    pub fn branch(mut self, name: &str) -> Self {
        self.branches.insert(name.to_string());
        self
    }

    pub fn status(mut self, text: &str) -> Self {
        self.status = text.to_string();
        self
    }

    pub fn behind(self) -> Self {
        let branch = self.current_branch.clone().unwrap_or_default();
        self.status(&format!(
            "On branch {branch}\nYour branch is behind 'origin/{branch}' by 1 commit, and can be fast-forwarded.\n\nnothing to commit, working tree clean"
        ))
    }

    pub fn dirty(mut self) -> Self {
        self.dirty = true;
        self
    }

    pub fn remote(mut self, url: &str) -> Self {
        self.remote_url = Some(url.to_string());
        self
    }

    pub fn fetch_fails(mut self, message: &str) -> Self {
        self.fetch_error = Some(message.to_string());
        self
    }

    pub fn pull_output(mut self, output: &str) -> Self {
        self.pull_result = Some(Ok(output.to_string()));
        self
    }

    pub fn pull_skips(mut self, reason: &str) -> Self {
        self.pull_result = Some(Err(reason.to_string()));
        self
    }

    pub fn broken(mut self) -> Self {
        self.broken = true;
        self
    }
}

#[derive(Debug, Default)]
pub struct FakeGit {
    repos: RefCell<BTreeMap<PathBuf, FakeRepo>>,
    fetches: RefCell<Vec<PathBuf>>,
    pulls: RefCell<Vec<PathBuf>>,
}

impl FakeGit {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_repo(self, path: &str, repo: FakeRepo) -> Self {
        self.repos.borrow_mut().insert(PathBuf::from(path), repo);
        self
    }

    pub fn handle(&self, path: &str) -> RepositoryHandle {
        RepositoryHandle::open(self, Path::new(path)).unwrap()
    }

    pub fn handles(&self) -> Vec<RepositoryHandle> {
        let paths: Vec<PathBuf> = self.repos.borrow().keys().cloned().collect();
        paths
            .iter()
            .map(|p| RepositoryHandle::open(self, p).unwrap())
            .collect()
    }

    pub fn fetches(&self) -> Vec<PathBuf> {
        self.fetches.borrow().clone()
    }

    pub fn pulls(&self) -> Vec<PathBuf> {
        self.pulls.borrow().clone()
    }

    fn repo(&self, path: &Path) -> Result<FakeRepo> {
        self.repos
            .borrow()
            .get(path)
            .cloned()
            .ok_or_else(|| Error::status_tool(path, "not a git repository"))
    }

    fn working_repo(&self, path: &Path) -> Result<FakeRepo> {
        let repo = self.repo(path)?;
        if repo.broken {
            return Err(Error::status_tool(path, "fatal: bad object HEAD"));
        }
        Ok(repo)
    }
}

impl GitAdapter for FakeGit {
    fn status(&self, path: &Path) -> Result<String> {
        Ok(self.working_repo(path)?.status)
    }

    fn is_dirty(&self, path: &Path) -> Result<bool> {
        Ok(self.working_repo(path)?.dirty)
    }

    fn branches(&self, path: &Path) -> Result<BTreeSet<String>> {
        Ok(self.repo(path)?.branches)
    }

    fn current_branch(&self, path: &Path) -> Result<Option<String>> {
        Ok(self.repo(path)?.current_branch)
    }

    fn remote_url(&self, path: &Path, remote: &str) -> Result<Option<String>> {
        let repo = self.repo(path)?;
        Ok(repo.remote_url.filter(|_| remote == "origin"))
    }

    fn fetch(&self, path: &Path, remote: &str) -> std::result::Result<(), RemoteFetchError> {
        self.fetches.borrow_mut().push(path.to_path_buf());
        match self.repo(path).ok().and_then(|r| r.fetch_error) {
            Some(message) => Err(RemoteFetchError {
                remote: remote.to_string(),
                message,
            }),
            None => Ok(()),
        }
    }

    fn pull(&self, path: &Path) -> std::result::Result<String, PullSkipped> {
        self.pulls.borrow_mut().push(path.to_path_buf());
        let mut repos = self.repos.borrow_mut();
        let Some(repo) = repos.get_mut(path) else {
            return Err(PullSkipped {
                reason: "not a git repository".to_string(),
            });
        };

        match repo.pull_result.clone() {
            Some(Err(reason)) => Err(PullSkipped { reason }),
            result => {
                let branch = repo.current_branch.clone().unwrap_or_default();
                repo.status = format!(
                    "On branch {branch}\nYour branch is up to date with 'origin/{branch}'.\n\nnothing to commit, working tree clean"
                );
                Ok(result
                    .and_then(|r| r.ok())
                    .unwrap_or_else(|| "Fast-forward".to_string()))
            }
        }
    }
}
