use crate::error::{Error, PullSkipped, RemoteFetchError, Result};
use gix::bstr::ByteSlice;
use std::collections::BTreeSet;
use std::path::Path;
use std::process::{Command, Output};
use tracing::debug;

/// Everything the tool needs from version control, behind one seam.
pub trait GitAdapter {
    /// Long-form `git status` text. Local only, never touches the network.
    fn status(&self, path: &Path) -> Result<String>;

    /// Tracked files modified in the index or working tree. Untracked files don't count.
    fn is_dirty(&self, path: &Path) -> Result<bool>;

    fn branches(&self, path: &Path) -> Result<BTreeSet<String>>;

    /// Short name of the checked out branch, `None` when HEAD is detached.
    fn current_branch(&self, path: &Path) -> Result<Option<String>>;

    fn remote_url(&self, path: &Path, remote: &str) -> Result<Option<String>>;

    fn fetch(&self, path: &Path, remote: &str) -> std::result::Result<(), RemoteFetchError>;

    fn pull(&self, path: &Path) -> std::result::Result<String, PullSkipped>;
}

/// Reads metadata with gix and shells out to `git` for everything that
/// needs porcelain behavior (status wording, fetch, pull).
#[derive(Debug, Default, Clone, Copy)]
pub struct GitCli;

impl GitCli {
    fn command(path: &Path) -> Command {
        let mut cmd = Command::new("git");
        cmd.arg("-C")
            .arg(path)
            // status markers are matched on the English long format, whatever
            // the user's status.short or status.aheadBehind say
            .args(["-c", "color.ui=false"])
            .args(["-c", "status.short=false", "-c", "status.aheadBehind=true"])
            .env("LC_ALL", "C")
            .env("GIT_TERMINAL_PROMPT", "0");
        cmd
    }

    fn run(path: &Path, args: &[&str]) -> std::io::Result<Output> {
        debug!(path = %path.display(), ?args, "running git");
        Self::command(path).args(args).output()
    }

    fn open(path: &Path) -> Result<gix::Repository> {
        gix::open(path).map_err(|e| Error::status_tool(path, e))
    }
}

fn first_line(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes)
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .unwrap_or_default()
        .to_string()
}

fn failure_message(output: &Output) -> String {
    let stderr = first_line(&output.stderr);
    if stderr.is_empty() {
        format!("git exited with {}", output.status)
    } else {
        stderr
    }
}

impl GitAdapter for GitCli {
    fn status(&self, path: &Path) -> Result<String> {
        let output = Self::run(path, &["status", "--long", "--ahead-behind"])
            .map_err(|e| Error::status_tool(path, e))?;
        if !output.status.success() {
            return Err(Error::status_tool(path, failure_message(&output)));
        }
        Ok(String::from_utf8_lossy(&output.stdout).trim_end().to_string())
    }

    fn is_dirty(&self, path: &Path) -> Result<bool> {
        let output = Self::run(path, &["status", "--porcelain", "--untracked-files=no"])
            .map_err(|e| Error::status_tool(path, e))?;
        if !output.status.success() {
            return Err(Error::status_tool(path, failure_message(&output)));
        }
        Ok(output.stdout.iter().any(|b| !b.is_ascii_whitespace()))
    }

    fn branches(&self, path: &Path) -> Result<BTreeSet<String>> {
        let repo = Self::open(path)?;
        let refs = repo.references().map_err(|e| Error::status_tool(path, e))?;
        let local_branches = refs
            .local_branches()
            .map_err(|e| Error::status_tool(path, e))?;

        Ok(local_branches
            .flatten()
            .map(|branch_ref| branch_ref.name().shorten().to_str_lossy().into_owned())
            .collect())
    }

    fn current_branch(&self, path: &Path) -> Result<Option<String>> {
        let repo = Self::open(path)?;
        let head = repo.head_name().map_err(|e| Error::status_tool(path, e))?;
        Ok(head.map(|name| name.shorten().to_str_lossy().into_owned()))
    }

    fn remote_url(&self, path: &Path, remote: &str) -> Result<Option<String>> {
        let repo = Self::open(path)?;
        match repo.try_find_remote(remote) {
            None => Ok(None),
            Some(Err(e)) => Err(Error::status_tool(path, e)),
            Some(Ok(remote)) => Ok(remote
                .url(gix::remote::Direction::Fetch)
                .map(|url| url.to_bstring().to_string())),
        }
    }

    fn fetch(&self, path: &Path, remote: &str) -> std::result::Result<(), RemoteFetchError> {
        let fetch_error = |message: String| RemoteFetchError {
            remote: remote.to_string(),
            message,
        };

        let output = Self::run(path, &["fetch", remote]).map_err(|e| fetch_error(e.to_string()))?;
        if !output.status.success() {
            return Err(fetch_error(failure_message(&output)));
        }
        Ok(())
    }

    fn pull(&self, path: &Path) -> std::result::Result<String, PullSkipped> {
        let output = Self::run(path, &["pull", "--ff-only"]).map_err(|e| PullSkipped {
            reason: e.to_string(),
        })?;
        if !output.status.success() {
            return Err(PullSkipped {
                reason: failure_message(&output),
            });
        }
        Ok(String::from_utf8_lossy(&output.stdout).trim_end().to_string())
    }
}
