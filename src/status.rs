use crate::error::Result;
use crate::git::GitAdapter;
use crate::repository::RepositoryHandle;
use crate::style::Style;
use std::fmt;

const NOTHING_TO_COMMIT: &str = "nothing to commit";
const BEHIND: &str = "Your branch is behind";
const AHEAD: &str = "Your branch is ahead";
const DIVERGED: &str = "have diverged";
const UNTRACKED: &str = "Untracked files:";
const DIRTY_MARKERS: [&str; 3] = [
    "Changes not staged for commit",
    "Changes to be committed",
    "Unmerged paths",
];

/// Every predicate that matched. Several can hold at once.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusFlags {
    pub nothing_to_commit: bool,
    pub dirty: bool,
    pub behind: bool,
    pub ahead: bool,
    pub diverged: bool,
    pub untracked: bool,
    pub multiple_branches: bool,
}

impl StatusFlags {
    pub fn from_status_text(text: &str, is_dirty: bool, branch_count: usize) -> Self {
        StatusFlags {
            nothing_to_commit: text.contains(NOTHING_TO_COMMIT),
            dirty: is_dirty || DIRTY_MARKERS.iter().any(|m| text.contains(m)),
            behind: text.contains(BEHIND),
            ahead: text.contains(AHEAD),
            diverged: text.contains(DIVERGED),
            untracked: text.contains(UNTRACKED),
            multiple_branches: branch_count > 1,
        }
    }

    fn up_to_date(&self) -> bool {
        !(self.behind || self.ahead || self.diverged)
    }
}

/// Single-label summary of a repository, in priority order: the first
/// variant whose predicate holds wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepoStatus {
    CleanAndUpdated,
    Dirty,
    BehindRemote,
    UntrackedFiles,
    MultipleBranches,
    Unknown,
}

impl RepoStatus {
    pub fn from_flags(flags: &StatusFlags) -> Self {
        if flags.nothing_to_commit && !flags.dirty && flags.up_to_date() {
            RepoStatus::CleanAndUpdated
        } else if flags.dirty {
            RepoStatus::Dirty
        } else if flags.behind {
            RepoStatus::BehindRemote
        } else if flags.untracked {
            RepoStatus::UntrackedFiles
        } else if flags.multiple_branches {
            RepoStatus::MultipleBranches
        } else {
            RepoStatus::Unknown
        }
    }

    pub fn style(self) -> Style {
        match self {
            RepoStatus::CleanAndUpdated => Style::Success,
            RepoStatus::Dirty => Style::Error,
            RepoStatus::BehindRemote | RepoStatus::UntrackedFiles | RepoStatus::MultipleBranches => {
                Style::Warning
            }
            RepoStatus::Unknown => Style::Attention,
        }
    }
}

impl fmt::Display for RepoStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RepoStatus::CleanAndUpdated => "clean and updated",
            RepoStatus::Dirty => "dirty",
            RepoStatus::BehindRemote => "behind remote",
            RepoStatus::UntrackedFiles => "untracked files",
            RepoStatus::MultipleBranches => "multiple branches",
            RepoStatus::Unknown => "unknown",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub text: String,
    pub flags: StatusFlags,
    pub status: RepoStatus,
}

pub fn classify(git: &dyn GitAdapter, handle: &RepositoryHandle) -> Result<Classification> {
    let text = git.status(&handle.working_dir)?;
    let is_dirty = git.is_dirty(&handle.working_dir)?;
    let flags = StatusFlags::from_status_text(&text, is_dirty, handle.branches.len());
    let status = RepoStatus::from_flags(&flags);
    Ok(Classification {
        text,
        flags,
        status,
    })
}
