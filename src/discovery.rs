use crate::error::{Error, Result};
use crate::git::GitAdapter;
use crate::repository::RepositoryHandle;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

const METADATA_DIR: &str = ".git";

/// Working directories of every repository under `root`, sorted and unique.
///
/// A `.git` entry only counts when it is a directory: submodules and linked
/// worktrees carry a `.git` file instead and are skipped without complaint.
/// The walk never descends into a metadata directory, so nothing nested inside
/// one is ever reported.
pub fn find_repositories(root: &Path) -> Result<Vec<PathBuf>> {
    if !root.is_dir() {
        return Err(Error::InvalidRoot {
            path: root.to_path_buf(),
        });
    }
    let root = root.canonicalize()?;

    let mut repos = BTreeSet::new();
    let mut walker = WalkDir::new(&root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter();

    while let Some(entry) = walker.next() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                debug!(error = %e, "skipping unreadable entry");
                continue;
            }
        };

        if entry.depth() == 0 || entry.file_name() != METADATA_DIR {
            continue;
        }

        if entry.file_type().is_dir() {
            walker.skip_current_dir();
            if let Some(working_dir) = entry.path().parent() {
                repos.insert(working_dir.to_path_buf());
            }
        } else {
            debug!(path = %entry.path().display(), "skipping non-directory .git (submodule)");
        }
    }

    Ok(repos.into_iter().collect())
}

/// Find every repository under `root` and read its branches and origin URL.
/// Repositories whose metadata can't be read are logged and left out.
pub fn discover(root: &Path, git: &dyn GitAdapter) -> Result<Vec<RepositoryHandle>> {
    let handles = find_repositories(root)?
        .into_iter()
        .filter_map(|path| match RepositoryHandle::open(git, &path) {
            Ok(handle) => Some(handle),
            Err(e) => {
                warn!("{e}");
                None
            }
        })
        .collect();
    Ok(handles)
}
