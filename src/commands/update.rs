use super::{INDENT, indent, print_header};
use crate::discovery::discover;
use crate::error::Result;
use crate::git::GitAdapter;
use crate::repository::{RepositoryHandle, is_default_branch};
use crate::status::classify;
use crate::style::{Style, paint};
use crate::sync::fetch_origin_best_effort;
use std::path::Path;
use termcolor::WriteColor;
use tracing::{debug, warn};

pub fn execute(
    git: &dyn GitAdapter,
    root: &Path,
    fetch: bool,
    out: &mut dyn WriteColor,
) -> Result<()> {
    writeln!(out, "Getting git repositories at {}...", root.display())?;
    let handles = discover(root, git)?;
    writeln!(out, "Found {} git repositories.", handles.len())?;

    update_main_branches(git, &handles, fetch, out)
}

/// Pull every repository that sits on `main` or `master` and is behind its
/// upstream. Anything else is left untouched and prints nothing.
pub fn update_main_branches(
    git: &dyn GitAdapter,
    handles: &[RepositoryHandle],
    fetch: bool,
    out: &mut dyn WriteColor,
) -> Result<()> {
    for handle in handles {
        let path = &handle.working_dir;
        if fetch {
            // tracking refs from an earlier fetch may already say "behind"
            fetch_origin_best_effort(git, handle);
        }

        let classification = match classify(git, handle) {
            Ok(classification) => classification,
            Err(e) => {
                warn!("{e}");
                continue;
            }
        };
        if !classification.flags.behind {
            continue;
        }

        let branch = match git.current_branch(path) {
            Ok(Some(branch)) => branch,
            Ok(None) => {
                debug!(path = %path.display(), "detached HEAD, not pulling");
                continue;
            }
            Err(e) => {
                warn!("{e}");
                continue;
            }
        };
        if !is_default_branch(&branch) {
            debug!(path = %path.display(), branch = %branch, "not on main/master, not pulling");
            continue;
        }

        print_header(handle, handle.remote_url.as_deref(), out)?;
        match git.pull(path) {
            Ok(output) => paint(out, &indent(&output), Style::Success)?,
            Err(skipped) => paint(
                out,
                &format!("{INDENT}pull skipped: {skipped}"),
                Style::Warning,
            )?,
        }
        writeln!(out)?;
    }

    out.flush()?;
    Ok(())
}
