use super::{INDENT, indent, print_header};
use crate::discovery::discover;
use crate::error::Result;
use crate::git::GitAdapter;
use crate::repository::RepositoryHandle;
use crate::status::{Classification, RepoStatus, classify};
use crate::style::{Style, paint};
use crate::sync::fetch_origin_best_effort;
use std::path::Path;
use termcolor::WriteColor;
use tracing::warn;

#[derive(Debug, Clone, Copy)]
pub struct ReportOptions {
    /// Fetch `origin` before reading each status.
    pub fetch: bool,
    /// Also print repositories that are clean and up to date.
    pub print_all: bool,
    /// At 1 or more, print the status label instead of the full `git status` text.
    pub quiet: u8,
}

impl Default for ReportOptions {
    fn default() -> Self {
        ReportOptions {
            fetch: true,
            print_all: false,
            quiet: 0,
        }
    }
}

struct ReportEntry<'a> {
    handle: &'a RepositoryHandle,
    classification: Classification,
}

pub fn execute(
    git: &dyn GitAdapter,
    root: &Path,
    options: &ReportOptions,
    out: &mut dyn WriteColor,
) -> Result<()> {
    writeln!(out, "Getting git repositories at {}...", root.display())?;
    let handles = discover(root, git)?;
    writeln!(out, "Found {} git repositories.", handles.len())?;

    report(git, &handles, options, out)
}

/// Print the status of every repository, then the ones that need reviewing.
pub fn report(
    git: &dyn GitAdapter,
    handles: &[RepositoryHandle],
    options: &ReportOptions,
    out: &mut dyn WriteColor,
) -> Result<()> {
    writeln!(out, "\nRepository statuses:")?;

    let mut entries = Vec::with_capacity(handles.len());
    for handle in handles {
        if options.fetch {
            fetch_origin_best_effort(git, handle);
        }

        let classification = match classify(git, handle) {
            Ok(classification) => classification,
            Err(e) => {
                warn!("{e}");
                continue;
            }
        };

        if options.print_all || classification.status != RepoStatus::CleanAndUpdated {
            print_header(handle, handle.remote_url.as_deref(), out)?;
            print_body(&classification, options.quiet, out)?;
        }

        entries.push(ReportEntry {
            handle,
            classification,
        });
    }

    print_needs_reviewing(&entries, out)?;
    out.flush()?;
    Ok(())
}

fn print_body(classification: &Classification, quiet: u8, out: &mut dyn WriteColor) -> Result<()> {
    let style = classification.status.style();
    let body = if quiet > 0 {
        format!("{INDENT}{}", classification.status)
    } else {
        indent(&classification.text)
    };
    paint(out, &body, style)?;
    writeln!(out)?;
    Ok(())
}

/// Repositories with branches other than `main`/`master` list every branch;
/// the rest are only listed when dirty.
fn print_needs_reviewing(entries: &[ReportEntry<'_>], out: &mut dyn WriteColor) -> Result<()> {
    writeln!(out, "\nRepositories that need reviewing:")?;

    for entry in entries {
        let handle = entry.handle;
        if handle.only_default_branches() {
            if entry.classification.flags.dirty {
                print_header(handle, None, out)?;
                paint(out, &format!("{INDENT}repo is dirty"), Style::Error)?;
                writeln!(out)?;
            }
        } else {
            print_header(handle, None, out)?;
            for branch in &handle.branches {
                writeln!(out, "{INDENT}{branch}")?;
            }
        }
    }
    Ok(())
}
