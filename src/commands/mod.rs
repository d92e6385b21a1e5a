use crate::error::Result;
use crate::repository::RepositoryHandle;
use crate::style::{Style, paint};
use termcolor::WriteColor;

pub mod report;
pub mod update;

pub(crate) const INDENT: &str = "    ";

/// Blank line, then the working directory, then the remote URL if one is given.
pub(crate) fn print_header(
    handle: &RepositoryHandle,
    remote_url: Option<&str>,
    out: &mut dyn WriteColor,
) -> Result<()> {
    writeln!(out)?;
    paint(out, &handle.working_dir.display().to_string(), Style::Emphasis)?;
    if let Some(url) = remote_url {
        write!(out, " ")?;
        paint(out, url, Style::Muted)?;
    }
    writeln!(out)?;
    Ok(())
}

/// Indent every non-blank line; blank lines stay empty.
pub(crate) fn indent(text: &str) -> String {
    text.lines()
        .map(|line| {
            if line.trim().is_empty() {
                String::new()
            } else {
                format!("{INDENT}{line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
