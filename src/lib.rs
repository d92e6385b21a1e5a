use std::env;
use std::path::PathBuf;

pub mod commands;
pub mod discovery;
pub mod error;
pub mod git;
pub mod repository;
pub mod status;
pub mod style;
pub mod sync;

#[cfg(test)]
mod testing;

pub use error::{Error, Result};

/// Root directory to scan: the given one, else `$GIT_PATH`, with `~/` expanded.
pub fn get_base_dir(provided_dir: Option<String>) -> Result<PathBuf> {
    let dir = match provided_dir {
        Some(dir) => dir,
        None => env::var("GIT_PATH").map_err(|_| Error::MissingRoot)?,
    };
    Ok(PathBuf::from(expand_tilde(&dir, env::var("HOME").ok().as_deref())))
}

fn expand_tilde(path: &str, home: Option<&str>) -> String {
    match (path.strip_prefix("~/"), home) {
        (Some(rest), Some(home)) => format!("{}/{}", home.trim_end_matches('/'), rest),
        _ => path.to_string(),
    }
}
