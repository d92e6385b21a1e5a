use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// The root directory is missing or is not a directory. Fatal.
    #[error("{} is not a directory", path.display())]
    InvalidRoot { path: PathBuf },

    #[error("no root directory given and GIT_PATH environment variable not set")]
    MissingRoot,

    /// A status, branch or dirty-state query failed for one repository.
    #[error("git failed in {}: {message}", path.display())]
    StatusTool { path: PathBuf, message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn status_tool(path: impl Into<PathBuf>, message: impl ToString) -> Self {
        Error::StatusTool {
            path: path.into(),
            message: message.to_string(),
        }
    }
}

/// Network or authentication failure while fetching. Always recovered.
#[derive(Debug, Error)]
#[error("fetch from {remote} failed: {message}")]
pub struct RemoteFetchError {
    pub remote: String,
    pub message: String,
}

/// The pull could not be run meaningfully (no upstream, divergent history, ...).
#[derive(Debug, Error)]
#[error("{reason}")]
pub struct PullSkipped {
    pub reason: String,
}
