use crate::error::RemoteFetchError;
use crate::git::GitAdapter;
use crate::repository::{ORIGIN, RepositoryHandle};
use tracing::debug;

/// Fetch `origin`. Repositories without one are left alone.
pub fn fetch_origin(
    git: &dyn GitAdapter,
    handle: &RepositoryHandle,
) -> Result<(), RemoteFetchError> {
    if handle.remote_url.is_none() {
        debug!(path = %handle.working_dir.display(), "no origin remote, not fetching");
        return Ok(());
    }
    git.fetch(&handle.working_dir, ORIGIN)
}

/// Stale local tracking data is still worth reporting, so a failed fetch is
/// only logged.
pub fn fetch_origin_best_effort(git: &dyn GitAdapter, handle: &RepositoryHandle) {
    if let Err(e) = fetch_origin(git, handle) {
        debug!(path = %handle.working_dir.display(), "{e}");
    }
}
