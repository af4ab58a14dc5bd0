//! Local clone access

use std::path::{Path, PathBuf};

use git2::Repository;

use crate::{Error, Result};

/// A local clone the daemon polls
pub struct GitRepo {
    /// The underlying git2 repository
    repo: Repository,
    /// Path the clone was opened at
    path: PathBuf,
}

impl std::fmt::Debug for GitRepo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitRepo")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

impl GitRepo {
    /// Open the clone at exactly this path
    ///
    /// Unlike discovery, this never walks up into a parent repository; the
    /// configured clone path must itself be a repository (bare or not).
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let repo = Repository::open(path).map_err(|e| {
            if e.code() == git2::ErrorCode::NotFound {
                Error::Git(format!("Not a git repository: {}", path.display()))
            } else {
                Error::Git(format!("Failed to open {}: {}", path.display(), e.message()))
            }
        })?;

        Ok(Self {
            repo,
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// URL of the named remote
    pub fn remote_url(&self, name: &str) -> Result<String> {
        let remote = self.repo.find_remote(name).map_err(|e| {
            if e.code() == git2::ErrorCode::NotFound {
                Error::Git(format!(
                    "No remote named '{}' in {}",
                    name,
                    self.path.display()
                ))
            } else {
                Error::from(e)
            }
        })?;

        // A non-UTF-8 URL is still handed to the guard, which rejects it.
        let url = match remote.url() {
            Some(url) => url.to_string(),
            None => String::from_utf8_lossy(remote.url_bytes()).into_owned(),
        };
        Ok(url)
    }
}
