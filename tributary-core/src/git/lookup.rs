//! Reading the live remote of a local clone

use std::path::Path;

use async_trait::async_trait;

use super::GitRepo;
use crate::{Error, Result};

/// Source of the remote a clone currently points at
#[async_trait]
pub trait RemoteLookup: Send + Sync {
    /// Raw remote string as configured in the clone
    async fn current_remote_uri(&self, local_path: &Path) -> Result<String>;
}

/// Reads a named remote from the clone's git configuration
#[derive(Debug, Clone)]
pub struct GitRemoteLookup {
    remote_name: String,
}

impl GitRemoteLookup {
    pub fn new(remote_name: impl Into<String>) -> Self {
        Self {
            remote_name: remote_name.into(),
        }
    }

    pub fn remote_name(&self) -> &str {
        &self.remote_name
    }
}

impl Default for GitRemoteLookup {
    fn default() -> Self {
        Self::new("origin")
    }
}

#[async_trait]
impl RemoteLookup for GitRemoteLookup {
    async fn current_remote_uri(&self, local_path: &Path) -> Result<String> {
        let path = local_path.to_path_buf();
        let name = self.remote_name.clone();

        // git2 is blocking; keep it off the scheduler threads.
        tokio::task::spawn_blocking(move || GitRepo::open(&path)?.remote_url(&name))
            .await
            .map_err(|e| Error::Other(format!("Remote lookup task failed: {}", e)))?
    }
}
