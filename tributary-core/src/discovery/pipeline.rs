//! Collaborators on either side of a verified poll
//!
//! The loop hands a verified remote to a [`CommitIngestor`] and reports
//! origin faults to a [`FaultReporter`]. How commits are actually fetched
//! and stored is up to the ingestor.

use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;

use crate::remote::RemoteUri;
use crate::{Error, Result};

/// Identifies the repository a loop serves
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepositoryHandle {
    pub name: String,
    pub local_path: PathBuf,
}

impl RepositoryHandle {
    pub fn new(name: impl Into<String>, local_path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            local_path: local_path.into(),
        }
    }
}

impl fmt::Display for RepositoryHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Receives each verified poll and ingests newly discovered commits
///
/// Errors are treated as transient: the loop backs off and polls again.
#[async_trait]
pub trait CommitIngestor: Send + Sync {
    async fn ingest(&self, repository: &RepositoryHandle, verified: &RemoteUri) -> Result<()>;
}

/// Operator alerting for halted loops
#[async_trait]
pub trait FaultReporter: Send + Sync {
    /// Called once each time a loop enters the halted phase
    async fn raise_fault(&self, repository: &RepositoryHandle, reason: &str, context: &str);
}

/// Ingestor that only records the verified poll in the log
#[derive(Debug, Clone, Default)]
pub struct LoggingIngestor;

#[async_trait]
impl CommitIngestor for LoggingIngestor {
    async fn ingest(&self, repository: &RepositoryHandle, verified: &RemoteUri) -> Result<()> {
        tracing::info!(
            repository = %repository,
            identity = %verified.identity(),
            "Verified poll ready for ingestion"
        );
        Ok(())
    }
}

/// Runs an operator-supplied hook inside the local clone
///
/// The command is run through `sh -c` with these variables set:
/// - `TRIBUTARY_REPOSITORY`: repository name
/// - `TRIBUTARY_REMOTE_URI`: verified remote as read from the clone
/// - `TRIBUTARY_REMOTE_HOST`: lowercased host
/// - `TRIBUTARY_REMOTE_PATH`: normalized repository path
#[derive(Debug, Clone)]
pub struct CommandIngestor {
    command: String,
}

impl CommandIngestor {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    fn build_command(&self, workdir: &Path, repository: &RepositoryHandle, verified: &RemoteUri) -> Command {
        let mut cmd = Command::new("sh");
        cmd.arg("-c")
            .arg(&self.command)
            .current_dir(workdir)
            .env("TRIBUTARY_REPOSITORY", &repository.name)
            .env("TRIBUTARY_REMOTE_URI", verified.raw())
            .env("TRIBUTARY_REMOTE_HOST", verified.canonical_host())
            .env("TRIBUTARY_REMOTE_PATH", verified.path())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        cmd
    }
}

#[async_trait]
impl CommitIngestor for CommandIngestor {
    async fn ingest(&self, repository: &RepositoryHandle, verified: &RemoteUri) -> Result<()> {
        let output = self
            .build_command(&repository.local_path, repository, verified)
            .output()
            .await
            .map_err(|e| Error::Ingest(format!("Failed to run '{}': {}", self.command, e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::Ingest(format!(
                "'{}' exited with {}: {}",
                self.command,
                output.status,
                stderr.trim()
            )));
        }

        tracing::debug!(
            repository = %repository,
            command = %self.command,
            "Ingest command completed"
        );
        Ok(())
    }
}

/// Reports faults as error-level log events
#[derive(Debug, Clone, Default)]
pub struct TracingFaultReporter;

#[async_trait]
impl FaultReporter for TracingFaultReporter {
    async fn raise_fault(&self, repository: &RepositoryHandle, reason: &str, context: &str) {
        tracing::error!(
            repository = %repository,
            local_path = %repository.local_path.display(),
            context,
            "Commit discovery halted: {}. Confirm the remote and resume or reconfigure the repository.",
            reason
        );
    }
}
