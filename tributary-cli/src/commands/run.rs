//! Run command - Start one discovery loop per configured repository
//!
//! Ctrl-C stops every loop. On Unix, SIGHUP reloads the config file: a
//! repository whose `remote_uri` changed is reconfigured, and a halted
//! repository whose remote did not change is resumed.
//!
//! A reload is not scoped to one repository. Every halted repository with
//! an unchanged remote resumes and polls once; any whose clone still
//! reports the wrong origin halts and alerts again.

use clap::Args;
use tributary_core::config::RepositoryConfig;
use tributary_core::remote;
use tributary_core::{Config, DiscoveryHandle, DiscoveryLoop, LoopStatus, PollPhase};

/// Arguments for the run command
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Only run the named repositories
    #[arg(short, long)]
    pub repository: Vec<String>,

    /// Print the loops that would start without starting them
    #[arg(long)]
    pub dry_run: bool,
}

impl RunArgs {
    /// Execute the run command until Ctrl-C
    pub async fn execute(
        &self,
        config: &Config,
        reload: impl Fn() -> tributary_core::Result<Config>,
    ) -> anyhow::Result<()> {
        config.validate()?;

        for name in &self.repository {
            if config.repository(name).is_none() {
                anyhow::bail!("No repository named '{}' in config", name);
            }
        }

        let repos: Vec<_> = config
            .repositories
            .iter()
            .filter(|r| self.repository.is_empty() || self.repository.contains(&r.name))
            .collect();

        if repos.is_empty() {
            anyhow::bail!("No repositories configured");
        }

        if self.dry_run {
            for repo in &repos {
                println!(
                    "[Dry run] Would poll {} at {} every {:?} (remote {})",
                    repo.name,
                    repo.local_path.display(),
                    repo.effective_poll_interval(&config.daemon),
                    remote::redact(&repo.remote_uri)
                );
            }
            return Ok(());
        }

        let handles: Vec<_> = repos
            .into_iter()
            .map(|repo| DiscoveryLoop::from_config(config, repo).spawn())
            .collect();

        tracing::info!(loops = handles.len(), "Tributary daemon running; Ctrl-C to stop");

        let mut hangup = Hangup::new()?;
        loop {
            tokio::select! {
                result = tokio::signal::ctrl_c() => {
                    result?;
                    break;
                }
                _ = hangup.recv() => {
                    match reload().and_then(|c| c.validate().map(|_| c)) {
                        Ok(new_config) => apply_reload(&handles, &new_config).await,
                        Err(e) => tracing::error!(error = %e, "Config reload failed; keeping current settings"),
                    }
                }
            }
        }

        tracing::info!("Shutting down");
        for handle in handles {
            let status = handle.status();
            if status.phase == PollPhase::Halted {
                tracing::warn!(
                    repository = %status.repository,
                    reason = status.halted_reason.as_deref().unwrap_or(""),
                    "Repository was halted at shutdown"
                );
            }
            handle.shutdown().await?;
        }

        Ok(())
    }
}

async fn apply_reload(handles: &[DiscoveryHandle], config: &Config) {
    for handle in handles {
        let Some(repo) = config.repository(handle.repository()) else {
            tracing::warn!(
                repository = handle.repository(),
                "Repository removed from config; restart to stop its loop"
            );
            continue;
        };

        let result = match reload_action(&handle.status(), repo) {
            ReloadAction::Reconfigure(remote_uri) => handle.reconfigure(remote_uri).await,
            ReloadAction::Resume => {
                tracing::info!(repository = handle.repository(), "Resuming halted repository after reload");
                handle.resume().await
            }
            ReloadAction::Keep => Ok(()),
        };

        if let Err(e) = result {
            tracing::error!(repository = handle.repository(), error = %e, "Failed to apply reload");
        }
    }
}

/// What a config reload does to one running loop
#[derive(Debug, PartialEq, Eq)]
enum ReloadAction {
    Reconfigure(String),
    Resume,
    Keep,
}

fn reload_action(status: &LoopStatus, repo: &RepositoryConfig) -> ReloadAction {
    // The published remote is masked, so compare masked forms.
    if remote::redact(&repo.remote_uri) != status.configured_remote {
        ReloadAction::Reconfigure(repo.remote_uri.clone())
    } else if status.phase == PollPhase::Halted {
        ReloadAction::Resume
    } else {
        ReloadAction::Keep
    }
}

/// SIGHUP stream; never fires on platforms without it
struct Hangup {
    #[cfg(unix)]
    signal: tokio::signal::unix::Signal,
}

impl Hangup {
    fn new() -> std::io::Result<Self> {
        Ok(Self {
            #[cfg(unix)]
            signal: tokio::signal::unix::signal(tokio::signal::unix::SignalKind::hangup())?,
        })
    }

    async fn recv(&mut self) {
        #[cfg(unix)]
        {
            self.signal.recv().await;
        }
        #[cfg(not(unix))]
        {
            std::future::pending::<()>().await;
        }
    }
}
