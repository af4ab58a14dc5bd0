//! Check command - Verify each configured clone against its configured remote

use clap::Args;
use tributary_core::git::{GitRemoteLookup, RemoteLookup};
use tributary_core::Config;

/// Arguments for the check command
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Only check the named repository
    #[arg(short, long)]
    pub repository: Option<String>,
}

impl CheckArgs {
    /// Execute the check command; returns whether every repository passed
    pub async fn execute(&self, config: &Config) -> anyhow::Result<bool> {
        config.validate()?;

        let repos: Vec<_> = match &self.repository {
            Some(name) => vec![config
                .repository(name)
                .ok_or_else(|| anyhow::anyhow!("No repository named '{}' in config", name))?],
            None => config.repositories.iter().collect(),
        };

        if repos.is_empty() {
            println!("No repositories configured");
            return Ok(true);
        }

        let guard = config.origin.guard();
        let lookup = GitRemoteLookup::new(config.daemon.remote_name.clone());
        let mut all_passed = true;

        for repo in repos {
            let observed = match lookup.current_remote_uri(&repo.local_path).await {
                Ok(observed) => observed,
                Err(e) => {
                    println!("{}: ERROR {}", repo.name, e);
                    all_passed = false;
                    continue;
                }
            };

            let context = format!("{} check", repo.name);
            match guard.verify(&repo.remote_uri, &observed, &context) {
                Ok(outcome) => {
                    let identity = outcome
                        .verified()
                        .map(|uri| uri.identity())
                        .unwrap_or_default();
                    println!("{}: ok ({})", repo.name, identity);
                }
                Err(fault) => {
                    println!("{}: FAULT {}", repo.name, fault.reason());
                    all_passed = false;
                }
            }
        }

        Ok(all_passed)
    }
}
