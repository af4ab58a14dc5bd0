//! Verify command - Compare two remote strings without touching any clone

use clap::Args;
use tributary_core::Config;

/// Arguments for the verify command
#[derive(Args, Debug)]
pub struct VerifyArgs {
    /// Remote the repository was configured against
    #[arg(required = true)]
    pub configured: String,

    /// Remote the clone currently reports
    #[arg(required = true)]
    pub observed: String,

    /// Label included in fault messages
    #[arg(long, default_value = "(command line)")]
    pub context: String,

    /// Print the full outcome as JSON
    #[arg(long)]
    pub json: bool,
}

impl VerifyArgs {
    /// Execute the verify command; returns whether the origins match
    pub fn execute(&self, config: &Config) -> anyhow::Result<bool> {
        let guard = config.origin.guard();

        match guard.verify(&self.configured, &self.observed, &self.context) {
            Ok(outcome) => {
                if self.json {
                    println!("{}", serde_json::to_string_pretty(&outcome)?);
                } else {
                    println!("Same origin: {}", outcome.reason);
                }
                Ok(true)
            }
            Err(fault) => {
                if self.json {
                    println!("{}", serde_json::to_string_pretty(&fault)?);
                } else {
                    println!("Fault ({}): {}", fault.kind, fault.reason());
                }
                Ok(false)
            }
        }
    }
}
