//! Tributary CLI - Commit discovery daemon with remote-origin verification

mod commands;

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::{Parser, Subcommand};
use tributary_core::Config;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use commands::{CheckArgs, RunArgs, VerifyArgs};

/// Tributary: discover commits only from the repository you configured
#[derive(Parser, Debug)]
#[command(name = "tributary")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file (defaults to ~/.config/tributary/config.toml)
    #[arg(long, global = true, env = "TRIBUTARY_CONFIG")]
    config: Option<PathBuf>,

    /// Default poll interval, e.g. 30s (overrides config and env)
    #[arg(long, global = true, value_parser = humantime_serde::re::humantime::parse_duration)]
    poll_interval: Option<Duration>,

    /// Remote to read from each clone (overrides config and env)
    #[arg(long, global = true)]
    remote_name: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show version information
    Version,

    /// Check whether two remote strings name the same origin
    Verify(VerifyArgs),

    /// Verify every configured repository's clone once
    Check(CheckArgs),

    /// Run the discovery daemon
    Run(RunArgs),

    /// Show current configuration
    Config,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .init();

    // Load configuration with overrides
    let config = Config::load_with_overrides(
        cli.config.as_deref(),
        cli.poll_interval,
        cli.remote_name.clone(),
    )?;

    if cli.verbose {
        tracing::info!(
            poll_interval = ?config.daemon.poll_interval,
            remote_name = %config.daemon.remote_name,
            repositories = config.repositories.len(),
            "Configuration loaded"
        );
    }

    let passed = match cli.command {
        Some(Commands::Version) => {
            println!("tributary {}", env!("CARGO_PKG_VERSION"));
            true
        }
        Some(Commands::Verify(args)) => args.execute(&config)?,
        Some(Commands::Check(args)) => args.execute(&config).await?,
        Some(Commands::Run(args)) => {
            let reload = || {
                Config::load_with_overrides(
                    cli.config.as_deref(),
                    cli.poll_interval,
                    cli.remote_name.clone(),
                )
            };
            args.execute(&config, reload).await?;
            true
        }
        Some(Commands::Config) => {
            print_config(&config, cli.config.as_deref());
            true
        }
        None => {
            println!("Tributary - commit discovery with remote-origin verification");
            println!();
            println!("Use --help for usage information");
            true
        }
    };

    Ok(if passed {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn print_config(config: &Config, explicit_path: Option<&std::path::Path>) {
    println!("Tributary Configuration");
    println!("=======================");
    println!();
    println!("Daemon Settings:");
    println!("  poll_interval: {:?}", config.daemon.poll_interval);
    println!("  remote_name: {}", config.daemon.remote_name);
    println!(
        "  retry: {:?} doubling up to {:?}",
        config.daemon.retry.initial_backoff, config.daemon.retry.max_backoff
    );
    println!();
    println!("Origin Policy:");
    if config.origin.host_aliases.is_empty() {
        println!("  strict (host and path must match)");
    } else {
        for group in &config.origin.host_aliases {
            println!("  alias group: {}", group.join(", "));
        }
    }
    println!();
    println!("Repositories:");
    if config.repositories.is_empty() {
        println!("  (none)");
    }
    for repo in &config.repositories {
        println!("  {}", repo.name);
        println!("    remote_uri: {}", tributary_core::remote::redact(&repo.remote_uri));
        println!("    local_path: {}", repo.local_path.display());
        println!(
            "    poll_interval: {:?}",
            repo.effective_poll_interval(&config.daemon)
        );
        if let Some(command) = &repo.ingest_command {
            println!("    ingest_command: {}", command);
        }
    }
    println!();

    let path = explicit_path
        .map(|p| p.to_path_buf())
        .or_else(Config::default_config_path);
    if let Some(path) = path {
        println!("Config file: {}", path.display());
        if path.exists() {
            println!("  (exists)");
        } else {
            println!("  (not found - using defaults)");
        }
    }
}
