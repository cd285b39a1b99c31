//! Harvestman command-line interface
//!
//! Two modes backed by the same state directory: `discover` crawls the site
//! and records file links in the manifest, `download` fetches manifest
//! entries that changed since the last run.

use anyhow::Result;
use clap::{Parser, Subcommand};
use harvestman::config::load_config;
use harvestman::crawler::discover;
use harvestman::download::download;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Harvestman: an incremental site file harvester
#[derive(Parser, Debug)]
#[command(name = "harvestman")]
#[command(version)]
#[command(about = "Crawl a site for file links, then download them incrementally", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose", global = true)]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Crawl the site and record discovered file links in the manifest
    Discover {
        /// Path to YAML configuration file
        #[arg(short, long, value_name = "CONFIG")]
        config: PathBuf,
    },

    /// Download manifest entries, skipping unchanged files
    Download {
        /// Path to YAML configuration file
        #[arg(short, long, value_name = "CONFIG")]
        config: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose, cli.quiet);

    match cli.command {
        Command::Discover { config } => {
            let config = load_config(&config)?;
            let report = discover(&config).await?;
            let total: usize = report.discovered.values().sum();
            println!(
                "Visited {} pages; discovered {} files: {:?}",
                report.pages_visited, total, report.discovered
            );
        }
        Command::Download { config } => {
            let config = load_config(&config)?;
            let report = download(&config).await?;
            println!(
                "Downloaded {} files; skipped {} unchanged; {} failures",
                report.downloaded, report.skipped, report.failed
            );
        }
    }

    Ok(())
}

/// Sets up the tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("harvestman=info,warn"),
            1 => EnvFilter::new("harvestman=debug,info"),
            2 => EnvFilter::new("harvestman=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
