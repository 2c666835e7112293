//! CLI for bootfetch.

mod commands;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use bootfetch_core::config;
use bootfetch_core::FetchError;
use std::path::PathBuf;

use commands::{run_checksum, run_fetch};

/// Top-level CLI. With no subcommand, fetches the configured installer.
#[derive(Debug, Parser)]
#[command(name = "bootfetch")]
#[command(about = "Download a bootstrap installer over HTTPS and save it to disk", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<CliCommand>,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Download a file and save it (defaults come from config.toml).
    Fetch(FetchArgs),

    /// Compute SHA-256 of a file (e.g. after download).
    Checksum {
        /// Path to the file.
        path: PathBuf,
    },
}

#[derive(Debug, Args, Default)]
pub struct FetchArgs {
    /// HTTPS URL to download (default: configured source_url).
    pub url: Option<String>,

    /// Output path (default: configured destination).
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Accept a plain http:// URL.
    #[arg(long)]
    pub allow_http: bool,

    /// Print the SHA-256 of the saved file.
    #[arg(long)]
    pub sha256: bool,
}

impl Cli {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();

        let args = match cli.command {
            Some(CliCommand::Checksum { path }) => return run_checksum(&path).await.map(|_| ()),
            Some(CliCommand::Fetch(args)) => args,
            None => FetchArgs::default(),
        };

        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);
        run_fetch(&cfg, args).await?;

        Ok(())
    }
}

/// One-line stderr report. Fetch failures name their kind:
/// `bootfetch error: <kind>: <details>`.
pub fn error_message(err: &anyhow::Error) -> String {
    match err.downcast_ref::<FetchError>() {
        Some(fetch_err) => format!("bootfetch error: {}: {:#}", fetch_err.kind(), err),
        None => format!("bootfetch error: {:#}", err),
    }
}

#[cfg(test)]
mod tests;
