//! `bootfetch fetch [url]` – download one file.

use anyhow::{Context, Result};
use bootfetch_core::checksum;
use bootfetch_core::config::FetchConfig;
use bootfetch_core::{Downloader, TransferOptions};

use crate::cli::FetchArgs;

pub async fn run_fetch(cfg: &FetchConfig, args: FetchArgs) -> Result<()> {
    let url = args.url.unwrap_or_else(|| cfg.source_url.clone());
    let output = args.output.unwrap_or_else(|| cfg.destination.clone());
    let mut options = TransferOptions::from(cfg);
    options.allow_http |= args.allow_http;

    let mut downloader = Downloader::new(&url, output, options)?;
    tracing::info!(
        url = %downloader.source(),
        path = %downloader.destination().display(),
        "fetch"
    );
    let (report, downloader) = tokio::task::spawn_blocking(move || {
        let report = downloader.run();
        (report, downloader)
    })
    .await
    .context("fetch task join")?;
    let report = report?;
    tracing::debug!(state = ?downloader.state(), "fetch finished");

    println!(
        "Saved {} bytes from {} to {}",
        report.bytes_written,
        report.effective_url,
        report.destination.display()
    );
    if args.sha256 {
        let path = report.destination.clone();
        let digest = tokio::task::spawn_blocking(move || checksum::sha256_path(&path))
            .await
            .context("checksum task join")??;
        println!("{}  {}", digest, report.destination.display());
    }
    Ok(())
}
