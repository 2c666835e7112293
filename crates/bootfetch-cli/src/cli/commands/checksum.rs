//! `bootfetch checksum <path>` – SHA-256 of a saved file.

use anyhow::{Context, Result};
use bootfetch_core::checksum;
use std::path::Path;

/// Hash `path` on the blocking pool, print `<digest>  <path>` and return the digest.
pub async fn run_checksum(path: &Path) -> Result<String> {
    let owned = path.to_path_buf();
    let digest = tokio::task::spawn_blocking(move || checksum::sha256_path(&owned))
        .await
        .context("checksum task join")??;
    println!("{}  {}", digest, path.display());
    Ok(digest)
}
