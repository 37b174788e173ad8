use std::path::Path;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use futures_util::StreamExt;
use reqwest::Client;
use tokio::io::AsyncWriteExt;

/// Timeout for a single file transfer. Model weights run to hundreds of MB,
/// so this is deliberately generous.
const TRANSFER_TIMEOUT_SECS: u64 = 1800;

pub fn client() -> Result<Client> {
    Client::builder()
        .timeout(Duration::from_secs(TRANSFER_TIMEOUT_SECS))
        .build()
        .context("failed to build HTTP client")
}

/// Stream a single file to disk. A file that already exists is treated as
/// downloaded and left alone.
pub async fn fetch_file(client: &Client, url: &str, dest: &Path) -> Result<()> {
    if dest.exists() {
        let metadata = tokio::fs::metadata(dest).await?;
        println!(
            "[download] {} already present ({} bytes), skipping",
            dest.display(),
            metadata.len()
        );
        return Ok(());
    }

    if let Some(parent) = dest.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }

    println!("[download] {} -> {}", url, dest.display());

    let response = client
        .get(url)
        .send()
        .await
        .context("download request failed")?;

    if !response.status().is_success() {
        return Err(anyhow!("download failed: HTTP {}", response.status()));
    }

    let total = response.content_length().unwrap_or(0);
    if total > 0 {
        println!("[download] total size: {:.1} MB", total as f64 / 1_000_000.0);
    }

    let mut file = tokio::fs::File::create(dest).await?;
    let mut downloaded: u64 = 0;
    let mut stream = response.bytes_stream();

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.context("error while reading download stream")?;
        file.write_all(&chunk).await?;
        downloaded += chunk.len() as u64;
    }

    file.flush().await?;
    println!("[download] done: {} ({} bytes)", dest.display(), downloaded);

    Ok(())
}
