//! One-shot fetcher for the pretrained sentence-embedding models.
//!
//! Prompts for a model choice, downloads the ONNX export plus tokenizer and
//! config from the Hugging Face hub into ./models/, and reports the result
//! per model. Exits 0 if at least one selected model downloaded, 1 on an
//! invalid selection or when every download failed.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use reqwest::Client;

use task_api::download;
use task_api::models::{self, ModelConfig, MINILM_ENGLISH, TEXT2VEC_CHINESE};

/// Menu selection parsed from stdin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Selection {
    Chinese,
    English,
    Both,
}

impl Selection {
    fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(Self::Chinese),
            "2" => Some(Self::English),
            "3" => Some(Self::Both),
            _ => None,
        }
    }

    fn configs(self) -> Vec<ModelConfig> {
        match self {
            Self::Chinese => vec![TEXT2VEC_CHINESE],
            Self::English => vec![MINILM_ENGLISH],
            Self::Both => vec![TEXT2VEC_CHINESE, MINILM_ENGLISH],
        }
    }
}

fn models_root() -> PathBuf {
    std::env::var("MODELS_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("./models"))
}

/// Preflight: the models directory must be writable and the hub reachable.
/// Each failure aborts the run with enough guidance to fix the environment.
async fn check_requirements(client: &Client, root: &Path) -> Result<()> {
    std::fs::create_dir_all(root).with_context(|| {
        format!(
            "cannot create models directory {} - check permissions or set MODELS_DIR",
            root.display()
        )
    })?;

    let probe = root.join(".write-probe");
    std::fs::write(&probe, b"ok")
        .with_context(|| format!("models directory {} is not writable", root.display()))?;
    let _ = std::fs::remove_file(&probe);

    let response = client
        .get("https://huggingface.co")
        .timeout(Duration::from_secs(10))
        .send()
        .await
        .context("cannot reach huggingface.co - check your network connection or proxy settings")?;

    if response.status().is_server_error() {
        return Err(anyhow!(
            "huggingface.co responded with HTTP {}",
            response.status()
        ));
    }

    println!("Requirement checks passed");
    Ok(())
}

#[tokio::main]
async fn main() {
    println!("==============================================");
    println!(" Embedding model downloader");
    println!("==============================================");

    let root = models_root();

    let client = match download::client() {
        Ok(client) => client,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = check_requirements(&client, &root).await {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }

    println!("\nSelect the model(s) to download:");
    println!("  1. {}", TEXT2VEC_CHINESE.display_name);
    println!("  2. {}", MINILM_ENGLISH.display_name);
    println!("  3. Both");
    print!("\nEnter choice (1/2/3): ");
    let _ = std::io::stdout().flush();

    let mut input = String::new();
    if std::io::stdin().read_line(&mut input).is_err() {
        eprintln!("Error: failed to read input");
        std::process::exit(1);
    }

    let selection = match Selection::parse(&input) {
        Some(selection) => selection,
        None => {
            eprintln!("Invalid choice: {}", input.trim());
            std::process::exit(1);
        }
    };

    let mut succeeded = 0usize;
    let mut failed = 0usize;

    for config in selection.configs() {
        // A failed model must not abort the other selection.
        match models::fetch_model(&client, &config, &root).await {
            Ok(size) => {
                println!(
                    "{} downloaded ({:.1} MB) -> {}",
                    config.display_name,
                    size as f64 / 1_000_000.0,
                    config.output_dir(&root).display()
                );
                succeeded += 1;
            }
            Err(e) => {
                eprintln!("{} failed: {:#}", config.display_name, e);
                failed += 1;
            }
        }
    }

    if succeeded == 0 {
        eprintln!("\nAll downloads failed, nothing was installed");
        std::process::exit(1);
    }

    println!("\nDone: {} of {} models downloaded", succeeded, succeeded + failed);
    println!(
        "Available models in {}: {}",
        root.display(),
        models::list_downloaded(&root).join(", ")
    );
}
