use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};
use reqwest::Client;

use crate::download;

const HF_BASE: &str = "https://huggingface.co";

/// File whose presence marks a model directory as complete.
const CHECK_FILE: &str = "model.onnx";

/// A downloadable sentence-embedding model: where it lives on the hub and
/// which files make up a usable local copy. The hub repos carry a
/// pre-exported ONNX graph under onnx/, so "conversion" amounts to fetching
/// that export next to the tokenizer and config.
#[derive(Debug, Clone)]
pub struct ModelConfig {
    pub name: &'static str,
    pub display_name: &'static str,
    pub repo: &'static str,
    /// (path within the repo, filename to write locally)
    pub files: &'static [(&'static str, &'static str)],
}

pub const TEXT2VEC_CHINESE: ModelConfig = ModelConfig {
    name: "text2vec-base-chinese",
    display_name: "Chinese (text2vec-base-chinese)",
    repo: "shibing624/text2vec-base-chinese",
    files: &[
        ("onnx/model.onnx", "model.onnx"),
        ("tokenizer.json", "tokenizer.json"),
        ("config.json", "config.json"),
    ],
};

pub const MINILM_ENGLISH: ModelConfig = ModelConfig {
    name: "all-MiniLM-L6-v2",
    display_name: "English (all-MiniLM-L6-v2)",
    repo: "sentence-transformers/all-MiniLM-L6-v2",
    files: &[
        ("onnx/model.onnx", "model.onnx"),
        ("tokenizer.json", "tokenizer.json"),
        ("config.json", "config.json"),
    ],
};

impl ModelConfig {
    pub fn file_url(&self, repo_path: &str) -> String {
        format!("{}/{}/resolve/main/{}", HF_BASE, self.repo, repo_path)
    }

    pub fn output_dir(&self, models_root: &Path) -> PathBuf {
        models_root.join(self.name)
    }
}

/// Download every file of a model into `<models_root>/<name>/`, then verify
/// the ONNX weights actually landed. Returns the weights size in bytes.
pub async fn fetch_model(client: &Client, config: &ModelConfig, models_root: &Path) -> Result<u64> {
    let out_dir = config.output_dir(models_root);
    tokio::fs::create_dir_all(&out_dir).await?;

    println!("\nFetching {} from {}...", config.display_name, config.repo);

    for (repo_path, filename) in config.files {
        let url = config.file_url(repo_path);
        download::fetch_file(client, &url, &out_dir.join(filename)).await?;
    }

    verify_model(&out_dir)
}

/// A model directory counts as complete when the ONNX weights are present.
pub fn verify_model(dir: &Path) -> Result<u64> {
    let weights = dir.join(CHECK_FILE);
    let metadata = std::fs::metadata(&weights)
        .map_err(|_| anyhow!("{} missing after download", weights.display()))?;
    Ok(metadata.len())
}

/// Completed model directories under the models root, sorted by name.
pub fn list_downloaded(models_root: &Path) -> Vec<String> {
    let mut found = Vec::new();

    if let Ok(entries) = std::fs::read_dir(models_root) {
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() && path.join(CHECK_FILE).exists() {
                if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                    found.push(name.to_string());
                }
            }
        }
    }

    found.sort();
    found
}
