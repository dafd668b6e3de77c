//! Terminal Presenter
//!
//! Renders generation results in the terminal and fetches the generated
//! artifact to disk when asked. Artifact URLs from the service may be
//! relative; they are resolved against the service base URL.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use colored::Colorize;
use reqwest::Client;
use tracing::info;

use crate::types::{GenerationOutcome, GenerationResult, ResultPresenter};

pub struct TerminalPresenter {
    base_url: String,
    output_dir: PathBuf,
    http: Client,
}

impl TerminalPresenter {
    pub fn new(base_url: impl Into<String>, output_dir: impl Into<PathBuf>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            output_dir: output_dir.into(),
            http: Client::new(),
        }
    }
}

#[async_trait]
impl ResultPresenter for TerminalPresenter {
    fn present(&self, result: &GenerationResult) {
        println!();
        match result.outcome() {
            GenerationOutcome::Failed(message) => {
                println!("{}", format!("  Generation failed: {}", message).red());
                println!(
                    "{}",
                    "  Run the wizard again to retry with a new design.".dimmed()
                );
            }
            GenerationOutcome::Preview(url) => {
                println!("{}", "  Your website design is ready.".green());
                println!("  Preview:  {}", resolve_url(&self.base_url, url).cyan());
                if let Some(download) = &result.download_url {
                    println!(
                        "  Download: {}",
                        resolve_url(&self.base_url, download).cyan()
                    );
                }
            }
            GenerationOutcome::ReadyForDownload => {
                println!(
                    "{}",
                    "  Your website design is ready for download.".green()
                );
                if result.download_url.is_none() {
                    println!(
                        "{}",
                        "  The service did not provide a download link.".yellow()
                    );
                }
            }
        }
    }

    /// Fetch the generated site archive into the output directory.
    ///
    /// A result without a download URL is an error condition, not a
    /// silent no-op.
    async fn download(&self, result: &GenerationResult) -> Result<PathBuf> {
        let url = match &result.download_url {
            Some(u) => resolve_url(&self.base_url, u),
            None => bail!("the generation result carries no download URL"),
        };

        info!("Downloading generated site from {}", url);

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .with_context(|| format!("failed to fetch {}", url))?;

        let status = response.status();
        if !status.is_success() {
            bail!("download failed: {} returned {}", url, status.as_u16());
        }

        let bytes = response
            .bytes()
            .await
            .context("failed to read the download body")?;

        if !self.output_dir.exists() {
            tokio::fs::create_dir_all(&self.output_dir)
                .await
                .with_context(|| {
                    format!("failed to create output directory {}", self.output_dir.display())
                })?;
        }

        let filename = format!(
            "website-{}.zip",
            chrono::Local::now().format("%Y%m%d-%H%M%S")
        );
        let dest = self.output_dir.join(filename);

        tokio::fs::write(&dest, &bytes)
            .await
            .with_context(|| format!("failed to write {}", dest.display()))?;

        println!("{}", format!("  Saved {}", dest.display()).green());
        print_usage_instructions();

        Ok(dest)
    }
}

/// Resolve a possibly service-relative URL against the service base.
fn resolve_url(base_url: &str, url: &str) -> String {
    if url.starts_with("http://") || url.starts_with("https://") {
        url.to_string()
    } else if url.starts_with('/') {
        format!("{}{}", base_url, url)
    } else {
        format!("{}/{}", base_url, url)
    }
}

fn print_usage_instructions() {
    println!();
    println!("{}", "  To use your website files:".white());
    println!("    1. Extract the ZIP archive to a folder");
    println!("    2. Open index.html in any web browser");
    println!("    3. Copy the folder to a USB drive or upload it to a web host to share");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_url_keeps_absolute_urls() {
        assert_eq!(
            resolve_url("http://localhost:5000", "https://cdn.example.com/site.zip"),
            "https://cdn.example.com/site.zip"
        );
    }

    #[test]
    fn test_resolve_url_joins_service_relative_paths() {
        assert_eq!(
            resolve_url("http://localhost:5000", "/api/download/abc"),
            "http://localhost:5000/api/download/abc"
        );
        assert_eq!(
            resolve_url("http://localhost:5000", "api/download/abc"),
            "http://localhost:5000/api/download/abc"
        );
    }

    #[tokio::test]
    async fn test_download_without_url_is_an_error_and_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let presenter = TerminalPresenter::new("http://localhost:5000", dir.path());

        let result = GenerationResult::default();
        let err = presenter.download(&result).await.unwrap_err();
        assert!(err.to_string().contains("no download URL"));

        let entries: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert!(entries.is_empty());
    }
}
