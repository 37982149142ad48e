//! Kaggle dataset client

use super::DatasetClient;
use super::credentials::KaggleCredentials;
use crate::config::ProviderConfig;
use crate::error::{Error, Result};
use crate::extraction::{ZipExtractor, extract_and_remove};
use crate::types::DatasetRef;
use crate::utils::filename_from_response;
use async_trait::async_trait;
use reqwest::StatusCode;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

/// Suffix of a download still in progress
const PARTIAL_SUFFIX: &str = ".part";

/// Client for the Kaggle public API, authenticated with an API token
pub struct KaggleClient {
    http: reqwest::Client,
    api_base: String,
    credentials: KaggleCredentials,
}

impl KaggleClient {
    /// Resolve credentials from the environment or `kaggle.json` and build a client
    ///
    /// # Errors
    ///
    /// Returns `Error::Authentication` if no usable credentials are found.
    pub fn authenticate(config: &ProviderConfig) -> Result<Self> {
        let credentials = KaggleCredentials::load()?;
        Self::with_credentials(config, credentials)
    }

    /// Build a client from explicit credentials
    pub fn with_credentials(config: &ProviderConfig, credentials: KaggleCredentials) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("kaggle-etl/", env!("CARGO_PKG_VERSION")))
            .build()?;

        info!(username = %credentials.username, "authenticated Kaggle client");

        Ok(Self {
            http,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            credentials,
        })
    }

    /// URL of the dataset archive
    pub fn download_url(&self, dataset: &DatasetRef) -> String {
        format!("{}/datasets/download/{}", self.api_base, dataset)
    }

    /// Map a failure status to an error, consuming the response body as the message
    async fn status_error(response: reqwest::Response, dataset: &DatasetRef) -> Error {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Error::Authentication(format!(
                "Kaggle rejected the credentials for dataset '{}' (HTTP {})",
                dataset,
                status.as_u16()
            )),
            StatusCode::NOT_FOUND => Error::Provider {
                status: status.as_u16(),
                message: format!("dataset '{}' not found", dataset),
            },
            _ => Error::Provider {
                status: status.as_u16(),
                message: if body.trim().is_empty() {
                    status.canonical_reason().unwrap_or("unknown error").to_string()
                } else {
                    body.trim().to_string()
                },
            },
        }
    }

    /// Stream the response body to `dest_file`, via a `.part` file renamed on completion
    async fn save_body(mut response: reqwest::Response, dest_file: &Path) -> Result<u64> {
        let mut partial_name = dest_file.as_os_str().to_owned();
        partial_name.push(PARTIAL_SUFFIX);
        let partial_path = PathBuf::from(partial_name);

        let mut file = tokio::fs::File::create(&partial_path).await.map_err(|e| {
            Error::Io(std::io::Error::new(
                e.kind(),
                format!("failed to create {}: {}", partial_path.display(), e),
            ))
        })?;

        let mut written = 0u64;
        let copy_result = async {
            while let Some(chunk) = response.chunk().await? {
                file.write_all(&chunk).await?;
                written += chunk.len() as u64;
            }
            file.flush().await?;
            Ok::<(), Error>(())
        }
        .await;

        drop(file);
        if let Err(e) = copy_result {
            let _ = tokio::fs::remove_file(&partial_path).await;
            return Err(e);
        }

        tokio::fs::rename(&partial_path, dest_file).await?;
        Ok(written)
    }
}

#[async_trait]
impl DatasetClient for KaggleClient {
    async fn download(&self, dataset: &DatasetRef, dest: &Path) -> Result<Vec<PathBuf>> {
        let url = self.download_url(dataset);
        debug!(%url, "requesting dataset archive");

        let response = self
            .http
            .get(&url)
            .basic_auth(&self.credentials.username, Some(&self.credentials.key))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::status_error(response, dataset).await);
        }

        // Kaggle redirects to signed storage URLs; name the file after the final URL
        let final_url = response.url().to_string();
        let filename = filename_from_response(&response, &final_url)
            .unwrap_or_else(|| format!("{}.zip", dataset.slug()));
        let archive_path = dest.join(&filename);

        let bytes = Self::save_body(response, &archive_path).await?;
        info!(?archive_path, bytes, "dataset archive downloaded");

        if ZipExtractor::is_zip(&archive_path) {
            extract_and_remove(&archive_path, dest).await
        } else {
            debug!(?archive_path, "download is not a ZIP archive, keeping as-is");
            Ok(vec![archive_path])
        }
    }

    fn name(&self) -> &'static str {
        "kaggle"
    }
}
