//! Fetch stage: materialize a dataset in a local directory

use crate::error::{Error, Result};
use crate::provider::DatasetClient;
use crate::types::{DatasetRef, DirEntry};
use crate::utils::list_dir;
use std::path::{Path, PathBuf};
use tracing::info;

/// Files produced by a fetch and the resulting directory listing
#[derive(Clone, Debug)]
pub struct FetchResult {
    /// Files the client reported writing
    pub downloaded: Vec<PathBuf>,
    /// Immediate entries of the target directory after the download, sorted by name
    pub listing: Vec<DirEntry>,
}

/// Runs a [`DatasetClient`] against a target directory
///
/// The client is injected already authenticated; the fetcher never touches
/// credentials itself.
pub struct Fetcher<C> {
    client: C,
}

impl<C: DatasetClient> Fetcher<C> {
    /// Create a fetcher around an authenticated client
    pub fn new(client: C) -> Self {
        Self { client }
    }

    /// The wrapped client
    pub fn client(&self) -> &C {
        &self.client
    }

    /// Download `dataset` into `target_dir` and list the result
    ///
    /// `target_dir` and any missing parents are created before the client is
    /// called. Client errors propagate unchanged; nothing is retried.
    pub async fn fetch(&self, dataset: &DatasetRef, target_dir: &Path) -> Result<FetchResult> {
        tokio::fs::create_dir_all(target_dir).await.map_err(|e| {
            Error::Io(std::io::Error::new(
                e.kind(),
                format!(
                    "failed to create output directory {}: {}",
                    target_dir.display(),
                    e
                ),
            ))
        })?;

        info!(%dataset, provider = self.client.name(), "downloading dataset");
        let downloaded = self.client.download(dataset, target_dir).await?;
        info!(
            %dataset,
            dest = ?target_dir,
            files = downloaded.len(),
            "dataset downloaded and extracted"
        );

        let target_owned = target_dir.to_path_buf();
        let listing = tokio::task::spawn_blocking(move || list_dir(&target_owned))
            .await
            .map_err(|e| Error::Io(std::io::Error::other(format!("listing task failed: {}", e))))??;

        info!(dest = ?target_dir, entries = listing.len(), "files in dataset:");
        for entry in &listing {
            info!(" - {}", entry);
        }

        Ok(FetchResult {
            downloaded,
            listing,
        })
    }
}
