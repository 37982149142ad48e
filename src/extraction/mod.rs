//! Archive extraction
//!
//! Datasets arrive as ZIP archives. Extraction is synchronous file I/O, so the
//! async entry point moves it onto a blocking worker.

mod zip;

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests;

pub use zip::ZipExtractor;

use crate::error::{Error, Result};
use std::path::{Path, PathBuf};
use tokio::task::spawn_blocking;
use tracing::info;

/// Extract a downloaded ZIP archive into `dest_path` and delete the archive
///
/// The archive is removed only after every entry was written. On failure it
/// is left in place for inspection.
pub async fn extract_and_remove(archive_path: &Path, dest_path: &Path) -> Result<Vec<PathBuf>> {
    let archive_owned = archive_path.to_path_buf();
    let dest_owned = dest_path.to_path_buf();

    let files = spawn_blocking(move || ZipExtractor::extract(&archive_owned, &dest_owned))
        .await
        .map_err(|e| Error::Extraction {
            archive: archive_path.to_path_buf(),
            reason: format!("extraction task panicked: {}", e),
        })??;

    tokio::fs::remove_file(archive_path).await?;

    info!(
        ?archive_path,
        ?dest_path,
        extracted_count = files.len(),
        "archive extracted and removed"
    );

    Ok(files)
}
