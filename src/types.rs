//! Core types for kaggle-etl

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Provider-specific dataset identifier (Kaggle uses `owner/slug`)
///
/// The string is passed verbatim to the dataset client; no structure is imposed.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DatasetRef(String);

impl DatasetRef {
    /// Create a new DatasetRef
    pub fn new(reference: impl Into<String>) -> Self {
        Self(reference.into())
    }

    /// Get the reference as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Last `/`-separated segment, used to name downloaded archives
    ///
    /// ```
    /// use kaggle_etl::DatasetRef;
    ///
    /// assert_eq!(DatasetRef::new("zynicide/wine-reviews").slug(), "wine-reviews");
    /// assert_eq!(DatasetRef::new("standalone").slug(), "standalone");
    /// ```
    pub fn slug(&self) -> &str {
        self.0
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .unwrap_or(&self.0)
    }
}

impl From<&str> for DatasetRef {
    fn from(reference: &str) -> Self {
        Self::new(reference)
    }
}

impl From<String> for DatasetRef {
    fn from(reference: String) -> Self {
        Self(reference)
    }
}

impl std::fmt::Display for DatasetRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Kind of a directory entry
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    /// Regular file
    File,
    /// Directory
    Dir,
    /// Symlink, socket, or anything else
    Other,
}

/// One immediate child of the target directory
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirEntry {
    /// File name, lossily converted to UTF-8
    pub name: String,
    /// Entry kind
    pub kind: EntryKind,
    /// Size in bytes (0 for directories)
    pub size_bytes: u64,
}

impl std::fmt::Display for DirEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            EntryKind::Dir => write!(f, "{}/", self.name),
            _ => f.write_str(&self.name),
        }
    }
}

/// Result of a successful reshape
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReshapeSummary {
    /// The document that was reshaped (deleted afterwards)
    pub input: PathBuf,
    /// The NDJSON file written
    pub output: PathBuf,
    /// Number of records (lines) written
    pub records: usize,
}

/// What happened to the JSON document during a pipeline run
///
/// Serialize-only: internally tagged enums cannot be read back while numbers
/// are kept as raw tokens.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ReshapeOutcome {
    /// The document was converted and removed
    Reshaped {
        /// The NDJSON file written
        output: PathBuf,
        /// Number of records written
        records: usize,
    },
    /// The document was not present after extraction
    Skipped,
    /// The document was present but could not be converted; it was left untouched
    Failed {
        /// Error message
        reason: String,
    },
}

/// Summary of one ETL run
#[derive(Clone, Debug, Serialize)]
pub struct EtlReport {
    /// Dataset that was fetched
    pub dataset: DatasetRef,
    /// Directory it was extracted into
    pub output_dir: PathBuf,
    /// Files the dataset client reported writing
    pub downloaded: Vec<PathBuf>,
    /// Top-level listing of `output_dir` after the download
    pub listing: Vec<DirEntry>,
    /// Reshape step result
    pub reshape: ReshapeOutcome,
}
