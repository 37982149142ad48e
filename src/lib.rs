//! # kaggle-etl
//!
//! Download a Kaggle dataset, extract it into a local directory, and rewrite its
//! single-object JSON document into newline-delimited JSON.
//!
//! The run has two stages sharing nothing but a directory:
//! - **fetch**: an authenticated [`DatasetClient`](provider::DatasetClient)
//!   materializes the dataset, then the directory's top-level entries are listed
//! - **reshape**: if `data.json` (configurable) is present, each top-level key
//!   becomes one line of `data_fixed.json` and the original is removed
//!
//! ## Quick Start
//!
//! ```no_run
//! use kaggle_etl::{Config, KaggleClient, run_etl};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config {
//!         dataset: "zynicide/wine-reviews".to_string(),
//!         output_dir: "./data".into(),
//!         ..Default::default()
//!     };
//!
//!     let client = KaggleClient::authenticate(&config.provider)?;
//!     let report = run_etl(&config, client).await?;
//!     println!("{:?}", report.reshape);
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// Configuration types
pub mod config;
/// Error types
pub mod error;
/// Archive extraction
pub mod extraction;
/// Fetch stage
pub mod fetcher;
/// ETL orchestration
pub mod pipeline;
/// Dataset provider clients
pub mod provider;
/// JSON to NDJSON reshaping
pub mod reshaper;
/// Core types
pub mod types;
/// Utility functions
pub mod utils;

// Re-export commonly used types
pub use config::{Config, ProviderConfig, RecordStyle};
pub use error::{Error, ReshapeError, Result};
pub use fetcher::{FetchResult, Fetcher};
pub use pipeline::run_etl;
pub use provider::{DatasetClient, KaggleClient, KaggleCredentials};
pub use reshaper::{load_document, reshape, reshape_if_present};
pub use types::{DatasetRef, DirEntry, EntryKind, EtlReport, ReshapeOutcome, ReshapeSummary};
