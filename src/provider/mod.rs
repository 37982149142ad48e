//! Dataset provider clients
//!
//! The fetch stage talks to the hosted-dataset service only through the
//! [`DatasetClient`] trait. The client is constructed and authenticated by the
//! caller and handed to the [`Fetcher`](crate::Fetcher), so tests can swap in
//! a substitute without credentials or network access.
//!
//! ## Usage
//!
//! ```no_run
//! use kaggle_etl::config::Config;
//! use kaggle_etl::provider::{DatasetClient, KaggleClient};
//! use kaggle_etl::DatasetRef;
//! use std::path::Path;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = KaggleClient::authenticate(&Config::default().provider)?;
//!     let files = client
//!         .download(&DatasetRef::new("zynicide/wine-reviews"), Path::new("./data"))
//!         .await?;
//!     println!("downloaded {} file(s)", files.len());
//!     Ok(())
//! }
//! ```

mod credentials;
mod kaggle;


pub use credentials::{CREDENTIALS_FILE, KaggleCredentials};
pub use kaggle::KaggleClient;

use crate::types::DatasetRef;
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// Capability to materialize a dataset in a local directory
///
/// Implementations own their authentication state; by the time a client
/// exists it is expected to be able to issue requests.
#[async_trait]
pub trait DatasetClient: Send + Sync {
    /// Download `dataset` and leave its extracted files in `dest`
    ///
    /// `dest` already exists when this is called. Returns the files written.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The provider rejects the credentials (`Error::Authentication`)
    /// - The request fails in transit (`Error::Network`)
    /// - The provider answers with a failure status (`Error::Provider`)
    /// - The archive cannot be saved or extracted (`Error::Io`, `Error::Extraction`)
    async fn download(&self, dataset: &DatasetRef, dest: &Path) -> crate::Result<Vec<PathBuf>>;

    /// Human-readable name for logging
    fn name(&self) -> &'static str;
}

#[async_trait]
impl<'a, C> DatasetClient for &'a C
where
    C: DatasetClient + ?Sized,
{
    async fn download(&self, dataset: &DatasetRef, dest: &Path) -> crate::Result<Vec<PathBuf>> {
        (**self).download(dataset, dest).await
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}
