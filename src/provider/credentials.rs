//! Kaggle API credentials
//!
//! Lookup order follows the official Kaggle tooling:
//! 1. `KAGGLE_USERNAME` + `KAGGLE_KEY` environment variables
//! 2. `kaggle.json` in `KAGGLE_CONFIG_DIR`, or `~/.kaggle/` when that is unset

use crate::error::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

/// File holding the API token, as issued by the Kaggle account page
pub const CREDENTIALS_FILE: &str = "kaggle.json";

const ENV_USERNAME: &str = "KAGGLE_USERNAME";
const ENV_KEY: &str = "KAGGLE_KEY";
const ENV_CONFIG_DIR: &str = "KAGGLE_CONFIG_DIR";

/// Username and API key for HTTP basic auth
#[derive(Clone, Deserialize)]
pub struct KaggleCredentials {
    /// Kaggle username
    pub username: String,
    /// API key
    pub key: String,
}

// Keep the key out of logs
impl std::fmt::Debug for KaggleCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KaggleCredentials")
            .field("username", &self.username)
            .field("key", &"<redacted>")
            .finish()
    }
}

impl KaggleCredentials {
    /// Resolve credentials from the environment, then from `kaggle.json`
    pub fn load() -> Result<Self> {
        if let Some(credentials) = Self::from_env() {
            debug!(username = %credentials.username, "using Kaggle credentials from environment");
            return Ok(credentials);
        }

        let config_dir = Self::config_dir().ok_or_else(|| {
            Error::Authentication(format!(
                "{} and {} are not set and no home directory was found for {}",
                ENV_USERNAME, ENV_KEY, CREDENTIALS_FILE
            ))
        })?;

        Self::from_file(&config_dir.join(CREDENTIALS_FILE))
    }

    /// Read `KAGGLE_USERNAME` and `KAGGLE_KEY`; both must be non-empty
    pub fn from_env() -> Option<Self> {
        let username = std::env::var(ENV_USERNAME).ok().filter(|v| !v.is_empty())?;
        let key = std::env::var(ENV_KEY).ok().filter(|v| !v.is_empty())?;
        Some(Self { username, key })
    }

    /// Read a `kaggle.json` file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::Authentication(format!(
                    "could not find {}. Set {} and {}, or place your API token at {}",
                    CREDENTIALS_FILE,
                    ENV_USERNAME,
                    ENV_KEY,
                    path.display()
                ))
            } else {
                Error::Authentication(format!("failed to read {}: {}", path.display(), e))
            }
        })?;

        let credentials: KaggleCredentials = serde_json::from_str(&content).map_err(|e| {
            Error::Authentication(format!("invalid credentials file {}: {}", path.display(), e))
        })?;

        if credentials.username.is_empty() || credentials.key.is_empty() {
            return Err(Error::Authentication(format!(
                "credentials file {} has an empty username or key",
                path.display()
            )));
        }

        debug!(?path, username = %credentials.username, "using Kaggle credentials from file");
        Ok(credentials)
    }

    /// Directory searched for `kaggle.json`
    fn config_dir() -> Option<PathBuf> {
        if let Some(dir) = std::env::var_os(ENV_CONFIG_DIR).filter(|v| !v.is_empty()) {
            return Some(PathBuf::from(dir));
        }
        directories::BaseDirs::new().map(|dirs| dirs.home_dir().join(".kaggle"))
    }
}
