//! Configuration types for kaggle-etl

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::{path::PathBuf, time::Duration};

/// Dataset used when no arguments are given
pub const DEFAULT_DATASET: &str = "zynicide/wine-reviews";

/// Output directory used when no arguments are given
pub const DEFAULT_OUTPUT_DIR: &str = "./data";

/// JSON document reshaped after extraction
pub const DEFAULT_JSON_FILENAME: &str = "data.json";

/// Base URL of the Kaggle public API
pub const DEFAULT_API_BASE: &str = "https://www.kaggle.com/api/v1";

/// How each NDJSON record is rendered
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordStyle {
    /// `{"y": [1, 2]}`, with a space after `:` and `,`
    #[default]
    Spaced,
    /// `{"y":[1,2]}`, no insignificant whitespace
    Compact,
}

/// Dataset provider settings
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// API base URL (default: "https://www.kaggle.com/api/v1")
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// Timeout for a whole download request (default: 300 seconds)
    #[serde(default = "default_timeout", with = "duration_serde")]
    pub timeout: Duration,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            timeout: default_timeout(),
        }
    }
}

/// Main configuration for an ETL run
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    /// Dataset reference understood by the provider (default: "zynicide/wine-reviews")
    #[serde(default = "default_dataset")]
    pub dataset: String,

    /// Directory the dataset is extracted into (default: "./data")
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Name of the JSON document to reshape, relative to `output_dir` (default: "data.json")
    #[serde(default = "default_json_filename")]
    pub json_filename: String,

    /// Rendering of NDJSON records
    #[serde(default)]
    pub record_style: RecordStyle,

    /// Provider API settings
    #[serde(default)]
    pub provider: ProviderConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dataset: default_dataset(),
            output_dir: default_output_dir(),
            json_filename: default_json_filename(),
            record_style: RecordStyle::default(),
            provider: ProviderConfig::default(),
        }
    }
}

impl Config {
    /// Path of the JSON document inside the output directory
    pub fn json_path(&self) -> PathBuf {
        self.output_dir.join(&self.json_filename)
    }

    /// Check settings that would otherwise fail late, after the download
    pub fn validate(&self) -> Result<()> {
        if self.dataset.trim().is_empty() {
            return Err(Error::config("dataset", "dataset reference must not be empty"));
        }

        if self.json_filename.is_empty() {
            return Err(Error::config("json_filename", "file name must not be empty"));
        }
        if self.json_filename.contains(['/', '\\']) || self.json_filename == ".." {
            return Err(Error::config(
                "json_filename",
                format!(
                    "'{}' must be a plain file name inside the output directory",
                    self.json_filename
                ),
            ));
        }

        let url = url::Url::parse(&self.provider.api_base).map_err(|e| {
            Error::config(
                "provider.api_base",
                format!("invalid URL '{}': {}", self.provider.api_base, e),
            )
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::config(
                "provider.api_base",
                format!("unsupported URL scheme '{}'", url.scheme()),
            ));
        }

        Ok(())
    }
}

fn default_dataset() -> String {
    DEFAULT_DATASET.to_string()
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT_DIR)
}

fn default_json_filename() -> String {
    DEFAULT_JSON_FILENAME.to_string()
}

fn default_api_base() -> String {
    DEFAULT_API_BASE.to_string()
}

fn default_timeout() -> Duration {
    Duration::from_secs(300)
}

// Duration serialization helper (whole seconds)
mod duration_serde {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(duration.as_secs())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}
