//! Dataset fixtures and a scripted dataset client

use async_trait::async_trait;
use kaggle_etl::{DatasetClient, DatasetRef, Error, Result};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// The document from the wine-reviews style dataset, in its original shape
pub const SAMPLE_DOCUMENT: &str = r#"{
  "x": 1,
  "y": [1,2]
}"#;

/// Truncated JSON that fails to parse
pub const TRUNCATED_DOCUMENT: &str = r#"{"a": 1,"#;

/// Build an in-memory ZIP archive
pub fn zip_bytes(files: &[(&str, &[u8])]) -> Vec<u8> {
    let mut writer = zip::ZipWriter::new(std::io::Cursor::new(Vec::new()));
    let options =
        zip::write::FileOptions::default().compression_method(zip::CompressionMethod::Deflated);
    for (name, content) in files {
        writer.start_file(*name, options).unwrap();
        writer.write_all(content).unwrap();
    }
    writer.finish().unwrap().into_inner()
}

/// What the scripted client does when asked to download
pub enum Script {
    /// Write these files into the destination
    Files(Vec<(String, String)>),
    /// Fail as if the credentials were rejected
    RejectCredentials,
}

/// A dataset client that writes canned files instead of calling a provider
pub struct ScriptedClient {
    script: Script,
    /// Datasets requested, in order
    pub requests: Mutex<Vec<String>>,
}

impl ScriptedClient {
    /// Client that writes the given `(name, content)` pairs
    pub fn with_files(files: &[(&str, &str)]) -> Self {
        Self {
            script: Script::Files(
                files
                    .iter()
                    .map(|(name, content)| (name.to_string(), content.to_string()))
                    .collect(),
            ),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Client that fails with an authentication error
    pub fn rejecting() -> Self {
        Self {
            script: Script::RejectCredentials,
            requests: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl DatasetClient for ScriptedClient {
    async fn download(&self, dataset: &DatasetRef, dest: &Path) -> Result<Vec<PathBuf>> {
        self.requests.lock().unwrap().push(dataset.to_string());

        match &self.script {
            Script::RejectCredentials => Err(Error::Authentication(
                "401 Unauthorized: invalid API token".to_string(),
            )),
            Script::Files(files) => {
                let mut written = Vec::new();
                for (name, content) in files {
                    let path = dest.join(name);
                    std::fs::write(&path, content)?;
                    written.push(path);
                }
                Ok(written)
            }
        }
    }

    fn name(&self) -> &'static str {
        "scripted"
    }
}
