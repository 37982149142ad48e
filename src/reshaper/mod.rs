//! Reshape a single-object JSON document into NDJSON
//!
//! A document such as `{"x": 1, "y": [1, 2]}` becomes one line per top-level
//! key:
//!
//! ```text
//! {"x": 1}
//! {"y": [1, 2]}
//! ```
//!
//! The output is written next to the input with a `_fixed` suffix. The input is
//! deleted only after the output has been committed. Every failure is reported
//! as a [`ReshapeError`] and leaves the filesystem as it was.

mod writer;


pub use writer::{NdjsonWriter, SpacedFormatter};

use crate::config::RecordStyle;
use crate::error::ReshapeError;
use crate::types::ReshapeSummary;
use crate::utils::fixed_path;
use serde_json::{Map, Value};
use std::path::Path;
use tracing::{debug, info};

/// JSON kind name used in schema errors
fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Read and parse `path`, requiring a JSON object at the top level
///
/// Keys keep their document order.
pub fn load_document(path: &Path) -> Result<Map<String, Value>, ReshapeError> {
    let bytes = std::fs::read(path).map_err(|e| ReshapeError::from_io(path, e))?;

    let value: Value = serde_json::from_slice(&bytes).map_err(|e| ReshapeError::Malformed {
        path: path.to_path_buf(),
        source: e,
    })?;

    match value {
        Value::Object(map) => Ok(map),
        other => Err(ReshapeError::Schema {
            path: path.to_path_buf(),
            found: kind_of(&other),
        }),
    }
}

/// Convert `path` to NDJSON and delete it
///
/// The caller is expected to have checked that `path` exists; if it vanished
/// in between, [`ReshapeError::NotFound`] is returned.
pub fn reshape(path: &Path, style: RecordStyle) -> Result<ReshapeSummary, ReshapeError> {
    let document = load_document(path)?;
    let output = fixed_path(path);

    debug!(
        input = ?path,
        ?output,
        keys = document.len(),
        "writing NDJSON records"
    );

    let mut writer = NdjsonWriter::create(&output, style)?;
    if let Ok(metadata) = std::fs::metadata(path) {
        writer = writer.with_permissions(metadata.permissions());
    }

    for (key, value) in &document {
        writer.write_record(key, value)?;
    }
    let records = writer.finish()?;

    // Only reached once the output is committed
    std::fs::remove_file(path).map_err(|e| ReshapeError::from_io(path, e))?;

    info!(input = ?path, ?output, records, "fixed JSON file written");

    Ok(ReshapeSummary {
        input: path.to_path_buf(),
        output,
        records,
    })
}

/// Reshape `path` if it exists
///
/// Returns `None` when there is nothing to do.
pub fn reshape_if_present(
    path: &Path,
    style: RecordStyle,
) -> Option<Result<ReshapeSummary, ReshapeError>> {
    if !path.exists() {
        debug!(?path, "no JSON file to reshape");
        return None;
    }
    Some(reshape(path, style))
}
