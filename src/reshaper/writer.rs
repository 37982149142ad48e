//! Atomic NDJSON writer
//!
//! Records go to a temporary file next to the destination. `finish()` flushes,
//! syncs and renames it into place; dropping the writer before that deletes the
//! temporary file, so a failed run never leaves a partial output behind.

use crate::config::RecordStyle;
use crate::error::ReshapeError;
use serde::ser::{SerializeMap, Serializer as _};
use serde_json::ser::{CompactFormatter, Formatter};
use serde_json::Value;
use std::fs::Permissions;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// JSON formatter emitting `", "` and `": "` separators on a single line
#[derive(Clone, Copy, Debug, Default)]
pub struct SpacedFormatter;

impl Formatter for SpacedFormatter {
    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        writer.write_all(b": ")
    }
}

/// Serialize `{key: value}` without building an intermediate map
fn write_singleton<W, F>(writer: &mut W, formatter: F, key: &str, value: &Value) -> io::Result<()>
where
    W: Write,
    F: Formatter,
{
    let mut ser = serde_json::Serializer::with_formatter(&mut *writer, formatter);
    let mut map = ser.serialize_map(Some(1))?;
    map.serialize_entry(key, value)?;
    map.end()?;
    writer.write_all(b"\n")
}

/// Writes one single-key JSON object per line, committed atomically
pub struct NdjsonWriter {
    writer: BufWriter<NamedTempFile>,
    final_path: PathBuf,
    style: RecordStyle,
    permissions: Option<Permissions>,
    records: usize,
}

impl NdjsonWriter {
    /// Create a writer targeting `final_path`
    ///
    /// The temporary file lives in the same directory so the final rename stays
    /// on one filesystem.
    pub fn create(final_path: &Path, style: RecordStyle) -> Result<Self, ReshapeError> {
        let parent_dir = match final_path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let temp_file = tempfile::Builder::new()
            .prefix(".ndjson-")
            .suffix(".tmp")
            .tempfile_in(parent_dir)
            .map_err(|e| ReshapeError::Io {
                path: final_path.to_path_buf(),
                source: e,
            })?;

        Ok(Self {
            writer: BufWriter::new(temp_file),
            final_path: final_path.to_path_buf(),
            style,
            permissions: None,
            records: 0,
        })
    }

    /// Apply these permissions to the output before it is committed
    pub fn with_permissions(mut self, permissions: Permissions) -> Self {
        self.permissions = Some(permissions);
        self
    }

    /// Append the record `{key: value}` followed by a newline
    pub fn write_record(&mut self, key: &str, value: &Value) -> Result<(), ReshapeError> {
        let result = match self.style {
            RecordStyle::Spaced => write_singleton(&mut self.writer, SpacedFormatter, key, value),
            RecordStyle::Compact => write_singleton(&mut self.writer, CompactFormatter, key, value),
        };
        result.map_err(|e| self.io_error(e))?;
        self.records += 1;
        Ok(())
    }

    /// Number of records written so far
    pub fn records(&self) -> usize {
        self.records
    }

    /// Flush, sync, and atomically move the output into place
    ///
    /// Returns the number of records written.
    pub fn finish(self) -> Result<usize, ReshapeError> {
        let Self {
            writer,
            final_path,
            permissions,
            records,
            ..
        } = self;

        let io_error = |source: io::Error| ReshapeError::Io {
            path: final_path.clone(),
            source,
        };

        let temp_file = writer.into_inner().map_err(|e| io_error(e.into_error()))?;
        temp_file.as_file().sync_all().map_err(io_error)?;

        if let Some(permissions) = permissions {
            temp_file
                .as_file()
                .set_permissions(permissions)
                .map_err(io_error)?;
        }

        temp_file.persist(&final_path).map_err(|e| io_error(e.error))?;

        Ok(records)
    }

    fn io_error(&self, source: io::Error) -> ReshapeError {
        ReshapeError::Io {
            path: self.final_path.clone(),
            source,
        }
    }
}
