//! Utility functions for file operations and path manipulation

use crate::types::{DirEntry, EntryKind};
use std::path::{Path, PathBuf};

/// Suffix inserted before the extension of a reshaped document
pub const FIXED_SUFFIX: &str = "_fixed";

/// Derive the NDJSON output path for a reshaped document
///
/// Inserts [`FIXED_SUFFIX`] before the extension, or appends it when the
/// file has no extension.
///
/// # Examples
///
/// ```
/// use kaggle_etl::utils::fixed_path;
/// use std::path::{Path, PathBuf};
///
/// assert_eq!(fixed_path(Path::new("data/data.json")), PathBuf::from("data/data_fixed.json"));
/// assert_eq!(fixed_path(Path::new("data/records")), PathBuf::from("data/records_fixed"));
/// ```
#[must_use]
pub fn fixed_path(path: &Path) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    let name = match path.extension() {
        Some(ext) => format!("{}{}.{}", stem, FIXED_SUFFIX, ext.to_string_lossy()),
        None => format!("{}{}", stem, FIXED_SUFFIX),
    };

    path.with_file_name(name)
}

/// List the immediate entries of a directory, sorted by name
///
/// Symlinks are reported as [`EntryKind::Other`] and not followed.
pub fn list_dir(dir: &Path) -> std::io::Result<Vec<DirEntry>> {
    let mut entries = Vec::new();

    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let file_type = entry.file_type()?;

        let (kind, size_bytes) = if file_type.is_dir() {
            (EntryKind::Dir, 0)
        } else if file_type.is_file() {
            (EntryKind::File, entry.metadata()?.len())
        } else {
            (EntryKind::Other, 0)
        };

        entries.push(DirEntry {
            name: entry.file_name().to_string_lossy().into_owned(),
            kind,
            size_bytes,
        });
    }

    entries.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(entries)
}

/// Keep only the final component of a server-supplied file name
fn sanitize_filename(name: &str) -> Option<String> {
    let name = name.trim().trim_matches('"');
    let last = name.rsplit(['/', '\\']).next()?;
    if last.is_empty() || last == "." || last == ".." {
        return None;
    }
    Some(last.to_string())
}

/// Extract filename from HTTP response
///
/// Tries the Content-Disposition header first (plain and RFC 5987 forms),
/// then the last segment of the URL path. The extension is kept, since it
/// decides whether the download is extracted.
///
/// Returns `None` if neither source yields a usable name.
pub fn filename_from_response(response: &reqwest::Response, url: &str) -> Option<String> {
    if let Some(content_disposition) = response.headers().get("content-disposition")
        && let Ok(value) = content_disposition.to_str()
    {
        // Format: attachment; filename="file.zip" or filename*=UTF-8''file.zip
        for part in value.split(';') {
            let part = part.trim();
            if let Some(filename) = part.strip_prefix("filename=") {
                if let Some(name) = sanitize_filename(filename) {
                    return Some(name);
                }
            } else if let Some(filename) = part.strip_prefix("filename*=") {
                // charset'lang'encoded-filename
                if let Some(idx) = filename.rfind('\'')
                    && let Ok(decoded) = urlencoding::decode(&filename[idx + 1..])
                    && let Some(name) = sanitize_filename(&decoded)
                {
                    return Some(name);
                }
            }
        }
    }

    let parsed_url = url::Url::parse(url).ok()?;
    let last_segment = parsed_url.path_segments()?.next_back()?;
    let decoded = urlencoding::decode(last_segment).ok()?;
    sanitize_filename(&decoded)
}
