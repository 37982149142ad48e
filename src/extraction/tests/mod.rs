use crate::error::Error;
use crate::extraction::*;
use std::path::Path;
use tempfile::TempDir;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Create a valid ZIP archive containing the given files (directories end with '/')
fn create_zip_archive(archive_path: &Path, files: &[(&str, &[u8])]) {
    let file = std::fs::File::create(archive_path).unwrap();
    let mut writer = ::zip::ZipWriter::new(file);
    let options =
        ::zip::write::FileOptions::default().compression_method(::zip::CompressionMethod::Stored);
    for (name, content) in files {
        if name.ends_with('/') {
            writer.add_directory(*name, options).unwrap();
        } else {
            writer.start_file(*name, options).unwrap();
            std::io::Write::write_all(&mut writer, content).unwrap();
        }
    }
    writer.finish().unwrap();
}

// ---------------------------------------------------------------------------
// ZipExtractor::is_zip
// ---------------------------------------------------------------------------

#[test]
fn test_is_zip_matches_extension_case_insensitively() {
    assert!(ZipExtractor::is_zip(Path::new("wine-reviews.zip")));
    assert!(ZipExtractor::is_zip(Path::new("/tmp/ARCHIVE.ZIP")));
    assert!(!ZipExtractor::is_zip(Path::new("data.json")));
    assert!(!ZipExtractor::is_zip(Path::new("zip")));
}

// ---------------------------------------------------------------------------
// ZipExtractor::extract
// ---------------------------------------------------------------------------

#[test]
fn test_extract_writes_all_files() {
    let temp_dir = TempDir::new().unwrap();
    let archive = temp_dir.path().join("dataset.zip");
    create_zip_archive(
        &archive,
        &[
            ("data.json", br#"{"a": 1}"#),
            ("winemag-data.csv", b"country,points\nItaly,87\n"),
        ],
    );

    let dest = temp_dir.path().join("out");
    let files = ZipExtractor::extract(&archive, &dest).unwrap();

    assert_eq!(files, vec![dest.join("data.json"), dest.join("winemag-data.csv")]);
    assert_eq!(
        std::fs::read_to_string(dest.join("data.json")).unwrap(),
        r#"{"a": 1}"#
    );
}

#[test]
fn test_extract_creates_nested_directories() {
    let temp_dir = TempDir::new().unwrap();
    let archive = temp_dir.path().join("nested.zip");
    create_zip_archive(
        &archive,
        &[("images/", b""), ("images/cover.png", b"png"), ("meta/info.txt", b"info")],
    );

    let dest = temp_dir.path().join("out");
    let files = ZipExtractor::extract(&archive, &dest).unwrap();

    // Directory entries are created but not reported as files
    assert_eq!(files.len(), 2);
    assert!(dest.join("images").is_dir());
    assert!(dest.join("images/cover.png").is_file());
    assert!(dest.join("meta/info.txt").is_file());
}

#[test]
fn test_extract_overwrites_existing_files() {
    let temp_dir = TempDir::new().unwrap();
    let dest = temp_dir.path().join("out");
    std::fs::create_dir_all(&dest).unwrap();
    std::fs::write(dest.join("data.csv"), b"stale contents that are longer").unwrap();

    let archive = temp_dir.path().join("dataset.zip");
    create_zip_archive(&archive, &[("data.csv", b"fresh")]);

    ZipExtractor::extract(&archive, &dest).unwrap();

    assert_eq!(std::fs::read_to_string(dest.join("data.csv")).unwrap(), "fresh");
}

#[test]
fn test_extract_skips_entries_escaping_destination() {
    let temp_dir = TempDir::new().unwrap();
    let archive = temp_dir.path().join("evil.zip");
    create_zip_archive(&archive, &[("../escaped.txt", b"nope"), ("ok.txt", b"fine")]);

    let dest = temp_dir.path().join("out");
    let files = ZipExtractor::extract(&archive, &dest).unwrap();

    assert_eq!(files, vec![dest.join("ok.txt")]);
    assert!(!temp_dir.path().join("escaped.txt").exists());
}

#[test]
fn test_extract_rejects_non_zip_content() {
    let temp_dir = TempDir::new().unwrap();
    let archive = temp_dir.path().join("broken.zip");
    std::fs::write(&archive, b"this is not a zip archive").unwrap();

    let result = ZipExtractor::extract(&archive, &temp_dir.path().join("out"));

    match result {
        Err(Error::Extraction { archive: path, reason }) => {
            assert_eq!(path, archive);
            assert!(reason.contains("failed to read ZIP archive"));
        }
        other => panic!("expected Extraction error, got {other:?}"),
    }
}

#[test]
fn test_extract_missing_archive_is_io_error() {
    let temp_dir = TempDir::new().unwrap();
    let result = ZipExtractor::extract(
        &temp_dir.path().join("missing.zip"),
        &temp_dir.path().join("out"),
    );

    match result {
        Err(Error::Io(e)) => assert_eq!(e.kind(), std::io::ErrorKind::NotFound),
        other => panic!("expected Io error, got {other:?}"),
    }
}

// ---------------------------------------------------------------------------
// extract_and_remove
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_extract_and_remove_deletes_archive_on_success() {
    let temp_dir = TempDir::new().unwrap();
    let archive = temp_dir.path().join("dataset.zip");
    create_zip_archive(&archive, &[("data.json", b"{}")]);

    let files = extract_and_remove(&archive, temp_dir.path()).await.unwrap();

    assert_eq!(files, vec![temp_dir.path().join("data.json")]);
    assert!(!archive.exists(), "archive should be removed after extraction");
}

#[tokio::test]
async fn test_extract_and_remove_keeps_archive_on_failure() {
    let temp_dir = TempDir::new().unwrap();
    let archive = temp_dir.path().join("broken.zip");
    std::fs::write(&archive, b"garbage").unwrap();

    let result = extract_and_remove(&archive, temp_dir.path()).await;

    assert!(matches!(result, Err(Error::Extraction { .. })));
    assert!(archive.exists(), "archive should be kept when extraction fails");
}
