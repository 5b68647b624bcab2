mod common;

use common::{codec, sample_record};
use nodelock_license::{read_artifact, write_artifact, LicenseError, LICENSE_FILE};
use tempfile::TempDir;

#[test]
fn write_then_read_roundtrip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(LICENSE_FILE);
    let bytes = codec().encode(&sample_record()).unwrap();
    write_artifact(&path, &bytes).unwrap();
    assert_eq!(read_artifact(&path).unwrap(), bytes);
}

#[test]
fn write_creates_parent_directories() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested/deeper").join(LICENSE_FILE);
    write_artifact(&path, b"artifact").unwrap();
    assert_eq!(read_artifact(&path).unwrap(), b"artifact");
}

#[test]
fn write_truncates_previous_artifact() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(LICENSE_FILE);
    write_artifact(&path, b"a much longer first artifact").unwrap();
    write_artifact(&path, b"short").unwrap();
    assert_eq!(read_artifact(&path).unwrap(), b"short");
}

#[test]
fn read_missing_file_is_io_error() {
    let dir = TempDir::new().unwrap();
    let err = read_artifact(dir.path().join("absent.lic")).unwrap_err();
    assert!(matches!(err, LicenseError::Io(_)));
}
