//! Artifact persistence.
//!
//! A thin layer over the filesystem; the codec itself never performs I/O.
//! Both file roles share one format and differ only in payload: a node
//! request (`node.info`) carries the fields the client filled in, a grant
//! (`license.lic`) carries the authority's fill-in on top.

use crate::error::LicenseResult;
use std::fs;
use std::path::Path;

/// Conventional file name for a client node request.
pub const NODE_REQUEST_FILE: &str = "node.info";

/// Conventional file name for an issued grant.
pub const LICENSE_FILE: &str = "license.lic";

/// Reads artifact bytes from `path`.
pub fn read_artifact(path: impl AsRef<Path>) -> LicenseResult<Vec<u8>> {
    Ok(fs::read(path)?)
}

/// Writes artifact bytes to `path`, creating parent directories and
/// truncating any previous artifact.
pub fn write_artifact(path: impl AsRef<Path>, bytes: &[u8]) -> LicenseResult<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, bytes)?;
    Ok(())
}
