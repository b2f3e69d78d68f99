//! On-disk manifest tree: `<root>/<subfolder>/<slug>.m3u8`.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::StreamRecord;

pub const MANIFEST_EXTENSION: &str = "m3u8";

/// Where `record`'s manifest lives under `root`.
pub fn target_path(root: &Path, record: &StreamRecord) -> PathBuf {
    let mut path = root.to_path_buf();
    if let Some(subfolder) = record.subfolder() {
        path.push(subfolder);
    }
    path.push(format!("{}.{MANIFEST_EXTENSION}", record.slug));
    path
}

/// Write `content` verbatim, creating parent directories as needed.
/// Overwrites any existing file.
pub fn save_manifest(root: &Path, record: &StreamRecord, content: &str) -> io::Result<PathBuf> {
    let path = target_path(root, record);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&path, content.as_bytes())?;
    debug!(path = %path.display(), bytes = content.len(), "Manifest written");
    Ok(path)
}

/// Delete a previously saved manifest for `record`.
///
/// Returns the deleted path, or `None` if there was no regular file there.
pub fn remove_stale(root: &Path, record: &StreamRecord) -> io::Result<Option<PathBuf>> {
    let path = target_path(root, record);
    if !path.is_file() {
        return Ok(None);
    }
    fs::remove_file(&path)?;
    debug!(path = %path.display(), "Stale manifest removed");
    Ok(Some(path))
}
