// bases/tapeshelf/src/fs_ops.rs
//! Filesystem writes, all subject to the overwrite policy.

use crate::error::{Result, ShelfError};
use std::fs;
use std::path::Path;

/// Whether `path` may be (re)written; an existing file without overwrite is
/// a logged skip
pub fn may_write(path: &Path, overwrite: bool) -> bool {
    if path.exists() && !overwrite {
        tracing::info!("{} exists, skipping", path.display());
        return false;
    }
    true
}

/// Write `contents` to `path` unless that is a skip; true when written
pub fn write_file(path: &Path, contents: &str, overwrite: bool) -> Result<bool> {
    if !may_write(path, overwrite) {
        return Ok(false);
    }
    fs::write(path, contents).map_err(|e| ShelfError::io("write", path, e))?;
    tracing::debug!("Wrote {}", path.display());
    Ok(true)
}

pub fn create_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path).map_err(|e| ShelfError::io("create directory", path, e))
}

/// Size of a file, failing when it cannot be read
pub fn file_len(path: &Path) -> Result<u64> {
    fs::metadata(path)
        .map(|m| m.len())
        .map_err(|e| ShelfError::io("read metadata of", path, e))
}

pub fn remove_dir(path: &Path) -> Result<()> {
    fs::remove_dir_all(path).map_err(|e| ShelfError::io("delete", path, e))
}
