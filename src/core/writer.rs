//! Crash-safe file output
//!
//! New content is always written to a temporary file in the destination
//! directory and renamed over the target only once it is fully flushed. The
//! temporary file is removed automatically if anything fails before the
//! rename, so the target is either the old content or the new one.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::error::{M3ucError, Result};

/// Atomically replace (or create) `path` with `contents`
pub fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };

    let mut tmp = NamedTempFile::new_in(&dir).map_err(|e| M3ucError::write(path, e))?;

    tmp.write_all(contents.as_bytes())
        .and_then(|_| tmp.flush())
        .and_then(|_| tmp.as_file().sync_all())
        .map_err(|e| M3ucError::write(path, e))?;

    // Temp files are created owner-only; a replaced file keeps its old mode
    if let Ok(existing) = fs::metadata(path) {
        tmp.as_file()
            .set_permissions(existing.permissions())
            .map_err(|e| M3ucError::write(path, e))?;
    }

    tmp.persist(path).map_err(|e| M3ucError::write(path, e.error))?;

    log::info!("Wrote {}", path.display());
    Ok(())
}

/// `<original>.backup`
pub fn backup_path(original: &Path) -> PathBuf {
    let mut name = original.as_os_str().to_os_string();
    name.push(".backup");
    PathBuf::from(name)
}

/// Copy `original` to `<original>.backup` and make sure it reached the disk
pub fn create_backup(original: &Path) -> Result<PathBuf> {
    let backup = backup_path(original);

    fs::copy(original, &backup)
        .and_then(|_| File::open(&backup))
        .and_then(|file| file.sync_all())
        .map_err(|e| M3ucError::backup(&backup, e))?;

    log::info!("Backup created: {}", backup.display());
    Ok(backup)
}

/// Replace `original` with `contents`, backing it up first unless told not to
///
/// A failed backup aborts before the original is touched.
pub fn update_in_place(original: &Path, contents: &str, backup: bool) -> Result<Option<PathBuf>> {
    let backup_file = if backup {
        Some(create_backup(original)?)
    } else {
        None
    };

    write_atomic(original, contents)?;
    Ok(backup_file)
}
