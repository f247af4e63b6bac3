//! Atomic file replacement
//!
//! A save never leaves a half-written file behind:
//!
//! 1. Write the new content to `<file>.tmp` and sync it to disk
//! 2. Move the current file to the backup path
//! 3. Rename the temp file into place (atomic on most filesystems)
//!
//! After a crash the target is either the old version, the new version, or
//! missing with the old version intact at the backup path.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Temp file used while writing `path`
pub fn temp_path(path: &Path) -> PathBuf {
    path.with_extension("tmp")
}

/// Atomically replace `path`, keeping its previous version at `backup`
pub fn write_with_backup<F>(path: &Path, backup: &Path, write_fn: F) -> io::Result<()>
where
    F: FnOnce(&mut File) -> io::Result<()>,
{
    let temp = temp_path(path);

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    {
        let mut file = File::create(&temp)?;
        write_fn(&mut file)?;
        file.flush()?;
        file.sync_all()?;
    }

    if path.exists() {
        if backup.exists() {
            fs::remove_file(backup)?;
        }
        fs::rename(path, backup)?;
    }

    fs::rename(&temp, path)?;
    Ok(())
}

/// Remove a temp file left behind by an interrupted write of `path`
///
/// Returns whether a file was removed.
pub fn remove_stale_temp(path: &Path) -> io::Result<bool> {
    let temp = temp_path(path);
    if !temp.exists() {
        return Ok(false);
    }
    fs::remove_file(&temp)?;
    Ok(true)
}
