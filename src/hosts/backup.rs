//! Timestamped snapshots of the hosts file.
use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;

use crate::error::BackupError;

/// Suffix format appended to the hosts path: `.bak_YYYYMMDD_HHMMSS`.
const BACKUP_SUFFIX_FORMAT: &str = ".bak_%Y%m%d_%H%M%S";

/// Copy `path` to a sibling backup named after the current local time.
///
/// # Errors
///
/// Returns [`BackupError::AlreadyExists`] if a backup was already taken in
/// the same second, or [`BackupError::Io`] if the copy fails.
pub fn snapshot(path: &Path) -> Result<PathBuf, BackupError> {
    snapshot_at(path, chrono::Local::now().naive_local())
}

/// Copy `path` to the backup name computed for `at`.
///
/// The destination is opened with `create_new`, so an existing backup is
/// never overwritten.
///
/// # Errors
///
/// Returns [`BackupError::AlreadyExists`] if the destination exists, or
/// [`BackupError::Io`] if the source cannot be read or the copy fails.
pub fn snapshot_at(path: &Path, at: NaiveDateTime) -> Result<PathBuf, BackupError> {
    let dest = backup_path(path, at);
    let io_err = |source| BackupError::Io {
        path: dest.clone(),
        source,
    };

    let mut src = fs::File::open(path).map_err(io_err)?;
    let mut out = match fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&dest)
    {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
            return Err(BackupError::AlreadyExists { path: dest.clone() });
        }
        Err(e) => return Err(io_err(e)),
    };
    io::copy(&mut src, &mut out).map_err(io_err)?;
    out.sync_all().map_err(io_err)?;

    tracing::info!(source = %path.display(), backup = %dest.display(), "Backed up hosts file");
    Ok(dest)
}

/// Compute the backup path for `path` at time `at`.
#[must_use]
pub fn backup_path(path: &Path, at: NaiveDateTime) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(at.format(BACKUP_SUFFIX_FORMAT).to_string());
    PathBuf::from(name)
}
