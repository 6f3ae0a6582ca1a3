//! Domain-specific error types for the hosts manager.
//!
//! Library modules return the typed errors defined here while command
//! handlers at the CLI boundary convert them to [`anyhow::Error`] via the
//! standard `?` operator.
//!
//! # Error hierarchy
//!
//! ```text
//! HostsError
//! ├── MissingOption / NothingToEdit  validation, before any I/O
//! ├── HostExists                     conflict on add
//! ├── HostNotFound / UnparsableLine  lookup failures
//! ├── Io                             hosts file read/write
//! ├── Backup(BackupError)            snapshot before write
//! └── Tags(TagStoreError)            tag metadata side file
//! ```

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by entry repository operations.
#[derive(Error, Debug)]
pub enum HostsError {
    /// A required option was not supplied.
    #[error("missing required option --{0}")]
    MissingOption(&'static str),

    /// `edit` was invoked without any change to apply.
    #[error("nothing to edit: pass at least one of --ip, --rename or --tag")]
    NothingToEdit,

    /// The hostname is already present in the hosts file.
    #[error("hostname already exists: {0}")]
    HostExists(String),

    /// No entry matches the requested hostname.
    #[error("host not found: {0}")]
    HostNotFound(String),

    /// The matched line no longer parses as an entry.
    #[error("cannot parse host line: {0}")]
    UnparsableLine(String),

    /// Reading or writing the hosts file failed.
    #[error("{action} {}: {source}", .path.display())]
    Io {
        /// What was being attempted (`"read"` or `"write"`).
        action: &'static str,
        /// Path of the hosts file.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The pre-write snapshot could not be taken.
    #[error(transparent)]
    Backup(#[from] BackupError),

    /// The tag store could not be read or written.
    #[error(transparent)]
    Tags(#[from] TagStoreError),
}

/// Errors raised while snapshotting the hosts file.
#[derive(Error, Debug)]
pub enum BackupError {
    /// A backup with the computed name already exists.
    #[error("backup already exists: {}", .path.display())]
    AlreadyExists {
        /// The colliding backup path.
        path: PathBuf,
    },

    /// Copying the hosts file failed.
    #[error("backup {} failed: {source}", .path.display())]
    Io {
        /// Destination path of the backup.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

/// Errors raised by the tag metadata store.
#[derive(Error, Debug)]
pub enum TagStoreError {
    /// The tag file exists but could not be read or written.
    #[error("tag store {}: {source}", .path.display())]
    Io {
        /// Path of the tag file.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The tag file is not a valid hostname → tag list mapping.
    #[error("invalid tag store {}: {source}", .path.display())]
    Format {
        /// Path of the tag file.
        path: PathBuf,
        /// Underlying JSON error.
        source: serde_json::Error,
    },
}

/// Errors that arise from configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("IO error reading config file {}: {source}", .path.display())]
    Io {
        /// Path to the file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The configuration file is not valid TOML for [`Settings`](crate::config::Settings).
    #[error("invalid config file {}: {source}", .path.display())]
    Parse {
        /// Path to the offending file.
        path: PathBuf,
        /// Underlying TOML error.
        source: toml::de::Error,
    },
}

/// Errors that arise from platform-specific checks.
#[derive(Error, Debug)]
pub enum PlatformError {
    /// The process lacks the privilege needed to modify the hosts file.
    #[error("'{command}' requires administrator privileges (run with sudo or as Administrator)")]
    NotElevated {
        /// The command that was refused.
        command: String,
    },
}
