//! Command-level logging facade.
use std::path::{Path, PathBuf};

use super::subscriber::STAGE_TARGET;
use super::utils::log_file_path;

/// What commands log through.
///
/// Each call becomes a [`tracing`] event; the subscriber decides what reaches
/// the console. The log file for the command, usually
/// `~/.cache/hostsmgr/<command>.log`, receives everything.
#[derive(Debug)]
pub struct Logger {
    log_file: Option<PathBuf>,
}

impl Logger {
    /// Logger for `command`. The file itself is opened by
    /// [`init_subscriber`](super::init_subscriber).
    #[must_use]
    pub fn new(command: &str) -> Self {
        Self {
            log_file: log_file_path(command),
        }
    }

    /// Logger reporting `path` as its log file.
    #[cfg(test)]
    #[must_use]
    pub(crate) const fn with_log_file(path: PathBuf) -> Self {
        Self {
            log_file: Some(path),
        }
    }

    /// Where this run's log is written, if anywhere.
    #[must_use]
    pub fn log_path(&self) -> Option<&Path> {
        self.log_file.as_deref()
    }

    /// Report a failure.
    #[allow(clippy::unused_self)]
    pub fn error(&self, msg: &str) {
        tracing::error!("{msg}");
    }

    /// Report something suspicious that does not stop the command.
    #[allow(clippy::unused_self)]
    pub fn warn(&self, msg: &str) {
        tracing::warn!("{msg}");
    }

    /// Announce a step of the command, shown as `==> msg`.
    #[allow(clippy::unused_self)]
    pub fn stage(&self, msg: &str) {
        tracing::info!(target: STAGE_TARGET, "{msg}");
    }

    /// Progress detail.
    #[allow(clippy::unused_self)]
    pub fn info(&self, msg: &str) {
        tracing::info!("{msg}");
    }

    /// Detail shown on the console only with `--verbose`.
    #[allow(clippy::unused_self)]
    pub fn debug(&self, msg: &str) {
        tracing::debug!("{msg}");
    }
}
