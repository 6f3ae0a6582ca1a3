//! Log file location and timestamps.
use std::ffi::OsString;
use std::fs;
use std::path::PathBuf;

/// Directory holding per-command log files, without creating it.
///
/// `$XDG_CACHE_HOME/hostsmgr`, else `<home>/.cache/hostsmgr` where home is
/// `$HOME` or `%USERPROFILE%`, else `./.cache/hostsmgr`.
fn log_dir_from(env: impl Fn(&str) -> Option<OsString>) -> PathBuf {
    let base = env("XDG_CACHE_HOME").map_or_else(
        || {
            env("HOME")
                .or_else(|| env("USERPROFILE"))
                .map_or_else(|| PathBuf::from("."), PathBuf::from)
                .join(".cache")
        },
        PathBuf::from,
    );
    base.join("hostsmgr")
}

/// Path of the log file for `command`, creating the directory if needed.
///
/// Returns `None` when the directory cannot be created; logging to file is
/// then skipped.
pub(super) fn log_file_path(command: &str) -> Option<PathBuf> {
    let dir = log_dir_from(|key| std::env::var_os(key));
    fs::create_dir_all(&dir).ok()?;
    Some(dir.join(format!("{command}.log")))
}

/// Current UTC time as `YYYY-MM-DD HH:MM:SS`, used in the log header.
pub(super) fn format_utc_datetime() -> String {
    chrono::Utc::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Current UTC time as `HH:MM:SS`, prefixed to each log line.
pub(super) fn format_utc_time() -> String {
    chrono::Utc::now().format("%H:%M:%S").to_string()
}
