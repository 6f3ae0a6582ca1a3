//! Platform-specific locations and privilege checks.
use std::fmt;
use std::path::PathBuf;

use crate::error::PlatformError;

/// Detected operating system platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Os {
    /// Linux, macOS and other Unix-like systems.
    Unix,
    /// Microsoft Windows.
    Windows,
}

impl fmt::Display for Os {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unix => write!(f, "unix"),
            Self::Windows => write!(f, "windows"),
        }
    }
}

impl Os {
    /// Detect the current operating system.
    #[must_use]
    pub const fn detect() -> Self {
        if cfg!(windows) { Self::Windows } else { Self::Unix }
    }

    /// Location of the system hosts file on this OS.
    ///
    /// On Windows `%SystemRoot%` is honoured, defaulting to `C:\Windows`.
    #[must_use]
    pub fn hosts_path(self) -> PathBuf {
        match self {
            Self::Unix => PathBuf::from("/etc/hosts"),
            Self::Windows => std::env::var_os("SystemRoot")
                .map_or_else(|| PathBuf::from(r"C:\Windows"), PathBuf::from)
                .join("System32")
                .join("drivers")
                .join("etc")
                .join("hosts"),
        }
    }
}

/// Location of the system hosts file on the running platform.
#[must_use]
pub fn default_hosts_path() -> PathBuf {
    Os::detect().hosts_path()
}

/// Return `true` if the process runs as root / Administrator.
#[cfg(unix)]
#[must_use]
pub fn is_elevated() -> bool {
    // SAFETY: `geteuid` has no preconditions and cannot fail.
    #[allow(unsafe_code)]
    unsafe {
        libc::geteuid() == 0
    }
}

/// Return `true` if the process runs as root / Administrator.
///
/// `net session` only succeeds from an elevated prompt.
#[cfg(windows)]
#[must_use]
pub fn is_elevated() -> bool {
    std::process::Command::new("net")
        .arg("session")
        .stdout(std::process::Stdio::null())
        .stderr(std::process::Stdio::null())
        .status()
        .is_ok_and(|status| status.success())
}

/// Return `true` if the process runs as root / Administrator.
#[cfg(not(any(unix, windows)))]
#[must_use]
pub const fn is_elevated() -> bool {
    true
}

/// Fail with [`PlatformError::NotElevated`] unless running elevated.
///
/// # Errors
///
/// Returns [`PlatformError::NotElevated`] naming `command`.
pub fn ensure_elevated(command: &str) -> Result<(), PlatformError> {
    if is_elevated() {
        Ok(())
    } else {
        Err(PlatformError::NotElevated {
            command: command.to_string(),
        })
    }
}
