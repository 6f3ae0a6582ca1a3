//! File locations and behaviour switches.
//!
//! Resolution order, last wins: platform defaults, the TOML config file,
//! environment variables, command-line flags.
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::ConfigError;
use crate::platform;

/// Environment variable overriding the hosts file path.
pub const HOSTS_FILE_ENV: &str = "HOSTSMGR_HOSTS_FILE";
/// Environment variable overriding the tag store path.
pub const TAGS_FILE_ENV: &str = "HOSTSMGR_TAGS_FILE";
/// File name of the tag store when placed beside the hosts file.
pub const DEFAULT_TAGS_FILE_NAME: &str = "hosts_tags.json";

/// Resolved settings for one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// The hosts file to read and rewrite.
    pub hosts_file: PathBuf,
    /// JSON file holding hostname → tags.
    pub tags_file: PathBuf,
    /// Refuse mutating commands unless running elevated.
    pub require_elevation: bool,
}

/// Values given explicitly on the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    /// Explicit config file; must exist when given.
    pub config: Option<PathBuf>,
    /// Hosts file path.
    pub hosts_file: Option<PathBuf>,
    /// Tag store path.
    pub tags_file: Option<PathBuf>,
}

/// On-disk shape of `config.toml`. Every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct SettingsFile {
    hosts_file: Option<PathBuf>,
    tags_file: Option<PathBuf>,
    require_elevation: Option<bool>,
}

impl SettingsFile {
    fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

impl Settings {
    /// Resolve settings from the process environment and `overrides`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a config file exists but cannot be read or
    /// parsed, or if an explicit `--config` path is missing.
    pub fn load(overrides: &Overrides) -> Result<Self, ConfigError> {
        Self::resolve(
            overrides,
            |key| std::env::var_os(key).map(PathBuf::from),
            default_config_path(),
        )
    }

    /// Resolve settings with an injectable environment lookup.
    ///
    /// `default_config` is only read when it exists; an explicit
    /// `overrides.config` must exist.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the selected config file cannot be read or
    /// parsed.
    pub fn resolve(
        overrides: &Overrides,
        env: impl Fn(&str) -> Option<PathBuf>,
        default_config: Option<PathBuf>,
    ) -> Result<Self, ConfigError> {
        let file = match (&overrides.config, default_config) {
            (Some(explicit), _) => SettingsFile::load(explicit)?,
            (None, Some(default)) if default.is_file() => SettingsFile::load(&default)?,
            (None, _) => SettingsFile::default(),
        };

        let hosts_file = overrides
            .hosts_file
            .clone()
            .or_else(|| env(HOSTS_FILE_ENV))
            .or(file.hosts_file)
            .unwrap_or_else(platform::default_hosts_path);
        let tags_file = overrides
            .tags_file
            .clone()
            .or_else(|| env(TAGS_FILE_ENV))
            .or(file.tags_file)
            .unwrap_or_else(|| hosts_file.with_file_name(DEFAULT_TAGS_FILE_NAME));

        let settings = Self {
            hosts_file,
            tags_file,
            require_elevation: file.require_elevation.unwrap_or(true),
        };
        tracing::debug!(
            hosts_file = %settings.hosts_file.display(),
            tags_file = %settings.tags_file.display(),
            require_elevation = settings.require_elevation,
            "Resolved settings"
        );
        Ok(settings)
    }
}

/// `$XDG_CONFIG_HOME/hostsmgr/config.toml`, falling back to `~/.config` or
/// `%APPDATA%`.
fn default_config_path() -> Option<PathBuf> {
    let base = std::env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|| std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".config")))
        .or_else(|| std::env::var_os("APPDATA").map(PathBuf::from))?;
    Some(base.join("hostsmgr").join("config.toml"))
}
