//! Subcommand orchestration.
//!
//! Each command module takes the parsed options, a [`Logger`] and the
//! stream its user-facing output goes to.
pub mod add;
pub mod backup;
pub mod edit;
pub mod list;
pub mod remove;
pub mod tags;
pub mod version;

use std::io::Write;

use anyhow::{Context as _, Result};

use crate::cli::{Cli, Command, GlobalOpts};
use crate::config::Settings;
use crate::hosts::HostsRepository;
use crate::logging::Logger;
use crate::platform;

/// Shared state produced by the common command setup sequence.
///
/// Resolves settings, enforces the privilege requirement for commands that
/// write, and opens the repository.
#[derive(Debug)]
pub struct CommandSetup {
    /// Hosts file and tag store access.
    pub repository: HostsRepository,
}

impl CommandSetup {
    /// Resolve settings and open the repository for `command`.
    ///
    /// When `writes` is set and the settings require it, the privilege check
    /// runs before any file is touched.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be loaded or the process
    /// lacks the privileges a writing command needs.
    pub fn init(global: &GlobalOpts, command: &str, writes: bool, log: &Logger) -> Result<Self> {
        let settings =
            Settings::load(&global.overrides()).context("failed to load settings")?;
        if writes && settings.require_elevation {
            platform::ensure_elevated(command)?;
        }
        if let Some(path) = log.log_path() {
            log.debug(&format!("log file: {}", path.display()));
        }
        log.debug(&format!("hosts file: {}", settings.hosts_file.display()));
        log.debug(&format!("tags file: {}", settings.tags_file.display()));
        let repository = HostsRepository::new(&settings.hosts_file, &settings.tags_file);
        Ok(Self { repository })
    }
}

/// Dispatch the parsed command line, writing user-facing output to `out`.
///
/// # Errors
///
/// Returns the first error raised by the selected command.
pub fn run(cli: &Cli, log: &Logger, out: &mut dyn Write) -> Result<()> {
    match &cli.command {
        Command::List(opts) => list::run(&cli.global, opts, log, out),
        Command::Add(opts) => add::run(&cli.global, opts, log, out),
        Command::Edit(opts) => edit::run(&cli.global, opts, log, out),
        Command::Remove(opts) => remove::run(&cli.global, opts, log, out),
        Command::Tags => tags::run(&cli.global, log, out),
        Command::Backup => backup::run(&cli.global, log, out),
        Command::Version => version::run(out),
    }
}
