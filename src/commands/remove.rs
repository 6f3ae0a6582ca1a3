//! Command: delete an entry and its tags.
use std::io::Write;

use anyhow::Result;

use crate::cli::{GlobalOpts, RemoveOpts};
use crate::error::HostsError;
use crate::logging::Logger;

use super::CommandSetup;

/// Run the remove command.
///
/// # Errors
///
/// Returns an error if `--host` is missing, the host is not found, or a
/// file cannot be written.
pub fn run(
    global: &GlobalOpts,
    opts: &RemoveOpts,
    log: &Logger,
    out: &mut dyn Write,
) -> Result<()> {
    let host = opts
        .host
        .as_deref()
        .map(str::trim)
        .filter(|h| !h.is_empty())
        .ok_or(HostsError::MissingOption("host"))?;
    let setup = CommandSetup::init(global, "remove", true, log)?;

    log.stage(&format!("Removing {host}"));
    let outcome = setup.repository.remove(host)?;
    if outcome.tags_removed {
        log.info(&format!("dropped tags of {}", outcome.removed.hostname));
    }

    writeln!(
        out,
        "Removed {} {}",
        outcome.removed.ip, outcome.removed.hostname
    )?;
    writeln!(out, "Backup: {}", outcome.backup.display())?;
    Ok(())
}
