//! Command: change the address, hostname or tags of an entry.
use std::io::Write;

use anyhow::Result;

use crate::cli::{EditOpts, GlobalOpts};
use crate::config::EditRequest;
use crate::logging::Logger;

use super::CommandSetup;

/// Run the edit command.
///
/// # Errors
///
/// Returns an error if nothing was requested, the host is not found, or a
/// file cannot be written.
pub fn run(global: &GlobalOpts, opts: &EditOpts, log: &Logger, out: &mut dyn Write) -> Result<()> {
    let request = EditRequest::new(
        opts.host.as_deref(),
        opts.ip.as_deref(),
        opts.rename.as_deref(),
        opts.tag.as_deref(),
    )?;
    let setup = CommandSetup::init(global, "edit", true, log)?;

    log.stage(&format!("Editing {}", request.host));
    let outcome = setup.repository.edit(&request)?;

    writeln!(
        out,
        "Updated {} {} -> {} {}",
        outcome.before.ip, outcome.before.hostname, outcome.after.ip, outcome.after.hostname
    )?;
    writeln!(out, "Backup: {}", outcome.backup.display())?;
    Ok(())
}
