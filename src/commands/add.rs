//! Command: append entries for one or more hostnames.
use std::io::Write;

use anyhow::Result;

use crate::cli::{AddOpts, GlobalOpts};
use crate::config::AddRequest;
use crate::logging::Logger;

use super::CommandSetup;

/// Run the add command.
///
/// # Errors
///
/// Returns an error if validation fails, a hostname already exists, or the
/// hosts file, backup or tag store cannot be written.
pub fn run(global: &GlobalOpts, opts: &AddOpts, log: &Logger, out: &mut dyn Write) -> Result<()> {
    let request = AddRequest::new(
        opts.ip.as_deref(),
        &opts.hosts,
        &opts.tags,
        opts.comment.as_deref(),
    )?;
    let setup = CommandSetup::init(global, "add", true, log)?;

    log.stage(&format!("Adding {} host(s)", request.hostnames.len()));
    let outcome = setup.repository.add(&request)?;
    log.debug(&format!("backup: {}", outcome.backup.display()));

    let names: Vec<&str> = outcome
        .added
        .iter()
        .map(|entry| entry.hostname.as_str())
        .collect();
    writeln!(out, "Added {} {}", request.ip, names.join(", "))?;
    if !request.tags.is_empty() {
        writeln!(out, "Tagged with {}", request.tags.join(", "))?;
    }
    writeln!(out, "Backup: {}", outcome.backup.display())?;
    Ok(())
}
