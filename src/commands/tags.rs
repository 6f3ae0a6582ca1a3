//! Command: show every tagged hostname.
use std::io::Write;

use anyhow::Result;

use crate::cli::GlobalOpts;
use crate::logging::Logger;

use super::CommandSetup;

/// Run the tags command.
///
/// # Errors
///
/// Returns an error if the tag store cannot be read.
pub fn run(global: &GlobalOpts, log: &Logger, out: &mut dyn Write) -> Result<()> {
    let setup = CommandSetup::init(global, "tags", false, log)?;
    let set = setup.repository.tags()?;
    let tagged: Vec<_> = set.iter().filter(|host| !host.is_empty()).collect();
    if tagged.is_empty() {
        writeln!(out, "No tags defined.")?;
        return Ok(());
    }
    log.debug(&format!("{} tagged hostnames", tagged.len()));
    for host in tagged {
        writeln!(out, "{}: {}", host.hostname(), host.to_vec().join(", "))?;
    }
    Ok(())
}
