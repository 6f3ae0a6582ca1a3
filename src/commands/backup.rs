//! Command: snapshot the hosts file.
use std::io::Write;

use anyhow::Result;

use crate::cli::GlobalOpts;
use crate::logging::Logger;

use super::CommandSetup;

/// Run the backup command.
///
/// # Errors
///
/// Returns an error if the snapshot cannot be written.
pub fn run(global: &GlobalOpts, log: &Logger, out: &mut dyn Write) -> Result<()> {
    let setup = CommandSetup::init(global, "backup", true, log)?;
    log.stage("Backing up hosts file");
    let path = setup.repository.backup()?;
    writeln!(out, "{}", path.display())?;
    Ok(())
}
