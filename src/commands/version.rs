//! Command: print version information.
use std::io::Write;

use anyhow::Result;

use crate::cli::VERSION;

/// Print the hostsmgr version.
///
/// # Errors
///
/// Returns an error if `out` cannot be written.
pub fn run(out: &mut dyn Write) -> Result<()> {
    writeln!(out, "hostsmgr {VERSION}")?;
    Ok(())
}
