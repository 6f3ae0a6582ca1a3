//! Command: list entries as a table.
use std::io::Write;

use anyhow::Result;

use crate::cli::{GlobalOpts, ListOpts};
use crate::config::{ListOptions, SortKey};
use crate::hosts::{table, view};
use crate::logging::Logger;

use super::CommandSetup;

/// Run the list command.
///
/// # Errors
///
/// Returns an error if the hosts file or tag store cannot be read.
pub fn run(global: &GlobalOpts, opts: &ListOpts, log: &Logger, out: &mut dyn Write) -> Result<()> {
    let setup = CommandSetup::init(global, "list", false, log)?;
    let options = list_options(opts, log);

    let entries = setup.repository.entries()?;
    let tags = setup.repository.tags()?;
    log.debug(&format!(
        "{} entries, {} tagged hostnames",
        entries.len(),
        tags.len()
    ));

    let rows = view::rows(entries, &tags, &options);
    if rows.is_empty() {
        writeln!(out, "No entries.")?;
        return Ok(());
    }
    write!(out, "{}", table::render(&rows))?;
    let noun = if rows.len() == 1 { "entry" } else { "entries" };
    writeln!(out, "{} {noun}", rows.len())?;
    Ok(())
}

fn list_options(opts: &ListOpts, log: &Logger) -> ListOptions {
    let sort = opts.sort.as_deref().and_then(|value| {
        let key = SortKey::from_arg(value);
        if key.is_none() {
            log.warn(&format!("unknown sort key '{value}', keeping file order"));
        }
        key
    });
    ListOptions {
        tag: opts
            .tag
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(String::from),
        all: opts.all,
        sort,
        desc: opts.desc,
    }
}
