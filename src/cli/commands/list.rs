//! `passvault list`: show stored credentials without their secrets.

use crate::cli::output;
use crate::cli::{open_session, Cli};
use crate::errors::Result;

/// Execute the `list` command.
pub fn execute(cli: &Cli, search: Option<&str>) -> Result<()> {
    let session = open_session(cli)?;

    let entries = match search {
        Some(keyword) => session.search(keyword),
        None => session.entries().iter().collect(),
    };

    if let Some(keyword) = search {
        output::info(&format!(
            "{} of {} entries match '{keyword}'",
            entries.len(),
            session.len()
        ));
    }
    output::print_entries_table(&entries);

    Ok(())
}
