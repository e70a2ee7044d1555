//! `passvault show`: print or copy a credential's secret.

use crate::cli::output;
use crate::cli::{clipboard, open_session, Cli};
use crate::errors::Result;

/// Execute the `show` command.
pub fn execute(cli: &Cli, id: &str, copy: bool) -> Result<()> {
    let session = open_session(cli)?;
    let entry = session.find(id)?;

    if copy {
        clipboard::copy(entry.secret())?;
        output::success(&format!(
            "Secret for {} copied to clipboard",
            output::short_id(entry.id())
        ));
    } else {
        // Bare value on stdout so it can be piped.
        println!("{}", entry.secret());
    }

    crate::audit::log_audit(cli, "show", entry.summary().as_deref(), None);

    Ok(())
}
