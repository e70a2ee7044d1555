//! `passvault delete`: remove a credential from the vault.

use dialoguer::Confirm;

use crate::cli::output;
use crate::cli::{open_session, Cli};
use crate::errors::{PassVaultError, Result};

/// Execute the `delete` command.
pub fn execute(cli: &Cli, id: &str, force: bool) -> Result<()> {
    let mut session = open_session(cli)?;

    // Resolve first so the prompt can name the entry.
    let entry = session.find(id)?;
    let label = entry
        .summary()
        .unwrap_or_else(|| output::short_id(entry.id()).to_string());

    if !force {
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete entry '{label}'?"))
            .default(false)
            .interact()
            .map_err(|e| PassVaultError::CommandFailed(format!("confirm prompt: {e}")))?;

        if !confirmed {
            output::info("Cancelled.");
            return Ok(());
        }
    }

    let removed = session.remove(id)?;
    session.save()?;

    crate::audit::log_audit(cli, "delete", removed.summary().as_deref(), None);
    output::success(&format!(
        "Deleted entry {} ({} remaining)",
        output::short_id(removed.id()),
        session.len()
    ));

    Ok(())
}
