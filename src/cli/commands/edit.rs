//! `passvault edit`: change fields of an existing credential.

use crate::cli::output;
use crate::cli::{open_session, Cli};
use crate::errors::{PassVaultError, Result};
use crate::vault::EntryUpdate;

/// Execute the `edit` command.
pub fn execute(
    cli: &Cli,
    id: &str,
    site: Option<String>,
    user: Option<String>,
    note: Option<String>,
    secret: bool,
) -> Result<()> {
    let secret = if secret {
        Some(
            dialoguer::Password::new()
                .with_prompt("Enter new secret")
                .allow_empty_password(true)
                .interact()
                .map_err(|e| PassVaultError::CommandFailed(format!("input prompt: {e}")))?,
        )
    } else {
        None
    };

    let update = EntryUpdate {
        secret,
        site,
        user,
        note,
    };
    if update.is_noop() {
        output::tip("Pass --site, --user, --note or --secret.");
        return Err(PassVaultError::CommandFailed("nothing to change".into()));
    }

    let mut session = open_session(cli)?;
    let entry = session.update(id, update)?;
    let short = output::short_id(entry.id()).to_string();
    let summary = entry.summary();
    session.save()?;

    crate::audit::log_audit(cli, "edit", summary.as_deref(), None);
    output::success(&format!("Entry {short} updated"));

    Ok(())
}
