//! `passvault add`: store a new credential.

use std::io::{self, IsTerminal, Read};

use zeroize::Zeroizing;

use crate::cli::output;
use crate::cli::{open_session, settings, Cli};
use crate::errors::{PassVaultError, Result};
use crate::generator::PasswordGenerator;
use crate::vault::VaultEntry;

/// Execute the `add` command.
pub fn execute(cli: &Cli, site: &str, user: &str, note: &str, generate: bool) -> Result<()> {
    // Determine the secret from one of three sources.
    let secret = if generate {
        // Source 1: The generator, with configured defaults.
        let settings = settings()?;
        let classes = settings.generator_classes()?;
        Zeroizing::new(PasswordGenerator::new().generate(
            settings.generator_low,
            settings.generator_high,
            &classes,
        )?)
    } else if !io::stdin().is_terminal() {
        // Source 2: Piped input (stdin is not a terminal).
        let mut buf = Zeroizing::new(String::new());
        io::stdin().read_to_string(&mut buf)?;
        Zeroizing::new(buf.trim_end().to_string())
    } else {
        // Source 3: Interactive secure prompt (default).
        Zeroizing::new(
            dialoguer::Password::new()
                .with_prompt("Enter secret")
                .allow_empty_password(true)
                .interact()
                .map_err(|e| PassVaultError::CommandFailed(format!("input prompt: {e}")))?,
        )
    };

    let entry = VaultEntry::new(secret.as_str(), site, user, note);
    if entry.is_empty() {
        return Err(PassVaultError::CommandFailed(
            "refusing to add an entry with no secret, site, user or note".into(),
        ));
    }
    let summary = entry.summary();

    let mut session = open_session(cli)?;
    let id = session.add(entry);
    session.save()?;

    crate::audit::log_audit(cli, "add", summary.as_deref(), None);
    output::success(&format!(
        "Entry {} added ({} total)",
        output::short_id(&id),
        session.len()
    ));
    if generate {
        output::tip(&format!("Run `passvault show {}` to see the generated secret.", output::short_id(&id)));
    }

    Ok(())
}
