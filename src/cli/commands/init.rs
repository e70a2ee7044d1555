//! `passvault init`: create a new, empty vault.

use std::fs;

use crate::cli::output;
use crate::cli::{prompt_new_passphrase, settings, vault_path, Cli, PASSPHRASE_ENV};
use crate::errors::{PassVaultError, Result};
use crate::vault::VaultSession;

/// Execute the `init` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let path = vault_path(cli)?;

    // 1. Create the vault directory if it doesn't exist.
    if let Some(dir) = path.parent() {
        if !dir.exists() {
            fs::create_dir_all(dir)?;
            output::info(&format!("Created vault directory: {}", dir.display()));
        }
    }

    // 2. Refuse to clobber an existing vault.
    if path.metadata().is_ok_and(|m| m.len() > 0) {
        output::tip("Use `passvault add` to add credentials to the existing vault.");
        return Err(PassVaultError::VaultAlreadyExists(path));
    }

    // 3. Choose a passphrase and write the empty vault.
    let passphrase = prompt_new_passphrase(PASSPHRASE_ENV)?;
    let settings = settings()?;
    let session = VaultSession::create(&path, &passphrase, settings.argon2_params())?;
    session.close();

    crate::audit::log_audit(cli, "init", None, Some("vault created"));

    output::success(&format!("Vault created at {}", path.display()));
    output::tip("Run `passvault add --site <SITE>` to store a credential.");
    output::tip("Run `passvault generate` to create a strong password.");

    Ok(())
}
