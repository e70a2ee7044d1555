//! `passvault passwd`: change the vault passphrase.
//!
//! The vault is re-sealed under a fresh salt and nonce; the entries
//! themselves are untouched.

use crate::cli::output;
use crate::cli::{open_session, prompt_new_passphrase, Cli};
use crate::errors::Result;

/// Environment variable read before prompting for the new passphrase.
pub const NEW_PASSPHRASE_ENV: &str = "PASSVAULT_NEW_PASSPHRASE";

/// Execute the `passwd` command.
pub fn execute(cli: &Cli) -> Result<()> {
    output::info("Enter your current vault passphrase.");
    let mut session = open_session(cli)?;

    output::info("Choose your new vault passphrase.");
    let new_passphrase = prompt_new_passphrase(NEW_PASSPHRASE_ENV)?;
    session.change_passphrase(&new_passphrase)?;

    crate::audit::log_audit(
        cli,
        "passwd",
        None,
        Some(&format!("{} entries re-sealed", session.len())),
    );
    output::success(&format!(
        "Passphrase changed ({} entries re-sealed)",
        session.len()
    ));

    Ok(())
}
