//! `passvault backup`: write a timestamped copy of the vault.
//!
//! The backup is sealed with the current vault passphrase and named
//! `PassVault_<dd_MM_yyyy_HH_mm_ss>.bin`.

use std::path::PathBuf;

use crate::cli::output;
use crate::cli::{open_session, Cli};
use crate::errors::{PassVaultError, Result};

/// Execute the `backup` command.
pub fn execute(cli: &Cli, dir: Option<&str>) -> Result<()> {
    let target = match dir {
        Some(d) => PathBuf::from(d),
        None => std::env::current_dir()?,
    };
    if !target.is_dir() {
        return Err(PassVaultError::CommandFailed(format!(
            "not a directory: {}",
            target.display()
        )));
    }

    let session = open_session(cli)?;
    let written = session.export_backup(&target)?;

    crate::audit::log_audit(
        cli,
        "backup",
        None,
        Some(&format!("{} entries to {}", session.len(), written.display())),
    );

    output::success(&format!(
        "Backed up {} entries to {}",
        session.len(),
        written.display()
    ));
    output::tip("Restore with `passvault import <FILE>`.");

    Ok(())
}
