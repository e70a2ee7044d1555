//! `passvault import`: merge a backup file into the vault.
//!
//! The backup may be sealed with a different passphrase than the vault;
//! it is read from `PASSVAULT_BACKUP_PASSPHRASE` or prompted for.
//! Entries whose secret, site, user and note all match an existing
//! entry are skipped.

use std::path::Path;

use crate::cli::output;
use crate::cli::{open_session, prompt_backup_passphrase, Cli};
use crate::errors::{PassVaultError, Result};

/// Execute the `import` command.
pub fn execute(cli: &Cli, file: &str) -> Result<()> {
    let backup = Path::new(file);
    if !backup.is_file() {
        return Err(PassVaultError::CommandFailed(format!(
            "backup file not found: {}",
            backup.display()
        )));
    }

    let mut session = open_session(cli)?;
    let backup_passphrase = prompt_backup_passphrase()?;
    let report = session.import_backup(backup, &backup_passphrase)?;

    crate::audit::log_audit(
        cli,
        "import",
        None,
        Some(&format!(
            "{} added, {} duplicates from {}",
            report.added,
            report.duplicates,
            backup.display()
        )),
    );

    output::success(&format!(
        "Imported {} entries from {} ({} duplicates skipped)",
        report.added,
        backup.display(),
        report.duplicates
    ));

    Ok(())
}
