//! CLI module: Clap argument parser, prompts, output helpers, and command implementations.

pub mod clipboard;
pub mod commands;
pub mod output;

use std::path::PathBuf;

use clap::Parser;
use zeroize::Zeroizing;

use crate::config::Settings;
use crate::errors::{PassVaultError, Result};
use crate::generator::CharClass;
use crate::vault::VaultSession;

/// Minimum passphrase length to prevent trivially weak vaults.
const MIN_PASSPHRASE_LEN: usize = 8;

/// Environment variable read before prompting for the vault passphrase.
pub const PASSPHRASE_ENV: &str = "PASSVAULT_PASSPHRASE";

/// Environment variable read before prompting for a backup's passphrase.
pub const BACKUP_PASSPHRASE_ENV: &str = "PASSVAULT_BACKUP_PASSPHRASE";

/// PassVault CLI: encrypted local password vault.
#[derive(Parser)]
#[command(
    name = "passvault",
    about = "Encrypted local password vault",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Vault directory (default: from .passvault.toml, else .passvault)
    #[arg(long, global = true, env = "PASSVAULT_DIR")]
    pub vault_dir: Option<String>,
}

/// All available subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Create a new, empty vault
    Init,

    /// Add a credential (secret is prompted unless --generate or piped)
    Add {
        /// Site or service the credential belongs to
        #[arg(long, default_value = "")]
        site: String,
        /// User name or e-mail
        #[arg(long, default_value = "")]
        user: String,
        /// Free-form note
        #[arg(long, default_value = "")]
        note: String,
        /// Generate the secret with the configured generator defaults
        #[arg(short, long)]
        generate: bool,
    },

    /// List credentials (secrets are never shown)
    List {
        /// Only show entries containing this text (case-insensitive)
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Print a credential's secret
    Show {
        /// Entry id or unique id prefix
        id: String,
        /// Copy the secret to the clipboard instead of printing it
        #[arg(long)]
        copy: bool,
    },

    /// Change fields of a credential
    Edit {
        /// Entry id or unique id prefix
        id: String,
        /// New site
        #[arg(long)]
        site: Option<String>,
        /// New user
        #[arg(long)]
        user: Option<String>,
        /// New note
        #[arg(long)]
        note: Option<String>,
        /// Prompt for a new secret
        #[arg(long)]
        secret: bool,
    },

    /// Delete a credential
    Delete {
        /// Entry id or unique id prefix
        id: String,
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// Merge a backup file into the vault (duplicates are skipped)
    Import {
        /// Path to the backup file
        file: String,
    },

    /// Write a timestamped backup of the vault into a directory
    Backup {
        /// Target directory (default: current directory)
        dir: Option<String>,
    },

    /// Change the vault passphrase
    Passwd,

    /// Generate a random password
    Generate {
        /// Minimum length
        #[arg(long)]
        low: Option<usize>,
        /// Maximum length
        #[arg(long)]
        high: Option<usize>,
        /// Exact length (same as --low N --high N)
        #[arg(short, long, conflicts_with_all = ["low", "high"])]
        length: Option<usize>,
        /// Character classes to use (repeatable)
        #[arg(short, long = "class", value_enum)]
        classes: Vec<CharClass>,
        /// Seed for a reproducible password
        #[arg(long)]
        seed: Option<u64>,
        /// Seed the generator from 16 typed characters
        #[arg(long, conflicts_with = "seed")]
        real_random: bool,
        /// Copy the password to the clipboard instead of printing it
        #[arg(long)]
        copy: bool,
        /// Store the password in the vault as a new entry
        #[arg(long)]
        save: bool,
        /// Site for the saved entry
        #[arg(long, requires = "save", default_value = "")]
        site: String,
        /// User for the saved entry
        #[arg(long, requires = "save", default_value = "")]
        user: String,
        /// Note for the saved entry
        #[arg(long, requires = "save", default_value = "")]
        note: String,
    },

    /// View the audit log of vault operations
    Audit {
        /// Number of entries to show (default: 50)
        #[arg(long, default_value = "50")]
        last: usize,
        /// Show entries since a duration ago (e.g. 7d, 24h, 30m)
        #[arg(long)]
        since: Option<String>,
    },

    /// Generate shell completion scripts
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

// ---------------------------------------------------------------------------
// Shared helpers used by multiple commands
// ---------------------------------------------------------------------------

/// Load `.passvault.toml` from the working directory.
pub fn settings() -> Result<Settings> {
    let cwd = std::env::current_dir()?;
    Settings::load(&cwd)
}

/// Build the full path to the vault file from settings and CLI flags.
///
/// Example: `<cwd>/.passvault/vault.bin`
pub fn vault_path(cli: &Cli) -> Result<PathBuf> {
    let cwd = std::env::current_dir()?;
    let settings = Settings::load(&cwd)?;
    Ok(settings.vault_path(&cwd, cli.vault_dir.as_deref()))
}

/// Prompt for the vault passphrase and open the vault.
///
/// Fails if there is no vault yet; `init` creates one.
pub fn open_session(cli: &Cli) -> Result<VaultSession> {
    let path = vault_path(cli)?;
    if !path.exists() {
        output::tip("Run `passvault init` to create a vault.");
        return Err(PassVaultError::CommandFailed(format!(
            "no vault at {}",
            path.display()
        )));
    }

    let settings = settings()?;
    let passphrase = prompt_passphrase()?;
    VaultSession::open(&path, &passphrase, settings.argon2_params())
}

/// Get the vault passphrase, trying in order:
/// 1. `PASSVAULT_PASSPHRASE` env var (scripts/CI)
/// 2. Interactive prompt
///
/// Returns `Zeroizing<String>` so the passphrase is wiped from memory on drop.
pub fn prompt_passphrase() -> Result<Zeroizing<String>> {
    prompt_from_env_or_tty(PASSPHRASE_ENV, "Enter vault passphrase")
}

/// Get the passphrase a backup file was sealed with.
pub fn prompt_backup_passphrase() -> Result<Zeroizing<String>> {
    prompt_from_env_or_tty(BACKUP_PASSPHRASE_ENV, "Enter backup passphrase")
}

fn prompt_from_env_or_tty(var: &str, prompt: &str) -> Result<Zeroizing<String>> {
    if let Ok(pw) = std::env::var(var) {
        if !pw.is_empty() {
            return Ok(Zeroizing::new(pw));
        }
    }

    let pw = dialoguer::Password::new()
        .with_prompt(prompt)
        .interact()
        .map_err(|e| PassVaultError::CommandFailed(format!("passphrase prompt: {e}")))?;
    Ok(Zeroizing::new(pw))
}

/// Prompt for a new passphrase with confirmation (`init`, `passwd`).
///
/// `env_var` is checked first for scripted use.  Enforces a minimum length.
pub fn prompt_new_passphrase(env_var: &str) -> Result<Zeroizing<String>> {
    if let Ok(pw) = std::env::var(env_var) {
        if !pw.is_empty() {
            validate_new_passphrase(&pw)?;
            return Ok(Zeroizing::new(pw));
        }
    }

    loop {
        let passphrase = dialoguer::Password::new()
            .with_prompt("Choose vault passphrase")
            .with_confirmation(
                "Confirm vault passphrase",
                "Passphrases do not match, try again",
            )
            .interact()
            .map_err(|e| PassVaultError::CommandFailed(format!("passphrase prompt: {e}")))?;

        if let Err(e) = validate_new_passphrase(&passphrase) {
            output::warning(&format!("{e}. Try again."));
            continue;
        }

        return Ok(Zeroizing::new(passphrase));
    }
}

/// Reject passphrases shorter than the minimum length.
pub fn validate_new_passphrase(passphrase: &str) -> Result<()> {
    if passphrase.chars().count() < MIN_PASSPHRASE_LEN {
        return Err(PassVaultError::CommandFailed(format!(
            "passphrase must be at least {MIN_PASSPHRASE_LEN} characters"
        )));
    }
    Ok(())
}
