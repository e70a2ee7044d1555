use std::path::PathBuf;
use thiserror::Error;

/// All errors that can occur in PassVault.
#[derive(Debug, Error)]
pub enum PassVaultError {
    // --- Crypto errors ---
    #[error("Wrong passphrase or damaged vault: decryption failed")]
    WrongPassphrase,

    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("Key derivation failed: {0}")]
    KeyDerivationFailed(String),

    // --- Vault errors ---
    #[error("Vault is corrupt: {0}")]
    CorruptVault(String),

    #[error("Vault already exists at {0}")]
    VaultAlreadyExists(PathBuf),

    #[error("Backup already exists at {0}")]
    BackupExists(PathBuf),

    #[error("Vault is empty, nothing to back up")]
    EmptyVault,

    #[error("No entry matches '{0}'")]
    EntryNotFound(String),

    #[error("Entry id '{0}' is ambiguous, type more characters")]
    AmbiguousEntryId(String),

    // --- Generator errors ---
    #[error("Password length {length} cannot cover {classes} character classes")]
    GeneratorPrecondition { length: usize, classes: usize },

    #[error("Invalid length range: low ({low}) is greater than high ({high})")]
    InvalidLengthRange { low: usize, high: usize },

    #[error("At least one character class is required")]
    NoCharClasses,

    // --- Config errors ---
    #[error("Config file error: {0}")]
    ConfigError(String),

    // --- IO errors ---
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // --- Serialization errors ---
    #[error("Serialization error: {0}")]
    SerializationError(String),

    // --- CLI errors ---
    #[error("Command failed: {0}")]
    CommandFailed(String),

    #[error("Clipboard error: {0}")]
    ClipboardError(String),

    #[error("Audit error: {0}")]
    AuditError(String),
}

/// Convenience type alias for PassVault results.
pub type Result<T> = std::result::Result<T, PassVaultError>;
