//! The unlocked, in-memory vault.
//!
//! A `VaultSession` owns the vault path, the passphrase and the entry
//! sequence for as long as the vault is open.  Edits happen in memory;
//! nothing reaches disk until `save` (or an operation documented as
//! persisting) is called.  One session per vault: the type is not
//! `Sync`-shared anywhere in the crate and callers must not open the
//! same file twice concurrently.

use std::path::{Path, PathBuf};

use chrono::Local;
use tracing::{debug, info};
use zeroize::Zeroizing;

use super::entry::{EntryUpdate, VaultEntry};
use super::merge::VaultMerger;
use super::store::VaultStore;
use crate::crypto::Argon2Params;
use crate::errors::{PassVaultError, Result};

/// Counts reported after merging a backup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportReport {
    pub added: usize,
    pub duplicates: usize,
}

/// An open vault.
pub struct VaultSession {
    path: PathBuf,
    passphrase: Zeroizing<String>,
    store: VaultStore,
    entries: Vec<VaultEntry>,
}

impl std::fmt::Debug for VaultSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VaultSession")
            .field("path", &self.path)
            .field("passphrase", &"<redacted>")
            .field("store", &self.store)
            .field("entries", &self.entries.len())
            .finish()
    }
}

impl VaultSession {
    // ------------------------------------------------------------------
    // Construction
    // ------------------------------------------------------------------

    /// Open the vault at `path`.
    ///
    /// A missing or empty file opens as an empty vault.  A wrong
    /// passphrase fails with `WrongPassphrase`, an undecodable payload
    /// with `CorruptVault`.
    pub fn open(path: &Path, passphrase: &str, params: Argon2Params) -> Result<Self> {
        let store = VaultStore::new(params);
        let entries = store.load(path, passphrase.as_bytes())?;

        Ok(Self {
            path: path.to_path_buf(),
            passphrase: Zeroizing::new(passphrase.to_owned()),
            store,
            entries,
        })
    }

    /// Create a brand-new, empty vault file at `path`.
    ///
    /// Fails if a non-empty vault already exists there.
    pub fn create(path: &Path, passphrase: &str, params: Argon2Params) -> Result<Self> {
        if path.metadata().is_ok_and(|m| m.len() > 0) {
            return Err(PassVaultError::VaultAlreadyExists(path.to_path_buf()));
        }

        let session = Self {
            path: path.to_path_buf(),
            passphrase: Zeroizing::new(passphrase.to_owned()),
            store: VaultStore::new(params),
            entries: Vec::new(),
        };
        session.save()?;
        info!(path = %path.display(), "created vault");
        Ok(session)
    }

    // ------------------------------------------------------------------
    // Reading
    // ------------------------------------------------------------------

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn entries(&self) -> &[VaultEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up an entry by its exact id.
    pub fn get(&self, id: &str) -> Option<&VaultEntry> {
        self.entries.iter().find(|e| e.id() == id)
    }

    /// Look up an entry by exact id or unique id prefix.
    pub fn find(&self, id_prefix: &str) -> Result<&VaultEntry> {
        let index = self.position(id_prefix)?;
        Ok(&self.entries[index])
    }

    /// All entries whose text fields contain `keyword` (case-insensitive),
    /// in vault order.
    pub fn search(&self, keyword: &str) -> Vec<&VaultEntry> {
        self.entries.iter().filter(|e| e.matches(keyword)).collect()
    }

    // ------------------------------------------------------------------
    // Editing (in memory)
    // ------------------------------------------------------------------

    /// Append an entry and return its id.
    pub fn add(&mut self, entry: VaultEntry) -> String {
        let id = entry.id().to_string();
        debug!("{}", entry.describe("Added entry"));
        self.entries.push(entry);
        id
    }

    /// Apply `update` to the entry matching `id_prefix`.
    pub fn update(&mut self, id_prefix: &str, update: EntryUpdate) -> Result<&VaultEntry> {
        let index = self.position(id_prefix)?;
        let entry = &mut self.entries[index];
        if entry.apply(update) {
            debug!("{}", entry.describe("Edited entry"));
        }
        Ok(&self.entries[index])
    }

    /// Blank the text fields of the entry matching `id_prefix`, keeping
    /// it in the vault until `purge_empty` runs.
    pub fn clear(&mut self, id_prefix: &str) -> Result<()> {
        let index = self.position(id_prefix)?;
        self.entries[index].clear();
        Ok(())
    }

    /// Physically remove every empty entry.  Returns how many were removed.
    pub fn purge_empty(&mut self) -> usize {
        let before = self.entries.len();
        self.entries.retain(|e| !e.is_empty());
        before - self.entries.len()
    }

    /// Clear and then drop the entry matching `id_prefix`.  Other
    /// entries, empty or not, stay where they are.
    ///
    /// Returns the entry as it was before clearing.
    pub fn remove(&mut self, id_prefix: &str) -> Result<VaultEntry> {
        let index = self.position(id_prefix)?;
        let removed = self.entries[index].clone();
        self.entries[index].clear();
        self.entries.remove(index);
        debug!("{}", removed.describe("Deleted entry"));
        Ok(removed)
    }

    // ------------------------------------------------------------------
    // Persistence
    // ------------------------------------------------------------------

    /// Encrypt the entries under the session passphrase and replace the
    /// vault file atomically.
    pub fn save(&self) -> Result<()> {
        self.store
            .save(&self.entries, &self.path, self.passphrase.as_bytes())
    }

    /// Merge the backup at `backup_path` into this vault and save.
    ///
    /// The backup may use a different passphrase than the live vault.
    /// If the backup cannot be decoded, or the merged vault cannot be
    /// written, neither the session nor the vault file is modified.
    pub fn import_backup(&mut self, backup_path: &Path, backup_passphrase: &str) -> Result<ImportReport> {
        let merger = VaultMerger::new(self.store);
        let outcome =
            merger.merge_backup(&self.entries, backup_path, backup_passphrase.as_bytes())?;

        self.store
            .save(&outcome.entries, &self.path, self.passphrase.as_bytes())?;
        self.entries = outcome.entries;

        info!(
            backup = %backup_path.display(),
            added = outcome.added,
            "imported backup"
        );
        Ok(ImportReport {
            added: outcome.added,
            duplicates: outcome.duplicates,
        })
    }

    /// Write a copy of the vault into `dir` as
    /// `PassVault_<dd_MM_yyyy_HH_mm_ss>.bin`, sealed with the session
    /// passphrase.
    pub fn export_backup(&self, dir: &Path) -> Result<PathBuf> {
        if self.entries.is_empty() {
            return Err(PassVaultError::EmptyVault);
        }

        let name = format!("PassVault_{}.bin", Local::now().format("%d_%m_%Y_%H_%M_%S"));
        let target = dir.join(name);
        if target.exists() {
            return Err(PassVaultError::BackupExists(target));
        }

        self.store
            .save(&self.entries, &target, self.passphrase.as_bytes())?;
        info!(backup = %target.display(), entries = self.entries.len(), "exported backup");
        Ok(target)
    }

    /// Re-encrypt the vault under `new_passphrase` (with a fresh salt).
    ///
    /// The session keeps the old passphrase if the write fails.
    pub fn change_passphrase(&mut self, new_passphrase: &str) -> Result<()> {
        self.store
            .save(&self.entries, &self.path, new_passphrase.as_bytes())?;
        self.passphrase = Zeroizing::new(new_passphrase.to_owned());
        info!(path = %self.path.display(), "vault passphrase changed");
        Ok(())
    }

    /// End the session.  The passphrase is wiped when `self` drops.
    pub fn close(self) {
        debug!(path = %self.path.display(), "closed vault session");
    }

    // ------------------------------------------------------------------
    // Helpers
    // ------------------------------------------------------------------

    fn position(&self, id_prefix: &str) -> Result<usize> {
        if let Some(index) = self.entries.iter().position(|e| e.id() == id_prefix) {
            return Ok(index);
        }
        if id_prefix.is_empty() {
            return Err(PassVaultError::EntryNotFound(id_prefix.to_string()));
        }

        let mut hits = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.id().starts_with(id_prefix))
            .map(|(i, _)| i);

        match (hits.next(), hits.next()) {
            (Some(index), None) => Ok(index),
            (Some(_), Some(_)) => Err(PassVaultError::AmbiguousEntryId(id_prefix.to_string())),
            (None, _) => Err(PassVaultError::EntryNotFound(id_prefix.to_string())),
        }
    }
}
