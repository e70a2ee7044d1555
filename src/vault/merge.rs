//! Merging a backup vault into the live one.
//!
//! Entries are deduplicated by content (secret, site, user, note); ids
//! and timestamps play no part, so the same credential exported from
//! two different vaults is only kept once.

use std::path::Path;

use tracing::debug;

use super::entry::VaultEntry;
use super::store::VaultStore;
use crate::errors::Result;

/// Append every entry of `incoming` that has no content-equal match in
/// `current`, keeping `incoming`'s relative order.
///
/// Matching is done against `current` only: two content-equal entries
/// that are both new are both appended.
pub fn merge(current: Vec<VaultEntry>, incoming: Vec<VaultEntry>) -> Vec<VaultEntry> {
    let fresh: Vec<VaultEntry> = incoming
        .into_iter()
        .filter(|candidate| !current.iter().any(|e| e.same_credential(candidate)))
        .collect();

    let mut merged = current;
    merged.extend(fresh);
    merged
}

/// Result of importing a backup.
#[derive(Debug)]
pub struct MergeOutcome {
    pub entries: Vec<VaultEntry>,
    /// Entries taken from the backup.
    pub added: usize,
    /// Backup entries dropped as duplicates.
    pub duplicates: usize,
}

/// Decodes backup files and merges them into an entry sequence.
#[derive(Debug, Clone, Copy, Default)]
pub struct VaultMerger {
    store: VaultStore,
}

impl VaultMerger {
    pub fn new(store: VaultStore) -> Self {
        Self { store }
    }

    /// Decode the backup at `backup_path` under `backup_passphrase` and
    /// merge it into `current`.
    ///
    /// `current` is borrowed: if decoding fails nothing has been
    /// changed and the error (`WrongPassphrase`, `CorruptVault`, IO) is
    /// returned as-is.
    pub fn merge_backup(
        &self,
        current: &[VaultEntry],
        backup_path: &Path,
        backup_passphrase: &[u8],
    ) -> Result<MergeOutcome> {
        let incoming = self.store.load(backup_path, backup_passphrase)?;
        let incoming_len = incoming.len();

        let entries = merge(current.to_vec(), incoming);
        let added = entries.len() - current.len();
        debug!(
            backup = %backup_path.display(),
            added,
            duplicates = incoming_len - added,
            "merged backup"
        );

        Ok(MergeOutcome {
            entries,
            added,
            duplicates: incoming_len - added,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_into_empty_takes_everything() {
        let incoming = vec![VaultEntry::new("a", "", "", ""), VaultEntry::new("b", "", "", "")];
        let merged = merge(Vec::new(), incoming.clone());
        assert_eq!(merged, incoming);
    }

    #[test]
    fn merge_empty_incoming_is_noop() {
        let current = vec![VaultEntry::new("a", "", "", "")];
        assert_eq!(merge(current.clone(), Vec::new()), current);
    }

    #[test]
    fn duplicates_within_incoming_are_both_kept_when_new() {
        let one = VaultEntry::new("x", "site", "", "");
        let two = VaultEntry::new("x", "site", "", "");
        let merged = merge(Vec::new(), vec![one, two]);
        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn one_field_difference_is_not_a_duplicate() {
        let current = vec![VaultEntry::new("pw", "site", "user", "note")];
        let incoming = vec![VaultEntry::new("pw", "site", "user", "other note")];
        assert_eq!(merge(current, incoming).len(), 2);
    }
}
