//! Persisting a vault: entries -> JSON array -> sealed container -> disk.
//!
//! `VaultStore` wraps the container codec so the rest of the crate can
//! work with whole entry sequences.  Saving is atomic (temp file +
//! rename); loading treats a missing or zero-length file as an empty
//! vault.

use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use zeroize::Zeroize;

use super::entry::VaultEntry;
use crate::crypto::{Argon2Params, VaultCodec};
use crate::errors::{PassVaultError, Result};

/// Reads and writes encrypted entry sequences.
#[derive(Debug, Clone, Copy, Default)]
pub struct VaultStore {
    codec: VaultCodec,
}

impl VaultStore {
    /// New containers are sealed with `params`; existing ones open with
    /// whatever params they were written with.
    pub fn new(params: Argon2Params) -> Self {
        Self {
            codec: VaultCodec::new(params),
        }
    }

    // ------------------------------------------------------------------
    // In-memory encoding
    // ------------------------------------------------------------------

    /// Serialize `entries` in order and seal them under `passphrase`.
    pub fn encode(&self, entries: &[VaultEntry], passphrase: &[u8]) -> Result<Vec<u8>> {
        let mut json = serde_json::to_vec(entries)
            .map_err(|e| PassVaultError::SerializationError(format!("entries: {e}")))?;
        let sealed = self.codec.encrypt(&json, passphrase);
        json.zeroize();
        sealed
    }

    /// Open a sealed container and parse the entry array.
    ///
    /// An empty input is an empty vault, not an error.
    pub fn decode(&self, bytes: &[u8], passphrase: &[u8]) -> Result<Vec<VaultEntry>> {
        if bytes.is_empty() {
            return Ok(Vec::new());
        }

        let mut plaintext = self.codec.decrypt(bytes, passphrase)?;
        let parsed = serde_json::from_slice::<Vec<VaultEntry>>(&plaintext);
        plaintext.zeroize();

        parsed.map_err(|e| {
            warn!("vault decrypted but its payload did not parse");
            PassVaultError::CorruptVault(format!("entry array: {e}"))
        })
    }

    // ------------------------------------------------------------------
    // Files
    // ------------------------------------------------------------------

    /// Write `entries` to `path` **atomically**.
    ///
    /// 1. Serialize and seal the entries.
    /// 2. Write to a temp file in the same directory and fsync it.
    /// 3. Rename the temp file over the target path.
    ///
    /// If any step fails the previous file at `path` is left untouched
    /// and the temp file is removed.
    pub fn save(&self, entries: &[VaultEntry], path: &Path, passphrase: &[u8]) -> Result<()> {
        let container = self.encode(entries, passphrase)?;

        let tmp_path = temp_path_for(path);
        if let Err(e) = write_synced(&tmp_path, &container) {
            let _ = fs::remove_file(&tmp_path);
            return Err(e.into());
        }
        if let Err(e) = fs::rename(&tmp_path, path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(e.into());
        }

        debug!(path = %path.display(), entries = entries.len(), "saved vault");
        Ok(())
    }

    /// Read and decode the vault at `path`.
    ///
    /// A missing or zero-length file yields an empty vault (first run).
    /// Any other read failure, such as a permission error, is `Io`.
    pub fn load(&self, path: &Path, passphrase: &[u8]) -> Result<Vec<VaultEntry>> {
        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "no vault file yet");
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };
        let entries = self.decode(&bytes, passphrase)?;
        debug!(path = %path.display(), entries = entries.len(), "loaded vault");
        Ok(entries)
    }
}

/// `dir/vault.bin` -> `dir/.vault.bin.tmp`.  Same directory so the
/// rename never crosses filesystems.
fn temp_path_for(path: &Path) -> PathBuf {
    let parent = path.parent().unwrap_or(Path::new("."));
    parent.join(format!(
        ".{}.tmp",
        path.file_name().unwrap_or_default().to_string_lossy()
    ))
}

fn write_synced(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut file = File::create(path)?;

    // On Unix, restrict permissions to owner-only read/write.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        file.set_permissions(fs::Permissions::from_mode(0o600))?;
    }

    file.write_all(bytes)?;
    file.sync_all()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store() -> VaultStore {
        VaultStore::new(Argon2Params::FAST_INSECURE)
    }

    #[test]
    fn temp_path_is_hidden_sibling() {
        let tmp = temp_path_for(Path::new("/data/vault.bin"));
        assert_eq!(tmp, PathBuf::from("/data/.vault.bin.tmp"));
    }

    #[test]
    fn decode_empty_bytes_is_empty_vault() {
        assert!(store().decode(&[], b"pw").unwrap().is_empty());
    }

    #[test]
    fn non_array_payload_is_corrupt_not_wrong_passphrase() {
        let codec = VaultCodec::new(Argon2Params::FAST_INSECURE);
        let container = codec.encrypt(br#"{"not":"an array"}"#, b"pw").unwrap();
        assert!(matches!(
            store().decode(&container, b"pw"),
            Err(PassVaultError::CorruptVault(_))
        ));
    }

    #[test]
    fn save_leaves_no_temp_file_behind() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("vault.bin");
        store()
            .save(&[VaultEntry::new("pw", "site", "", "")], &path, b"pw")
            .unwrap();

        assert!(path.exists());
        assert!(!temp_path_for(&path).exists());
    }

    #[test]
    fn failed_save_keeps_previous_vault() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("vault.bin");
        let original = vec![VaultEntry::new("pw", "site", "", "")];
        store().save(&original, &path, b"pw").unwrap();

        // A directory squatting on the temp path makes the write fail.
        fs::create_dir(temp_path_for(&path)).unwrap();
        let result = store().save(&[VaultEntry::new("other", "", "", "")], &path, b"pw");
        assert!(matches!(result, Err(PassVaultError::Io(_))));

        assert_eq!(store().load(&path, b"pw").unwrap(), original);
    }

    #[cfg(unix)]
    #[test]
    fn saved_vault_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("vault.bin");
        store().save(&[], &path, b"pw").unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
