//! Key derivation helpers using HKDF-SHA256.
//!
//! The Argon2id master key is never used to encrypt directly.  The
//! vault payload key is expanded from it with a fixed context string,
//! so the same master key could later feed other purposes without
//! reusing key material.

use hkdf::Hkdf;
use sha2::Sha256;
use zeroize::Zeroize;

use super::kdf::KEY_LEN;
use crate::errors::{PassVaultError, Result};

/// HKDF `info` for the key that seals the vault payload.
const VAULT_KEY_INFO: &[u8] = b"passvault-vault-key";

/// Derive the payload encryption key from the master key.
pub fn derive_vault_key(master_key: &[u8]) -> Result<[u8; KEY_LEN]> {
    hkdf_derive(master_key, VAULT_KEY_INFO)
}

/// Run HKDF-SHA256 expand with the given `info`.
///
/// No HKDF salt: the master key came out of Argon2id, which was
/// already salted per container.
fn hkdf_derive(ikm: &[u8], info: &[u8]) -> Result<[u8; KEY_LEN]> {
    let hk = Hkdf::<Sha256>::new(None, ikm);

    let mut okm = [0u8; KEY_LEN];
    hk.expand(info, &mut okm)
        .map_err(|e| PassVaultError::KeyDerivationFailed(format!("HKDF expand failed: {e}")))?;

    Ok(okm)
}

/// A 32-byte master key that zeroes its memory when dropped.
#[derive(Zeroize)]
#[zeroize(drop)]
pub struct MasterKey {
    bytes: [u8; KEY_LEN],
}

impl MasterKey {
    pub fn new(bytes: [u8; KEY_LEN]) -> Self {
        Self { bytes }
    }

    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.bytes
    }

    /// Derive the payload encryption key from this master key.
    pub fn derive_vault_key(&self) -> Result<[u8; KEY_LEN]> {
        derive_vault_key(&self.bytes)
    }
}
