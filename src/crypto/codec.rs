//! Passphrase-keyed vault container.
//!
//! The whole serialized vault is sealed as one unit.  A container has
//! this layout:
//!
//! ```text
//! [PVLT: 4][version: 1][m_kib: u32 LE][t: u32 LE][p: u32 LE][salt: 16][nonce: 12][ciphertext + tag: 16]
//! ```
//!
//! The header (everything before the nonce) is authenticated as AES-GCM
//! associated data, so the stored KDF parameters and salt cannot be
//! swapped without failing decryption.

use tracing::debug;
use zeroize::Zeroize;

use super::encryption::{self, NONCE_LEN, TAG_LEN};
use super::kdf::{derive_master_key, generate_salt, Argon2Params, SALT_LEN};
use super::keys::MasterKey;
use crate::errors::{PassVaultError, Result};

/// Magic bytes at the start of every container.
const MAGIC: &[u8; 4] = b"PVLT";

/// Current container format version.
pub const CURRENT_VERSION: u8 = 1;

/// Magic + version + three u32 KDF params + salt.
pub const HEADER_LEN: usize = 4 + 1 + 12 + SALT_LEN;

/// Smallest byte count a well-formed container can have.
pub const MIN_CONTAINER_LEN: usize = HEADER_LEN + NONCE_LEN + TAG_LEN;

/// Single-shot authenticated encryption of a whole payload under a
/// passphrase.
#[derive(Debug, Clone, Copy, Default)]
pub struct VaultCodec {
    params: Argon2Params,
}

impl VaultCodec {
    /// Build a codec that seals new containers with `params`.
    ///
    /// Decryption always uses the parameters stored in the container.
    pub fn new(params: Argon2Params) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &Argon2Params {
        &self.params
    }

    /// Seal `plaintext` under `passphrase` into a fresh container.
    ///
    /// A new salt and nonce are drawn on every call.
    pub fn encrypt(&self, plaintext: &[u8], passphrase: &[u8]) -> Result<Vec<u8>> {
        self.params.validate()?;

        let salt = generate_salt();
        let header = encode_header(&self.params, &salt);

        let mut vault_key = vault_key(passphrase, &salt, &self.params)?;
        let sealed = encryption::encrypt(&vault_key, plaintext, &header);
        vault_key.zeroize();
        let sealed = sealed?;

        let mut out = Vec::with_capacity(HEADER_LEN + sealed.len());
        out.extend_from_slice(&header);
        out.extend_from_slice(&sealed);

        debug!(
            plaintext_len = plaintext.len(),
            container_len = out.len(),
            "sealed vault container"
        );
        Ok(out)
    }

    /// Open a container produced by `encrypt`.
    ///
    /// Every failure (malformed header, unsupported version, KDF params
    /// out of bounds, authentication failure) is `WrongPassphrase`.
    pub fn decrypt(&self, container: &[u8], passphrase: &[u8]) -> Result<Vec<u8>> {
        if container.len() < MIN_CONTAINER_LEN {
            debug!(len = container.len(), "container too short");
            return Err(PassVaultError::WrongPassphrase);
        }

        let (header, sealed) = container.split_at(HEADER_LEN);
        let (params, salt) = decode_header(header).ok_or(PassVaultError::WrongPassphrase)?;
        if params.validate().is_err() {
            debug!(?params, "container carries out-of-bounds KDF params");
            return Err(PassVaultError::WrongPassphrase);
        }

        let mut vault_key = vault_key(passphrase, salt, &params).map_err(|e| {
            debug!(error = %e, "key derivation failed while opening container");
            PassVaultError::WrongPassphrase
        })?;
        let plaintext = encryption::decrypt(&vault_key, sealed, header);
        vault_key.zeroize();
        plaintext
    }
}

/// Passphrase -> Argon2id master key -> HKDF vault key.
fn vault_key(passphrase: &[u8], salt: &[u8], params: &Argon2Params) -> Result<[u8; 32]> {
    let mut master_bytes = derive_master_key(passphrase, salt, params)?;
    let master = MasterKey::new(master_bytes);
    master_bytes.zeroize();
    master.derive_vault_key()
}

fn encode_header(params: &Argon2Params, salt: &[u8; SALT_LEN]) -> [u8; HEADER_LEN] {
    let mut header = [0u8; HEADER_LEN];
    header[0..4].copy_from_slice(MAGIC);
    header[4] = CURRENT_VERSION;
    header[5..9].copy_from_slice(&params.memory_kib.to_le_bytes());
    header[9..13].copy_from_slice(&params.iterations.to_le_bytes());
    header[13..17].copy_from_slice(&params.parallelism.to_le_bytes());
    header[17..].copy_from_slice(salt);
    header
}

fn decode_header(header: &[u8]) -> Option<(Argon2Params, &[u8])> {
    if header.len() != HEADER_LEN || &header[0..4] != MAGIC || header[4] != CURRENT_VERSION {
        return None;
    }
    let read_u32 = |at: usize| -> Option<u32> {
        header
            .get(at..at + 4)
            .and_then(|b| b.try_into().ok())
            .map(u32::from_le_bytes)
    };
    let params = Argon2Params {
        memory_kib: read_u32(5)?,
        iterations: read_u32(9)?,
        parallelism: read_u32(13)?,
    };
    Some((params, &header[17..]))
}
