//! Cryptographic primitives for PassVault.
//!
//! This module provides:
//! - AES-256-GCM encryption and decryption (`encryption`)
//! - Argon2id passphrase-based key derivation (`kdf`)
//! - HKDF vault key derivation and the zeroizing `MasterKey` (`keys`)
//! - The passphrase-keyed vault container (`codec`)

pub mod codec;
pub mod encryption;
pub mod kdf;
pub mod keys;

pub use codec::VaultCodec;
pub use encryption::{decrypt, encrypt};
pub use kdf::{derive_master_key, generate_salt, Argon2Params};
pub use keys::{derive_vault_key, MasterKey};
