//! Integration tests for the vault container codec.

use passvault::crypto::codec::{HEADER_LEN, MIN_CONTAINER_LEN};
use passvault::crypto::{Argon2Params, VaultCodec};
use passvault::errors::PassVaultError;

fn codec() -> VaultCodec {
    VaultCodec::new(Argon2Params::FAST_INSECURE)
}

#[test]
fn roundtrip_recovers_plaintext() {
    let sealed = codec().encrypt(b"[{\"site\":\"github\"}]", b"pw").unwrap();
    assert_eq!(
        codec().decrypt(&sealed, b"pw").unwrap(),
        b"[{\"site\":\"github\"}]"
    );
}

#[test]
fn container_starts_with_magic_and_has_expected_size() {
    let sealed = codec().encrypt(b"hello", b"pw").unwrap();
    assert_eq!(&sealed[..4], b"PVLT");
    assert_eq!(sealed[4], 1);
    assert_eq!(sealed.len(), MIN_CONTAINER_LEN + 5);
}

#[test]
fn empty_plaintext_roundtrips() {
    let sealed = codec().encrypt(b"", b"pw").unwrap();
    assert_eq!(sealed.len(), MIN_CONTAINER_LEN);
    assert!(codec().decrypt(&sealed, b"pw").unwrap().is_empty());
}

#[test]
fn same_input_gives_different_containers() {
    let a = codec().encrypt(b"same", b"pw").unwrap();
    let b = codec().encrypt(b"same", b"pw").unwrap();
    assert_ne!(a, b);
}

#[test]
fn wrong_passphrase_is_rejected() {
    let sealed = codec().encrypt(b"secret", b"right").unwrap();
    let err = codec().decrypt(&sealed, b"wrong").unwrap_err();
    assert!(matches!(err, PassVaultError::WrongPassphrase));
}

#[test]
fn tampered_header_is_rejected() {
    let mut sealed = codec().encrypt(b"secret", b"pw").unwrap();
    // Flip a salt byte: the header is authenticated.
    sealed[HEADER_LEN - 1] ^= 0x01;
    assert!(codec().decrypt(&sealed, b"pw").is_err());
}

#[test]
fn tampered_ciphertext_is_rejected() {
    let mut sealed = codec().encrypt(b"secret", b"pw").unwrap();
    let last = sealed.len() - 1;
    sealed[last] ^= 0xFF;
    let err = codec().decrypt(&sealed, b"pw").unwrap_err();
    assert!(matches!(err, PassVaultError::WrongPassphrase));
}

#[test]
fn truncated_container_is_rejected() {
    let sealed = codec().encrypt(b"secret", b"pw").unwrap();
    assert!(codec().decrypt(&sealed[..MIN_CONTAINER_LEN - 1], b"pw").is_err());
    assert!(codec().decrypt(&[], b"pw").is_err());
}

#[test]
fn decrypt_uses_params_stored_in_container() {
    let sealed = codec().encrypt(b"data", b"pw").unwrap();
    // A codec configured with different params still opens it.
    let other = VaultCodec::new(Argon2Params {
        memory_kib: 16_384,
        iterations: 2,
        parallelism: 2,
    });
    assert_eq!(other.decrypt(&sealed, b"pw").unwrap(), b"data");
}

#[test]
fn out_of_range_params_refuse_to_encrypt() {
    let weak = VaultCodec::new(Argon2Params {
        memory_kib: 1024,
        iterations: 1,
        parallelism: 1,
    });
    assert!(weak.encrypt(b"data", b"pw").is_err());
}
