//! Password generation.
//!
//! This module provides:
//! - `CharClass`, the fixed alphabets a password can draw from (`charset`)
//! - `PasswordGenerator`, class-constrained random passwords (`password`)
//! - `SeedMixer`, a reproducible seed from user keystrokes (`seed`)

pub mod charset;
pub mod password;
pub mod seed;

pub use charset::CharClass;
pub use password::PasswordGenerator;
pub use seed::{derive_seed, SeedMixer, SEED_INPUT_LEN};
