//! Vault module: the credential model and its encrypted persistence.
//!
//! This module provides:
//! - The `VaultEntry` record (`entry`)
//! - `VaultStore` for sealing entry sequences to and from disk (`store`)
//! - Content-based backup merging (`merge`)
//! - `VaultSession`, the open in-memory vault (`session`)

pub mod entry;
pub mod merge;
pub mod session;
pub mod store;

// Re-export the most commonly used items.
pub use entry::{EntryUpdate, VaultEntry};
pub use merge::{merge, MergeOutcome, VaultMerger};
pub use session::{ImportReport, VaultSession};
pub use store::VaultStore;
