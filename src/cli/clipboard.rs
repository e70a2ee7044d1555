//! System clipboard access.

use crate::errors::{PassVaultError, Result};

/// Put `text` on the system clipboard.
pub fn copy(text: &str) -> Result<()> {
    let mut clipboard = arboard::Clipboard::new()
        .map_err(|e| PassVaultError::ClipboardError(format!("clipboard unavailable: {e}")))?;
    clipboard
        .set_text(text.to_owned())
        .map_err(|e| PassVaultError::ClipboardError(format!("copy failed: {e}")))
}
