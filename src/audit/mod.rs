//! Audit log: SQLite-based operation history.
//!
//! Stores a record of every vault operation (add, delete, import, etc.)
//! in a local SQLite database at `<vault_dir>/audit.db`.  Entries are
//! identified by their description (site, user, note) and never carry
//! the secret.
//!
//! Designed for graceful degradation: if the database can't be opened or
//! written to, operations silently continue without logging.  Built only
//! with the `audit-log` feature; without it `log_audit` is a no-op.

use crate::cli::Cli;

#[cfg(feature = "audit-log")]
mod sqlite {
    use std::path::{Path, PathBuf};

    use chrono::{DateTime, Utc};
    use rusqlite::Connection;

    use crate::errors::{PassVaultError, Result};

    /// A single audit log entry.
    #[derive(Debug, Clone)]
    pub struct AuditEntry {
        pub id: i64,
        pub timestamp: DateTime<Utc>,
        pub operation: String,
        pub vault: String,
        pub entry: Option<String>,
        pub details: Option<String>,
    }

    /// SQLite-backed audit log.
    pub struct AuditLog {
        conn: Connection,
    }

    impl AuditLog {
        /// Open (or create) the audit database at `<vault_dir>/audit.db`.
        ///
        /// Returns `None` if the database can't be opened; callers should
        /// treat this as "audit logging unavailable" and continue normally.
        pub fn open(vault_dir: &Path) -> Option<Self> {
            let db_path = Self::db_path(vault_dir);
            let conn = Connection::open(&db_path).ok()?;

            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                let perms = std::fs::Permissions::from_mode(0o600);
                let _ = std::fs::set_permissions(&db_path, perms);
            }

            conn.execute_batch(
                "CREATE TABLE IF NOT EXISTS audit_log (
                    id          INTEGER PRIMARY KEY AUTOINCREMENT,
                    timestamp   TEXT NOT NULL,
                    operation   TEXT NOT NULL,
                    vault       TEXT NOT NULL,
                    entry       TEXT,
                    details     TEXT
                );",
            )
            .ok()?;

            Some(Self { conn })
        }

        /// Record an operation. Fire-and-forget: errors are silently ignored.
        pub fn log(&self, operation: &str, vault: &str, entry: Option<&str>, details: Option<&str>) {
            let now = Utc::now().to_rfc3339();
            let _ = self.conn.execute(
                "INSERT INTO audit_log (timestamp, operation, vault, entry, details)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                rusqlite::params![now, operation, vault, entry, details],
            );
        }

        /// Query recent audit entries, most recent first.
        ///
        /// - `limit`: maximum number of entries to return.
        /// - `since`: if provided, only return entries at or after this timestamp.
        pub fn query(&self, limit: usize, since: Option<DateTime<Utc>>) -> Result<Vec<AuditEntry>> {
            let limit_i64 = i64::try_from(limit).unwrap_or(i64::MAX);
            let since_str = since
                .map(|ts| ts.to_rfc3339())
                .unwrap_or_default();

            let mut stmt = self
                .conn
                .prepare(
                    "SELECT id, timestamp, operation, vault, entry, details
                     FROM audit_log
                     WHERE timestamp >= ?1
                     ORDER BY id DESC
                     LIMIT ?2",
                )
                .map_err(|e| PassVaultError::AuditError(format!("query prepare: {e}")))?;

            let rows = stmt
                .query_map(rusqlite::params![since_str, limit_i64], |row| {
                    let ts_str: String = row.get(1)?;
                    let timestamp = DateTime::parse_from_rfc3339(&ts_str)
                        .map_or_else(|_| Utc::now(), |dt| dt.with_timezone(&Utc));

                    Ok(AuditEntry {
                        id: row.get(0)?,
                        timestamp,
                        operation: row.get(2)?,
                        vault: row.get(3)?,
                        entry: row.get(4)?,
                        details: row.get(5)?,
                    })
                })
                .map_err(|e| PassVaultError::AuditError(format!("query exec: {e}")))?;

            let mut entries = Vec::new();
            for row in rows {
                entries.push(row.map_err(|e| PassVaultError::AuditError(format!("row parse: {e}")))?);
            }

            Ok(entries)
        }

        /// Path of the audit database inside `vault_dir`.
        pub fn db_path(vault_dir: &Path) -> PathBuf {
            vault_dir.join("audit.db")
        }
    }
}

#[cfg(feature = "audit-log")]
pub use sqlite::{AuditEntry, AuditLog};

/// Log an audit event using the CLI context.
///
/// Opens the audit database next to the vault, logs the event, and
/// silently ignores any errors.  Never fails the parent operation.
#[cfg(feature = "audit-log")]
pub fn log_audit(cli: &Cli, op: &str, entry: Option<&str>, details: Option<&str>) {
    let Ok(vault_path) = crate::cli::vault_path(cli) else {
        return;
    };
    let Some(vault_dir) = vault_path.parent() else {
        return;
    };
    let vault_name = vault_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    if let Some(audit) = AuditLog::open(vault_dir) {
        audit.log(op, &vault_name, entry, details);
    }
}

#[cfg(not(feature = "audit-log"))]
pub fn log_audit(_cli: &Cli, _op: &str, _entry: Option<&str>, _details: Option<&str>) {}
