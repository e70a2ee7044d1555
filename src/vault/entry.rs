//! The credential record stored in a vault.
//!
//! An entry carries four free-form text fields plus an immutable id and
//! a last-modified timestamp.  Field setters bump the timestamp; the
//! id is assigned once in the constructor and never changes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One stored credential.
///
/// `PartialEq` is identity equality: all six fields, including `id` and
/// `last_modified`, must match.  Use [`VaultEntry::same_credential`] for
/// the content-only comparison that backup merging relies on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VaultEntry {
    id: String,

    #[serde(default)]
    secret: String,

    #[serde(default)]
    site: String,

    #[serde(default)]
    user: String,

    #[serde(default)]
    note: String,

    last_modified: DateTime<Utc>,
}

/// A partial edit: only the `Some` fields are applied.
#[derive(Debug, Clone, Default)]
pub struct EntryUpdate {
    pub secret: Option<String>,
    pub site: Option<String>,
    pub user: Option<String>,
    pub note: Option<String>,
}

impl EntryUpdate {
    pub fn is_noop(&self) -> bool {
        self.secret.is_none() && self.site.is_none() && self.user.is_none() && self.note.is_none()
    }
}

impl VaultEntry {
    /// Create a new entry with a fresh random id.
    pub fn new(
        secret: impl Into<String>,
        site: impl Into<String>,
        user: impl Into<String>,
        note: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            secret: secret.into(),
            site: site.into(),
            user: user.into(),
            note: note.into(),
            last_modified: Utc::now(),
        }
    }

    /// Create an entry with every text field empty.
    pub fn empty() -> Self {
        Self::new("", "", "", "")
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn secret(&self) -> &str {
        &self.secret
    }

    pub fn site(&self) -> &str {
        &self.site
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    pub fn note(&self) -> &str {
        &self.note
    }

    pub fn last_modified(&self) -> DateTime<Utc> {
        self.last_modified
    }

    pub fn set_secret(&mut self, secret: impl Into<String>) {
        self.secret = secret.into();
        self.touch();
    }

    pub fn set_site(&mut self, site: impl Into<String>) {
        self.site = site.into();
        self.touch();
    }

    pub fn set_user(&mut self, user: impl Into<String>) {
        self.user = user.into();
        self.touch();
    }

    pub fn set_note(&mut self, note: impl Into<String>) {
        self.note = note.into();
        self.touch();
    }

    /// Apply the fields present in `update`.  Returns `true` if anything
    /// was written.
    pub fn apply(&mut self, update: EntryUpdate) -> bool {
        if update.is_noop() {
            return false;
        }
        if let Some(secret) = update.secret {
            self.secret = secret;
        }
        if let Some(site) = update.site {
            self.site = site;
        }
        if let Some(user) = update.user {
            self.user = user;
        }
        if let Some(note) = update.note {
            self.note = note;
        }
        self.touch();
        true
    }

    /// Blank all four text fields, keeping the id.
    ///
    /// This is the staging step before an entry is physically removed
    /// from the vault.
    pub fn clear(&mut self) {
        self.secret.clear();
        self.site.clear();
        self.user.clear();
        self.note.clear();
        self.touch();
    }

    /// `true` iff all four text fields are empty.
    pub fn is_empty(&self) -> bool {
        self.secret.is_empty() && self.site.is_empty() && self.user.is_empty() && self.note.is_empty()
    }

    /// Content equality: same secret, site, user and note.  Id and
    /// timestamp are ignored.
    pub fn same_credential(&self, other: &Self) -> bool {
        self.secret == other.secret
            && self.site == other.site
            && self.user == other.user
            && self.note == other.note
    }

    /// Case-insensitive substring search over the four text fields.
    pub fn matches(&self, keyword: &str) -> bool {
        let needle = keyword.to_lowercase();
        [&self.secret, &self.site, &self.user, &self.note]
            .iter()
            .any(|field| field.to_lowercase().contains(&needle))
    }

    /// `"site: github, user: octo"` from the non-empty site, user and
    /// note fields, or `None` when all three are empty.
    ///
    /// The secret is never included.
    pub fn summary(&self) -> Option<String> {
        let parts: Vec<String> = [
            ("site", &self.site),
            ("user", &self.user),
            ("note", &self.note),
        ]
        .iter()
        .filter(|(_, value)| !value.is_empty())
        .map(|(label, value)| format!("{label}: {value}"))
        .collect();

        (!parts.is_empty()).then(|| parts.join(", "))
    }

    /// Log line such as `"Added entry: site: github, user: octo"`.
    pub fn describe(&self, action: &str) -> String {
        match self.summary() {
            Some(summary) => format!("{action}: {summary}"),
            None => format!("{action} with no information"),
        }
    }

    // Wall clocks can step backwards; last_modified must not.
    fn touch(&mut self) {
        let now = Utc::now();
        if now > self.last_modified {
            self.last_modified = now;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn new_entry_has_unique_id() {
        let a = VaultEntry::new("pw", "site", "user", "");
        let b = VaultEntry::new("pw", "site", "user", "");
        assert_ne!(a.id(), b.id());
        assert!(a.same_credential(&b));
        assert_ne!(a, b);
    }

    #[test]
    fn setters_keep_id_and_advance_timestamp() {
        let mut entry = VaultEntry::new("pw", "site", "user", "note");
        let id = entry.id().to_string();
        let before = entry.last_modified();

        entry.set_secret("new-pw");
        entry.set_site("other");
        entry.set_user("me");
        entry.set_note("n");

        assert_eq!(entry.id(), id);
        assert!(entry.last_modified() >= before);
        assert_eq!(entry.secret(), "new-pw");
        assert_eq!(entry.site(), "other");
        assert_eq!(entry.user(), "me");
        assert_eq!(entry.note(), "n");
    }

    #[test]
    fn timestamp_never_moves_backwards() {
        let mut entry = VaultEntry::new("pw", "", "", "");
        let future = Utc::now() + Duration::hours(1);
        entry.last_modified = future;
        entry.set_site("x");
        assert_eq!(entry.last_modified(), future);
    }

    #[test]
    fn clear_blanks_fields_but_keeps_id() {
        let mut entry = VaultEntry::new("pw", "site", "user", "note");
        let id = entry.id().to_string();
        assert!(!entry.is_empty());

        entry.clear();
        assert!(entry.is_empty());
        assert_eq!(entry.id(), id);
    }

    #[test]
    fn empty_constructor_is_empty() {
        assert!(VaultEntry::empty().is_empty());
    }

    #[test]
    fn apply_only_touches_given_fields() {
        let mut entry = VaultEntry::new("pw", "site", "user", "note");
        let changed = entry.apply(EntryUpdate {
            user: Some("alice".into()),
            ..EntryUpdate::default()
        });
        assert!(changed);
        assert_eq!(entry.user(), "alice");
        assert_eq!(entry.secret(), "pw");
        assert_eq!(entry.site(), "site");

        assert!(!entry.apply(EntryUpdate::default()));
    }

    #[test]
    fn identity_equality_includes_id_and_timestamp() {
        let entry = VaultEntry::new("pw", "site", "user", "note");
        let copy = entry.clone();
        assert_eq!(entry, copy);

        let mut touched = entry.clone();
        touched.last_modified = entry.last_modified + Duration::seconds(1);
        assert_ne!(entry, touched);
        assert!(entry.same_credential(&touched));
    }

    #[test]
    fn matches_is_case_insensitive_over_all_fields() {
        let entry = VaultEntry::new("Hunter2", "GitHub", "octo", "work account");
        assert!(entry.matches("github"));
        assert!(entry.matches("HUNTER"));
        assert!(entry.matches("Work"));
        assert!(!entry.matches("gitlab"));
    }

    #[test]
    fn describe_omits_secret() {
        let entry = VaultEntry::new("hunter2", "github", "octo", "");
        let text = entry.describe("Added entry");
        assert_eq!(text, "Added entry: site: github, user: octo");
        assert!(!text.contains("hunter2"));

        let blank = VaultEntry::new("only-secret", "", "", "");
        assert_eq!(blank.summary(), None);
        assert_eq!(blank.describe("Added entry"), "Added entry with no information");
    }

    #[test]
    fn missing_text_fields_default_to_empty() {
        let json = r#"{"id":"abc","site":"s","last_modified":"2024-01-01T00:00:00Z"}"#;
        let entry: VaultEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.id(), "abc");
        assert_eq!(entry.site(), "s");
        assert_eq!(entry.secret(), "");
        assert_eq!(entry.note(), "");
    }
}
