use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{KeepInTouchError, KeepInTouchResult};
use crate::store::{ContactRepository, MemoryContactStore};
use crate::tracked_contact::TrackedContact;

pub const CONTACTS_FILE_NAME: &str = "contacts.toml";

#[derive(Serialize, Deserialize, Default)]
struct ContactsFile {
    #[serde(default)]
    contacts: Vec<TrackedContact>,
}

/// Tracked contacts persisted as a `[[contacts]]` array in a TOML file.
///
/// The file is the only copy: every read loads it, and every
/// insert/update/delete re-reads it, applies that one change and writes it
/// back. A long-lived handle never overwrites changes made by another one.
pub struct TomlContactStore {
    path: PathBuf,
}

impl TomlContactStore {
    /// Open `<data_dir>/contacts.toml`, starting empty if it does not exist yet.
    pub fn open(data_dir: &Path) -> KeepInTouchResult<Self> {
        let store = TomlContactStore {
            path: data_dir.join(CONTACTS_FILE_NAME),
        };

        let count = store.load()?.records().len();
        tracing::debug!(path = %store.path.display(), count, "opened contacts");

        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> KeepInTouchResult<MemoryContactStore> {
        if !self.path.exists() {
            return Ok(MemoryContactStore::new());
        }

        let content = std::fs::read_to_string(&self.path)?;
        let file = toml::from_str::<ContactsFile>(&content).map_err(|e| {
            KeepInTouchError::Serialization(format!("{}: {e}", self.path.display()))
        })?;

        Ok(MemoryContactStore::from_records(file.contacts))
    }

    fn save(&self, contacts: &MemoryContactStore) -> KeepInTouchResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = ContactsFile {
            contacts: contacts.records().to_vec(),
        };
        let content =
            toml::to_string_pretty(&file).map_err(|e| KeepInTouchError::Serialization(e.to_string()))?;

        // Write-then-rename.
        let tmp = self.path.with_extension("toml.tmp");
        std::fs::write(&tmp, content)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    /// Load, apply `change`, and write back only if it succeeded.
    fn modify<F>(&mut self, change: F) -> KeepInTouchResult<()>
    where
        F: FnOnce(&mut MemoryContactStore) -> KeepInTouchResult<()>,
    {
        let mut contacts = self.load()?;
        change(&mut contacts)?;
        self.save(&contacts)
    }
}

impl ContactRepository for TomlContactStore {
    fn query(&self) -> KeepInTouchResult<Vec<TrackedContact>> {
        self.load()?.query()
    }

    fn get(&self, identifier: &str) -> KeepInTouchResult<Option<TrackedContact>> {
        self.load()?.get(identifier)
    }

    fn insert(&mut self, contact: TrackedContact) -> KeepInTouchResult<()> {
        self.modify(|contacts| contacts.insert(contact))
    }

    fn update(&mut self, contact: &TrackedContact) -> KeepInTouchResult<()> {
        self.modify(|contacts| contacts.update(contact))
    }

    fn delete(&mut self, identifier: &str) -> KeepInTouchResult<()> {
        self.modify(|contacts| contacts.delete(identifier))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catch_up::{CatchUpEvent, CatchUpWorkflow};
    use chrono::{TimeZone, Utc};

    fn ids(store: &TomlContactStore) -> Vec<String> {
        store.query().unwrap().into_iter().map(|c| c.identifier).collect()
    }

    #[test]
    fn missing_file_opens_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = TomlContactStore::open(&dir.path().join("not-yet")).unwrap();

        assert!(store.query().unwrap().is_empty());
        assert!(!store.path().exists());
    }

    #[test]
    fn records_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let when = Utc.with_ymd_and_hms(2025, 2, 14, 18, 30, 0).unwrap();

        {
            let mut store = TomlContactStore::open(dir.path()).unwrap();
            let mut alice = TrackedContact::new("alice-uid");
            alice.set_last_contacted(when);
            alice.time_zone = Some("Europe/London".to_string());
            store.insert(alice).unwrap();
            store.insert(TrackedContact::new("bob-uid")).unwrap();
        }

        let store = TomlContactStore::open(dir.path()).unwrap();
        let contacts = store.query().unwrap();

        assert_eq!(contacts.len(), 2);
        assert_eq!(contacts[0].identifier, "bob-uid");
        assert_eq!(contacts[0].last_contacted, None);
        assert_eq!(contacts[1].identifier, "alice-uid");
        assert_eq!(contacts[1].last_contacted, Some(when));
        assert_eq!(contacts[1].time_zone.as_deref(), Some("Europe/London"));
    }

    #[test]
    fn delete_is_durable() {
        let dir = tempfile::tempdir().unwrap();

        let mut store = TomlContactStore::open(dir.path()).unwrap();
        store.insert(TrackedContact::new("a")).unwrap();
        store.insert(TrackedContact::new("b")).unwrap();
        store.delete("a").unwrap();

        let reopened = TomlContactStore::open(dir.path()).unwrap();
        let ids: Vec<_> = reopened.query().unwrap().into_iter().map(|c| c.identifier).collect();
        assert_eq!(ids, vec!["b"]);
    }

    #[test]
    fn reads_hand_written_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(CONTACTS_FILE_NAME),
            r#"
[[contacts]]
identifier = "x"
last_contacted = "2025-01-02T03:04:05Z"

[[contacts]]
identifier = "y"
time_zone = "Asia/Tokyo"
"#,
        )
        .unwrap();

        let store = TomlContactStore::open(dir.path()).unwrap();
        let y = store.get("y").unwrap().unwrap();
        assert_eq!(y.time_zone.as_deref(), Some("Asia/Tokyo"));
        assert_eq!(y.last_contacted, None);
        assert!(store.get("x").unwrap().unwrap().last_contacted.is_some());
    }

    #[test]
    fn corrupt_file_is_a_serialization_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONTACTS_FILE_NAME), "contacts = 12").unwrap();

        assert!(matches!(
            TomlContactStore::open(dir.path()),
            Err(KeepInTouchError::Serialization(_))
        ));
    }

    #[test]
    fn long_lived_handle_keeps_changes_from_another() {
        let dir = tempfile::tempdir().unwrap();
        let now = Utc.with_ymd_and_hms(2025, 7, 4, 15, 0, 0).unwrap();

        let mut during_call = TomlContactStore::open(dir.path()).unwrap();
        during_call.insert(TrackedContact::new("bob")).unwrap();
        during_call.insert(TrackedContact::new("ada")).unwrap();

        let mut workflow = CatchUpWorkflow::new();
        workflow.handle(CatchUpEvent::CallStarted {
            contact: "ada".into(),
        });
        workflow.handle(CatchUpEvent::AppForegrounded);

        let mut elsewhere = TomlContactStore::open(dir.path()).unwrap();
        elsewhere.delete("bob").unwrap();
        elsewhere.insert(TrackedContact::new("carol")).unwrap();

        assert_eq!(ids(&during_call), vec!["ada", "carol"]);
        workflow.answer(true, &mut during_call, now).unwrap();

        let reopened = TomlContactStore::open(dir.path()).unwrap();
        assert_eq!(ids(&reopened), vec!["carol", "ada"]);
        assert_eq!(reopened.get("ada").unwrap().unwrap().last_contacted, Some(now));
        assert!(reopened.get("bob").unwrap().is_none());
    }

    #[test]
    fn failed_change_leaves_file_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = TomlContactStore::open(dir.path()).unwrap();
        store.insert(TrackedContact::new("a")).unwrap();
        let before = std::fs::read_to_string(store.path()).unwrap();

        assert!(matches!(
            store.insert(TrackedContact::new("a")),
            Err(KeepInTouchError::AlreadyTracked(_))
        ));
        assert!(matches!(store.delete("ghost"), Err(KeepInTouchError::NotTracked(_))));
        assert_eq!(std::fs::read_to_string(store.path()).unwrap(), before);
    }
}
