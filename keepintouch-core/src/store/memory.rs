use crate::error::{KeepInTouchError, KeepInTouchResult};
use crate::store::ContactRepository;
use crate::tracked_contact::{TrackedContact, display_order};

/// In-process store, also used as the working set of `TomlContactStore`.
#[derive(Debug, Default, Clone)]
pub struct MemoryContactStore {
    contacts: Vec<TrackedContact>,
}

impl MemoryContactStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from loaded records. Later duplicates of an identifier are dropped.
    pub fn from_records(records: Vec<TrackedContact>) -> Self {
        let mut store = Self::new();
        for record in records {
            if store.position(&record.identifier).is_some() {
                tracing::warn!(identifier = %record.identifier, "dropping duplicate contact record");
                continue;
            }
            store.contacts.push(record);
        }
        store
    }

    pub fn records(&self) -> &[TrackedContact] {
        &self.contacts
    }

    fn position(&self, identifier: &str) -> Option<usize> {
        self.contacts.iter().position(|c| c.identifier == identifier)
    }
}

impl ContactRepository for MemoryContactStore {
    fn query(&self) -> KeepInTouchResult<Vec<TrackedContact>> {
        let mut contacts = self.contacts.clone();
        contacts.sort_by(display_order);
        Ok(contacts)
    }

    fn get(&self, identifier: &str) -> KeepInTouchResult<Option<TrackedContact>> {
        Ok(self.position(identifier).map(|i| self.contacts[i].clone()))
    }

    fn insert(&mut self, contact: TrackedContact) -> KeepInTouchResult<()> {
        if self.position(&contact.identifier).is_some() {
            return Err(KeepInTouchError::AlreadyTracked(contact.identifier));
        }
        self.contacts.push(contact);
        Ok(())
    }

    fn update(&mut self, contact: &TrackedContact) -> KeepInTouchResult<()> {
        let i = self
            .position(&contact.identifier)
            .ok_or_else(|| KeepInTouchError::NotTracked(contact.identifier.clone()))?;
        self.contacts[i] = contact.clone();
        Ok(())
    }

    fn delete(&mut self, identifier: &str) -> KeepInTouchResult<()> {
        let i = self
            .position(identifier)
            .ok_or_else(|| KeepInTouchError::NotTracked(identifier.to_string()))?;
        self.contacts.remove(i);
        Ok(())
    }
}
