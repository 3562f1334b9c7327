//! Storage for tracked contacts.
//!
//! `ContactRepository` is the only thing the rest of the crate talks to.
//! `MemoryContactStore` keeps records in a Vec; `TomlContactStore` reads
//! `contacts.toml` on every call and rewrites it after every change.

mod memory;
mod toml_file;

pub use memory::MemoryContactStore;
pub use toml_file::TomlContactStore;

use chrono::{DateTime, Utc};

use crate::error::{KeepInTouchError, KeepInTouchResult};
use crate::tracked_contact::TrackedContact;

pub trait ContactRepository {
    /// All records, least recently contacted first, ties by identifier.
    fn query(&self) -> KeepInTouchResult<Vec<TrackedContact>>;

    fn get(&self, identifier: &str) -> KeepInTouchResult<Option<TrackedContact>>;

    /// Fails with `AlreadyTracked` if the identifier exists.
    fn insert(&mut self, contact: TrackedContact) -> KeepInTouchResult<()>;

    /// Fails with `NotTracked` if the identifier does not exist.
    fn update(&mut self, contact: &TrackedContact) -> KeepInTouchResult<()>;

    /// Fails with `NotTracked` if the identifier does not exist.
    fn delete(&mut self, identifier: &str) -> KeepInTouchResult<()>;

    /// Start tracking `identifier` unless it is tracked already.
    /// Returns the stored record and whether it was newly created.
    fn track(&mut self, identifier: &str) -> KeepInTouchResult<(TrackedContact, bool)> {
        if let Some(existing) = self.get(identifier)? {
            return Ok((existing, false));
        }
        let contact = TrackedContact::new(identifier);
        self.insert(contact.clone())?;
        Ok((contact, true))
    }

    /// Set `last_contacted` to `now` on an existing record.
    fn mark_contacted(&mut self, identifier: &str, now: DateTime<Utc>) -> KeepInTouchResult<()> {
        let mut contact = self
            .get(identifier)?
            .ok_or_else(|| KeepInTouchError::NotTracked(identifier.to_string()))?;
        contact.set_last_contacted(now);
        self.update(&contact)
    }
}
