use crate::contact_book::{ContactBook, ExternalContact};
use crate::error::{KeepInTouchError, KeepInTouchResult};

/// Address book held in memory, for embedding and for tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryContactBook {
    contacts: Vec<ExternalContact>,
}

impl MemoryContactBook {
    pub fn new(contacts: Vec<ExternalContact>) -> Self {
        MemoryContactBook { contacts }
    }

    /// Add a person with just a name.
    pub fn with(mut self, identifier: &str, given: &str, family: &str) -> Self {
        self.contacts.push(ExternalContact {
            identifier: identifier.to_string(),
            given_name: given.to_string(),
            family_name: family.to_string(),
            ..Default::default()
        });
        self
    }
}

impl ContactBook for MemoryContactBook {
    fn resolve(&self, identifier: &str) -> KeepInTouchResult<ExternalContact> {
        self.contacts
            .iter()
            .find(|c| c.identifier == identifier)
            .cloned()
            .ok_or_else(|| KeepInTouchError::ContactNotFound(identifier.to_string()))
    }

    fn contacts(&self) -> KeepInTouchResult<Vec<ExternalContact>> {
        Ok(self.contacts.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_only_known_people() {
        let book = MemoryContactBook::default().with("ada", "Ada", "Lovelace");

        assert_eq!(book.resolve("ada").unwrap().display_name(), "Ada Lovelace");
        assert!(matches!(
            book.resolve("bob"),
            Err(KeepInTouchError::ContactNotFound(id)) if id == "bob"
        ));
    }
}
