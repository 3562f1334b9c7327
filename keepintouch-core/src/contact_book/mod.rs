//! Read-only access to the user's address book.

mod memory;
mod vcard;
mod vdir;

pub use memory::MemoryContactBook;
pub use vcard::{VCard, parse_vcards};
pub use vdir::VdirContactBook;

use crate::error::KeepInTouchResult;

/// The fields of an address book entry this app needs.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExternalContact {
    pub identifier: String,
    pub given_name: String,
    pub family_name: String,
    pub phone_numbers: Vec<String>,
    pub email_addresses: Vec<String>,
}

impl ExternalContact {
    /// "Given Family", without a trailing space when there is no family name.
    pub fn display_name(&self) -> String {
        match (self.given_name.is_empty(), self.family_name.is_empty()) {
            (_, true) => self.given_name.clone(),
            (true, false) => self.family_name.clone(),
            (false, false) => format!("{} {}", self.given_name, self.family_name),
        }
    }
}

/// An address book this app can look contacts up in. Never written to.
pub trait ContactBook {
    /// Fetch a contact by identifier. `ContactNotFound` if it is gone.
    fn resolve(&self, identifier: &str) -> KeepInTouchResult<ExternalContact>;

    /// Every contact, for picking a new one to track.
    fn contacts(&self) -> KeepInTouchResult<Vec<ExternalContact>>;
}
