//! Pairing tracked contacts with their live address book entries.

use std::collections::HashMap;

use crate::contact_book::{ContactBook, ExternalContact};
use crate::error::KeepInTouchResult;
use crate::store::ContactRepository;
use crate::tracked_contact::{TrackedContact, display_order};

/// A tracked contact together with its current address book fields.
/// Built fresh on every read and never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedContact {
    pub tracked: TrackedContact,
    pub contact: ExternalContact,
}

impl ResolvedContact {
    pub fn identifier(&self) -> &str {
        &self.tracked.identifier
    }

    pub fn display_name(&self) -> String {
        self.contact.display_name()
    }
}

/// Resolve `records` against `book` in display order.
///
/// The book is read once for the whole list. Records whose contact is not
/// in it, or every record when the book cannot be read, are left out
/// without an error.
pub fn resolve_contacts<B>(records: &[TrackedContact], book: &B) -> Vec<ResolvedContact>
where
    B: ContactBook + ?Sized,
{
    let mut by_identifier: HashMap<String, ExternalContact> = match book.contacts() {
        Ok(contacts) => contacts
            .into_iter()
            .map(|c| (c.identifier.clone(), c))
            .collect(),
        Err(e) => {
            tracing::debug!(error = %e, count = records.len(), "hiding contacts, address book unreadable");
            return Vec::new();
        }
    };

    let mut ordered: Vec<&TrackedContact> = records.iter().collect();
    ordered.sort_by(|a, b| display_order(a, b));

    ordered
        .into_iter()
        .filter_map(|tracked| match by_identifier.remove(&tracked.identifier) {
            Some(contact) => Some(ResolvedContact {
                tracked: tracked.clone(),
                contact,
            }),
            None => {
                tracing::debug!(identifier = %tracked.identifier, "hiding contact missing from address book");
                None
            }
        })
        .collect()
}

/// Everything in `repo` that can currently be shown.
pub fn visible_contacts<R, B>(repo: &R, book: &B) -> KeepInTouchResult<Vec<ResolvedContact>>
where
    R: ContactRepository + ?Sized,
    B: ContactBook + ?Sized,
{
    Ok(resolve_contacts(&repo.query()?, book))
}

/// Resolve a single tracked record for editing.
///
/// Unlike the list view, a missing address book entry here is an error.
pub fn resolve_for_edit<B>(tracked: TrackedContact, book: &B) -> KeepInTouchResult<ResolvedContact>
where
    B: ContactBook + ?Sized,
{
    let contact = book.resolve(&tracked.identifier)?;
    Ok(ResolvedContact { tracked, contact })
}
