pub mod add;
pub mod call;
pub mod caught_up;
pub mod config;
pub mod delete;
pub mod edit;
pub mod list;
pub mod show;
pub mod tz;

use anyhow::{Context, Result};
use dialoguer::Select;
use keepintouch_core::ResolvedContact;
use keepintouch_core::contact_book::ContactBook;
use keepintouch_core::resolution::{resolve_for_edit, visible_contacts};
use keepintouch_core::store::ContactRepository;

/// Find the tracked contact a command argument refers to.
///
/// An exact identifier wins. A tracked identifier whose address book entry
/// has vanished is an error. Otherwise the query is matched against display
/// names, asking the user to choose when more than one matches.
pub fn select_contact<R, B>(query: &str, repo: &R, book: &B) -> Result<ResolvedContact>
where
    R: ContactRepository + ?Sized,
    B: ContactBook + ?Sized,
{
    if let Some(tracked) = repo.get(query)? {
        let identifier = tracked.identifier.clone();
        return resolve_for_edit(tracked, book)
            .with_context(|| format!("'{identifier}' is tracked but missing from your address book"));
    }

    let visible = visible_contacts(repo, book)?;
    let mut found = matching(query, &visible);

    match found.len() {
        0 => {
            let names: Vec<_> = visible.iter().map(|c| c.display_name()).collect();
            if names.is_empty() {
                anyhow::bail!("No contacts added yet! Add one with:\n  keepintouch add");
            }
            anyhow::bail!("No tracked contact matches '{}'. Tracked: {}", query, names.join(", "))
        }
        1 => Ok(found.remove(0).clone()),
        _ => {
            let items: Vec<String> = found.iter().map(|c| c.display_name()).collect();
            let selection = Select::new()
                .with_prompt(format!("  Which '{query}'?"))
                .items(&items)
                .default(0)
                .interact()?;
            Ok(found[selection].clone())
        }
    }
}

/// Contacts whose display name contains `query`, ignoring case.
fn matching<'a>(query: &str, contacts: &'a [ResolvedContact]) -> Vec<&'a ResolvedContact> {
    let needle = query.trim().to_lowercase();
    contacts
        .iter()
        .filter(|c| c.display_name().to_lowercase().contains(&needle))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use keepintouch_core::contact_book::MemoryContactBook;
    use keepintouch_core::store::MemoryContactStore;

    fn setup() -> (MemoryContactStore, MemoryContactBook) {
        let book = MemoryContactBook::default()
            .with("ada-1", "Ada", "Lovelace")
            .with("alan-1", "Alan", "Turing")
            .with("grace-1", "Grace", "Hopper");
        let mut repo = MemoryContactStore::new();
        for id in ["ada-1", "alan-1", "grace-1"] {
            repo.track(id).unwrap();
        }
        (repo, book)
    }

    #[test]
    fn exact_identifier_is_preferred() {
        let (repo, book) = setup();
        let found = select_contact("grace-1", &repo, &book).unwrap();
        assert_eq!(found.identifier(), "grace-1");
    }

    #[test]
    fn unique_name_fragment_matches() {
        let (repo, book) = setup();
        let found = select_contact("TURING", &repo, &book).unwrap();
        assert_eq!(found.display_name(), "Alan Turing");
    }

    #[test]
    fn ambiguous_fragment_has_several_matches() {
        let (repo, book) = setup();
        let visible = visible_contacts(&repo, &book).unwrap();

        let names: Vec<_> = matching("a", &visible).iter().map(|c| c.display_name()).collect();
        assert_eq!(names.len(), 3);
        assert_eq!(matching("ov", &visible).len(), 1);
    }

    #[test]
    fn unknown_name_is_an_error() {
        let (repo, book) = setup();
        let err = select_contact("Linus", &repo, &book).unwrap_err();
        assert!(err.to_string().contains("Tracked:"));
    }

    #[test]
    fn vanished_contact_is_fatal_for_edit() {
        let (mut repo, book) = setup();
        repo.track("deleted-1").unwrap();

        let err = select_contact("deleted-1", &repo, &book).unwrap_err();
        assert!(err.to_string().contains("missing from your address book"));
    }
}
