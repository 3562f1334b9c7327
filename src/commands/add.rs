use std::collections::HashSet;

use anyhow::Result;
use dialoguer::Select;
use keepintouch_core::KeepInTouch;
use keepintouch_core::contact_book::{ContactBook, ExternalContact};
use keepintouch_core::store::ContactRepository;
use owo_colors::OwoColorize;

pub fn run(app: &KeepInTouch, identifier: Option<String>) -> Result<()> {
    let mut store = app.store()?;
    let book = app.contact_book();

    let contact = match identifier {
        Some(id) => book.resolve(&id)?,
        None => {
            let candidates = untracked(&store, &book)?;
            match pick(&candidates)? {
                Some(contact) => contact,
                None => return Ok(()),
            }
        }
    };

    let (_, created) = store.track(&contact.identifier)?;
    tracing::info!(identifier = %contact.identifier, created, "tracking contact");

    if created {
        println!("{}", format!("  Added {}", contact.display_name()).green());
    } else {
        println!(
            "{}",
            format!("  {} is already tracked", contact.display_name()).dimmed()
        );
    }

    Ok(())
}

/// Address book entries that are not tracked yet, in address book order.
fn untracked<R, B>(store: &R, book: &B) -> Result<Vec<ExternalContact>>
where
    R: ContactRepository + ?Sized,
    B: ContactBook + ?Sized,
{
    let tracked: HashSet<String> = store.query()?.into_iter().map(|c| c.identifier).collect();

    Ok(book
        .contacts()?
        .into_iter()
        .filter(|c| !tracked.contains(&c.identifier))
        .collect())
}

/// Let the user choose one contact. `None` if they cancel with Esc.
fn pick(candidates: &[ExternalContact]) -> Result<Option<ExternalContact>> {
    if candidates.is_empty() {
        println!(
            "{}",
            "  Everyone in your address book is already tracked".dimmed()
        );
        return Ok(None);
    }

    let items: Vec<String> = candidates.iter().map(|c| c.display_name()).collect();
    let selection = Select::new()
        .with_prompt("  Who do you want to keep in touch with?")
        .items(&items)
        .default(0)
        .interact_opt()?;

    Ok(selection.map(|i| candidates[i].clone()))
}
