use anyhow::Result;
use dialoguer::Confirm;
use keepintouch_core::KeepInTouch;
use keepintouch_core::store::ContactRepository;
use owo_colors::OwoColorize;

use crate::commands::select_contact;

pub fn run(app: &KeepInTouch, query: &str, yes: bool) -> Result<()> {
    let mut store = app.store()?;
    let resolved = select_contact(query, &store, &app.contact_book())?;
    let name = resolved.display_name();

    if !yes && !confirm_delete(&name)? {
        println!("{}", "  Kept".dimmed());
        return Ok(());
    }

    store.delete(resolved.identifier())?;
    println!("{}", format!("  Deleted {name}").red());
    Ok(())
}

pub fn confirm_delete(name: &str) -> Result<bool> {
    Ok(Confirm::new()
        .with_prompt(format!("  Are you sure you want to delete {name}'s contact?"))
        .default(false)
        .interact()?)
}
