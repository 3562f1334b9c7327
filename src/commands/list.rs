use anyhow::Result;
use chrono::Utc;
use keepintouch_core::KeepInTouch;
use keepintouch_core::resolution::visible_contacts;
use owo_colors::OwoColorize;

use crate::render::{ContactRow, pluralize};

pub fn run(app: &KeepInTouch) -> Result<()> {
    let store = app.store()?;
    let book = app.contact_book();
    let contacts = visible_contacts(&store, &book)?;

    println!("{}", "Contacts".bold());

    if contacts.is_empty() {
        println!("   {}", "No contacts added yet!".dimmed());
        return Ok(());
    }

    let now = Utc::now();
    let date_format = &app.config().date_format;
    for resolved in &contacts {
        println!("{}", ContactRow::new(resolved, date_format, now).render());
    }

    let count = contacts.len();
    println!("{}", format!("{} {}", count, pluralize("contact", count)).dimmed());

    Ok(())
}
