use anyhow::Result;
use chrono::Utc;
use keepintouch_core::KeepInTouch;
use keepintouch_core::store::ContactRepository;
use owo_colors::OwoColorize;

use crate::commands::select_contact;

pub fn run(app: &KeepInTouch, query: &str) -> Result<()> {
    let mut store = app.store()?;
    let resolved = select_contact(query, &store, &app.contact_book())?;

    store.mark_contacted(resolved.identifier(), Utc::now())?;

    println!(
        "{}",
        format!("  Caught up with {} today", resolved.display_name()).green()
    );
    Ok(())
}
