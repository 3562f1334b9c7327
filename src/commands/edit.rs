use anyhow::Result;
use chrono::Utc;
use dialoguer::{Input, Select};
use keepintouch_core::store::ContactRepository;
use keepintouch_core::{KeepInTouch, KeepInTouchError, ResolvedContact, TrackedContact};
use owo_colors::OwoColorize;

use crate::commands::delete::confirm_delete;
use crate::commands::{select_contact, tz};
use crate::dates::parse_last_contacted;
use crate::render::contact_header;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EditAction {
    SetToday,
    ChangeDate,
    ClearDate,
    TimeZone,
    Delete,
    Done,
}

pub fn run(
    app: &KeepInTouch,
    query: &str,
    date: Option<String>,
    clear: bool,
    time_zone: Option<String>,
) -> Result<()> {
    let mut store = app.store()?;
    let resolved = select_contact(query, &store, &app.contact_book())?;

    if date.is_none() && !clear && time_zone.is_none() {
        return interactive(app, &mut store, resolved);
    }

    let tracked = apply_flags(
        &mut store,
        resolved.identifier(),
        date.as_deref(),
        clear,
        time_zone.as_deref(),
    )?;
    print_summary(app, &resolved.display_name(), &tracked);
    Ok(())
}

/// Apply `--date`/`--clear`/`--tz` to the stored record and save it.
fn apply_flags<R>(
    store: &mut R,
    identifier: &str,
    date: Option<&str>,
    clear: bool,
    time_zone: Option<&str>,
) -> Result<TrackedContact>
where
    R: ContactRepository + ?Sized,
{
    let last_contacted = match date {
        Some(input) if !clear => Some(parse_last_contacted(input)?),
        _ => None,
    };
    let before = current(store, identifier)?;
    let zone = match time_zone {
        Some(query) => tz::choose(Some(query), before.time_zone_id())?,
        None => None,
    };

    save(store, identifier, |tracked| {
        if clear {
            tracked.clear_last_contacted();
        } else if let Some(when) = last_contacted {
            tracked.set_last_contacted(when);
        }
        if let Some(entry) = &zone {
            tracked.set_time_zone(entry);
        }
    })
}

/// The stored record as it is now, which may differ from when the command started.
fn current<R>(store: &R, identifier: &str) -> Result<TrackedContact>
where
    R: ContactRepository + ?Sized,
{
    store
        .get(identifier)?
        .ok_or_else(|| KeepInTouchError::NotTracked(identifier.to_string()).into())
}

/// Apply `change` to the current stored record and write it back.
fn save<R, F>(store: &mut R, identifier: &str, change: F) -> Result<TrackedContact>
where
    R: ContactRepository + ?Sized,
    F: FnOnce(&mut TrackedContact),
{
    let mut tracked = current(store, identifier)?;
    change(&mut tracked);
    store.update(&tracked)?;
    Ok(tracked)
}

/// The edit screen: each change is saved as soon as it is made.
fn interactive<R>(app: &KeepInTouch, store: &mut R, resolved: ResolvedContact) -> Result<()>
where
    R: ContactRepository + ?Sized,
{
    let name = resolved.display_name();
    let identifier = resolved.identifier().to_string();
    let date_format = &app.config().date_format;

    println!("{}", contact_header(&resolved));

    let tracked = loop {
        let tracked = current(store, &identifier)?;
        let entries = menu(&tracked, date_format);
        let labels: Vec<&str> = entries.iter().map(|(_, label)| label.as_str()).collect();
        let selection = Select::new()
            .items(&labels)
            .default(0)
            .interact_opt()?;

        let action = selection.map_or(EditAction::Done, |i| entries[i].0);
        match action {
            EditAction::SetToday => {
                let now = Utc::now();
                save(store, &identifier, |t| t.set_last_contacted(now))?;
            }
            EditAction::ChangeDate => {
                let when = prompt_date()?;
                save(store, &identifier, |t| t.set_last_contacted(when))?;
            }
            EditAction::ClearDate => {
                save(store, &identifier, |t| t.clear_last_contacted())?;
            }
            EditAction::TimeZone => {
                if let Some(entry) = tz::choose(None, tracked.time_zone_id())? {
                    save(store, &identifier, |t| t.set_time_zone(&entry))?;
                }
            }
            EditAction::Delete => {
                if confirm_delete(&name)? {
                    store.delete(&identifier)?;
                    println!("{}", format!("  Deleted {name}").red());
                    return Ok(());
                }
            }
            EditAction::Done => break tracked,
        }
    };

    print_summary(app, &name, &tracked);
    Ok(())
}

fn menu(tracked: &TrackedContact, date_format: &str) -> Vec<(EditAction, String)> {
    let mut entries = Vec::new();

    if tracked.last_contacted.is_some() {
        entries.push((
            EditAction::ChangeDate,
            format!("Last Contacted: {}", tracked.last_contacted_text(date_format)),
        ));
        entries.push((EditAction::ClearDate, "Clear Date".to_string()));
    } else {
        entries.push((EditAction::SetToday, "Last Contacted: None".to_string()));
    }

    entries.push((
        EditAction::TimeZone,
        format!("Time Zone: {}", tracked.time_zone_city()),
    ));
    entries.push((EditAction::Delete, "Delete Contact".to_string()));
    entries.push((EditAction::Done, "Done".to_string()));
    entries
}

fn prompt_date() -> Result<chrono::DateTime<Utc>> {
    loop {
        let input: String = Input::new()
            .with_prompt("  Last contacted (e.g. 2025-03-20, yesterday, last fri)")
            .interact_text()?;
        match parse_last_contacted(&input) {
            Ok(when) => return Ok(when),
            Err(e) => eprintln!("  {}", e.to_string().red()),
        }
    }
}

fn print_summary(app: &KeepInTouch, name: &str, tracked: &TrackedContact) {
    println!(
        "{}",
        format!(
            "  {}: caught up {}, time zone {}",
            name,
            tracked.last_contacted_text(&app.config().date_format),
            tracked.time_zone_city()
        )
        .green()
    );
}
