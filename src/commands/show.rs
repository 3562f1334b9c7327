use anyhow::Result;
use chrono::Utc;
use keepintouch_core::KeepInTouch;
use keepintouch_core::actions::{NO_PHONE_NUMBERS, NO_VIDEO_ADDRESSES, phone_targets, video_targets};
use keepintouch_core::time_zone::local_time_label;
use owo_colors::OwoColorize;

use crate::commands::select_contact;
use crate::render::contact_header;

pub fn run(app: &KeepInTouch, query: &str) -> Result<()> {
    let store = app.store()?;
    let resolved = select_contact(query, &store, &app.contact_book())?;
    let tracked = &resolved.tracked;

    println!("{}", contact_header(&resolved));
    println!(
        "  Last Contacted: {}",
        tracked.last_contacted_text(&app.config().date_format)
    );
    print!("  Time Zone: {}", tracked.time_zone_city());
    match local_time_label(tracked.time_zone_id(), Utc::now()) {
        Some(local) => println!("  {}", local.dimmed()),
        None => println!(),
    }

    println!("{}", "Phone".bold());
    let phones = phone_targets(&resolved.contact);
    if phones.is_empty() {
        println!("  {}", NO_PHONE_NUMBERS.dimmed());
    }
    for number in phones {
        println!("  {number}");
    }

    println!("{}", "Video".bold());
    let video = video_targets(&resolved.contact);
    if video.is_empty() {
        println!("  {}", NO_VIDEO_ADDRESSES.dimmed());
    }
    for target in video {
        println!("  {}  {}", target.label, target.address.dimmed());
    }

    Ok(())
}
