//! Parsing "last contacted" input like "yesterday", "sat" or "2025-03-20".

use anyhow::Result;
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};

/// Parse a date typed by the user into a timestamp.
///
/// Plain `YYYY-MM-DD` is taken as noon local time on that day so that it
/// shows as the same date in any nearby zone; anything else goes through
/// fuzzydate.
pub fn parse_last_contacted(input: &str) -> Result<DateTime<Utc>> {
    let input = input.trim();

    let naive = match NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        Ok(date) => date.and_hms_opt(12, 0, 0).unwrap_or_default(),
        Err(_) => fuzzy(input)?,
    };

    local_to_utc(naive)
}

fn fuzzy(input: &str) -> Result<NaiveDateTime> {
    let expanded = expand_weekdays(input);
    fuzzydate::parse(&expanded)
        .map_err(|_| anyhow::anyhow!("Could not parse date: \"{}\"", input))
}

fn local_to_utc(naive: NaiveDateTime) -> Result<DateTime<Utc>> {
    Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| anyhow::anyhow!("{} does not exist in the local time zone", naive))
}

/// fuzzydate only knows full weekday names.
fn expand_weekdays(input: &str) -> String {
    const DAYS: [(&str, &str); 11] = [
        ("mon", "monday"),
        ("tue", "tuesday"),
        ("tues", "tuesday"),
        ("wed", "wednesday"),
        ("thu", "thursday"),
        ("thur", "thursday"),
        ("thurs", "thursday"),
        ("fri", "friday"),
        ("sat", "saturday"),
        ("sun", "sunday"),
        ("yday", "yesterday"),
    ];

    input
        .to_lowercase()
        .split_whitespace()
        .map(|word| {
            DAYS.iter()
                .find(|(short, _)| *short == word)
                .map(|(_, full)| *full)
                .unwrap_or(word)
        })
        .collect::<Vec<_>>()
        .join(" ")
}
