use anyhow::Result;
use dialoguer::{Input, Select};
use keepintouch_core::time_zone::{TimeZoneEntry, search};
use owo_colors::OwoColorize;

/// List zones whose city matches `query`.
pub fn run(query: Option<&str>) -> Result<()> {
    let entries = search(query.unwrap_or_default());

    if entries.is_empty() {
        println!("{}", "  No matching cities".dimmed());
        return Ok(());
    }

    for entry in entries {
        println!("  {:<24} {}", entry.city(), entry.id().dimmed());
    }
    Ok(())
}

/// Resolve `query` to one catalog entry, asking the user when it is ambiguous.
///
/// Without a query the user is asked to search first. `current` gets a
/// checkmark in the list. Returns `None` if the user backs out.
pub fn choose(query: Option<&str>, current: Option<&str>) -> Result<Option<TimeZoneEntry>> {
    let query = match query {
        Some(q) => q.to_string(),
        None => Input::<String>::new()
            .with_prompt("  Search cities")
            .allow_empty(true)
            .interact_text()?,
    };

    if let Some(exact) = exact_entry(&query) {
        return Ok(Some(exact));
    }

    let entries = search(&query);
    match entries.len() {
        0 => anyhow::bail!("No time zone city matches '{}'", query),
        1 => Ok(Some(entries[0])),
        _ => {
            let current = current.unwrap_or(TimeZoneEntry::None.id());
            let items: Vec<String> = entries
                .iter()
                .map(|e| {
                    if e.id() == current {
                        format!("{} ✓", e.city())
                    } else {
                        e.city()
                    }
                })
                .collect();
            let selection = Select::new()
                .with_prompt("  Select Time Zone")
                .items(&items)
                .default(0)
                .interact_opt()?;
            Ok(selection.map(|i| entries[i]))
        }
    }
}

/// A full zone id ("Europe/London") or the "None" sentinel, taken as-is.
fn exact_entry(query: &str) -> Option<TimeZoneEntry> {
    let query = query.trim();
    if !query.contains('/') && !query.eq_ignore_ascii_case(TimeZoneEntry::None.id()) {
        return None;
    }
    TimeZoneEntry::from_id(query).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_ids_skip_the_search() {
        assert_eq!(exact_entry("Europe/London").map(|e| e.id()), Some("Europe/London"));
        assert_eq!(exact_entry("none"), Some(TimeZoneEntry::None));
        assert_eq!(exact_entry("london"), None);
        assert_eq!(exact_entry("Nowhere/Land"), None);
    }

    #[test]
    fn single_match_needs_no_prompt() {
        let chosen = choose(Some("Reykjav"), None).unwrap();
        assert_eq!(chosen.map(|e| e.id()), Some("Atlantic/Reykjavik"));
    }
}
