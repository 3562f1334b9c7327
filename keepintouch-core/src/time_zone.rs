//! Time zone catalog and city search.

use chrono::{DateTime, Utc};
use chrono_tz::{TZ_VARIANTS, Tz};

use crate::error::{KeepInTouchError, KeepInTouchResult};

/// Sentinel id meaning "no time zone assigned".
pub const NONE_TIME_ZONE: &str = "None";

/// Top-level regions of canonical `Region/City` identifiers.
const REGIONS: &[&str] = &[
    "Africa",
    "America",
    "Antarctica",
    "Arctic",
    "Asia",
    "Atlantic",
    "Australia",
    "Europe",
    "Indian",
    "Pacific",
];

/// One selectable entry of the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeZoneEntry {
    None,
    Zone(Tz),
}

impl TimeZoneEntry {
    /// Parse a stored or user-supplied id. "None" (any case) and "" map to the sentinel.
    pub fn from_id(id: &str) -> KeepInTouchResult<Self> {
        let id = id.trim();
        if id.is_empty() || id.eq_ignore_ascii_case(NONE_TIME_ZONE) {
            return Ok(TimeZoneEntry::None);
        }
        id.parse::<Tz>()
            .map(TimeZoneEntry::Zone)
            .map_err(|_| KeepInTouchError::Config(format!("Unknown time zone '{id}'")))
    }

    pub fn id(&self) -> &'static str {
        match self {
            TimeZoneEntry::None => NONE_TIME_ZONE,
            TimeZoneEntry::Zone(tz) => tz.name(),
        }
    }

    pub fn city(&self) -> String {
        city_name(self.id())
    }
}

/// Last path segment with underscores as spaces: "America/New_York" -> "New York".
pub fn city_name(id: &str) -> String {
    id.rsplit('/').next().unwrap_or(id).replace('_', " ")
}

fn is_canonical(id: &str) -> bool {
    id.split_once('/')
        .is_some_and(|(region, _)| REGIONS.contains(&region))
}

/// The sentinel followed by every canonical zone, sorted by city.
pub fn catalog() -> Vec<TimeZoneEntry> {
    let mut zones: Vec<Tz> = TZ_VARIANTS
        .iter()
        .copied()
        .filter(|tz| is_canonical(tz.name()))
        .collect();

    zones.sort_by(|a, b| {
        city_name(a.name())
            .to_lowercase()
            .cmp(&city_name(b.name()).to_lowercase())
            .then_with(|| a.name().cmp(b.name()))
    });

    std::iter::once(TimeZoneEntry::None)
        .chain(zones.into_iter().map(TimeZoneEntry::Zone))
        .collect()
}

/// Case-insensitive substring search over the city portion only.
pub fn search(query: &str) -> Vec<TimeZoneEntry> {
    let all = catalog();
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return all;
    }

    all.into_iter()
        .filter(|entry| entry.city().to_lowercase().contains(&query))
        .collect()
}

/// "Local: 3:45 PM" for a contact in `zone_id`, or None if the zone is unset or unknown.
pub fn local_time_label(zone_id: Option<&str>, now: DateTime<Utc>) -> Option<String> {
    let zone_id = zone_id?;
    match TimeZoneEntry::from_id(zone_id) {
        Ok(TimeZoneEntry::Zone(tz)) => {
            Some(format!("Local: {}", now.with_timezone(&tz).format("%-I:%M %p")))
        }
        Ok(TimeZoneEntry::None) => None,
        Err(e) => {
            tracing::debug!(zone = zone_id, error = %e, "ignoring unknown time zone");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ids(entries: &[TimeZoneEntry]) -> Vec<&'static str> {
        entries.iter().map(|e| e.id()).collect()
    }

    #[test]
    fn catalog_starts_with_sentinel_and_is_sorted_by_city() {
        let entries = catalog();
        assert_eq!(entries[0], TimeZoneEntry::None);

        let cities: Vec<String> = entries[1..].iter().map(|e| e.city().to_lowercase()).collect();
        let mut sorted = cities.clone();
        sorted.sort();
        assert_eq!(cities, sorted);
    }

    #[test]
    fn catalog_only_has_region_city_ids() {
        let entries = catalog();
        for entry in &entries[1..] {
            assert!(entry.id().contains('/'), "{} is not Region/City", entry.id());
        }
        assert!(!ids(&entries).contains(&"UTC"));
        assert!(!ids(&entries).contains(&"Etc/GMT+5"));
        assert!(!ids(&entries).contains(&"US/Eastern"));
    }

    #[test]
    fn search_is_case_insensitive_on_city() {
        let found = ids(&search("lon"));
        assert!(found.contains(&"Europe/London"));
        assert!(!found.contains(&"America/New_York"));

        let found = ids(&search("LONDON"));
        assert!(found.contains(&"Europe/London"));
    }

    #[test]
    fn search_ignores_region_and_matches_spaces() {
        assert!(ids(&search("europe")).is_empty());
        assert!(ids(&search("new york")).contains(&"America/New_York"));
    }

    #[test]
    fn empty_search_returns_everything() {
        assert_eq!(search("  ").len(), catalog().len());
    }

    #[test]
    fn city_names() {
        assert_eq!(city_name("America/Argentina/Buenos_Aires"), "Buenos Aires");
        assert_eq!(city_name(NONE_TIME_ZONE), "None");
        assert_eq!(TimeZoneEntry::None.city(), "None");
    }

    #[test]
    fn from_id_accepts_sentinel_and_rejects_garbage() {
        assert_eq!(TimeZoneEntry::from_id("none").unwrap(), TimeZoneEntry::None);
        assert_eq!(
            TimeZoneEntry::from_id("Asia/Tokyo").unwrap(),
            TimeZoneEntry::Zone(chrono_tz::Asia::Tokyo)
        );
        assert!(TimeZoneEntry::from_id("Mars/Olympus_Mons").is_err());
    }

    #[test]
    fn local_time_uses_contact_zone() {
        let now = Utc.with_ymd_and_hms(2025, 1, 15, 20, 45, 0).unwrap();

        assert_eq!(
            local_time_label(Some("America/New_York"), now).as_deref(),
            Some("Local: 3:45 PM")
        );
        assert_eq!(
            local_time_label(Some("Asia/Tokyo"), now).as_deref(),
            Some("Local: 5:45 AM")
        );
        assert_eq!(local_time_label(None, now), None);
        assert_eq!(local_time_label(Some(NONE_TIME_ZONE), now), None);
        assert_eq!(local_time_label(Some("Nowhere/Special"), now), None);
    }
}
