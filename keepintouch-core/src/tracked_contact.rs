//! The persisted record of when a contact was last caught up with.

use std::cmp::Ordering;

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

use crate::time_zone::{NONE_TIME_ZONE, TimeZoneEntry, city_name};

/// A contact the user keeps in touch with.
///
/// `identifier` is the opaque key of the contact in the address book.
/// `last_contacted` is `None` until the first catch-up; `None` sorts
/// before every real timestamp so never-contacted people come first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackedContact {
    pub identifier: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_contacted: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,
}

impl TrackedContact {
    pub fn new(identifier: impl Into<String>) -> Self {
        TrackedContact {
            identifier: identifier.into(),
            last_contacted: None,
            time_zone: None,
        }
    }

    /// Record a catch-up at `when`; a confirmed call passes the current time.
    pub fn set_last_contacted(&mut self, when: DateTime<Utc>) {
        self.last_contacted = Some(when);
    }

    pub fn clear_last_contacted(&mut self) {
        self.last_contacted = None;
    }

    pub fn set_time_zone(&mut self, entry: &TimeZoneEntry) {
        self.time_zone = match entry {
            TimeZoneEntry::None => None,
            TimeZoneEntry::Zone(tz) => Some(tz.name().to_string()),
        };
    }

    /// Stored zone id, with the "None" sentinel treated as unset.
    pub fn time_zone_id(&self) -> Option<&str> {
        self.time_zone
            .as_deref()
            .filter(|id| !id.is_empty() && *id != NONE_TIME_ZONE)
    }

    /// "Never", or the local date formatted with `date_format`.
    pub fn last_contacted_text(&self, date_format: &str) -> String {
        match self.last_contacted {
            None => "Never".to_string(),
            Some(when) => when.with_timezone(&Local).format(date_format).to_string(),
        }
    }

    /// City part of the assigned zone, e.g. "New York", or "None".
    pub fn time_zone_city(&self) -> String {
        city_name(self.time_zone_id().unwrap_or(NONE_TIME_ZONE))
    }
}

/// Display order: least recently contacted first, then by identifier.
pub fn display_order(a: &TrackedContact, b: &TrackedContact) -> Ordering {
    a.last_contacted
        .cmp(&b.last_contacted)
        .then_with(|| a.identifier.cmp(&b.identifier))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn contacted(id: &str, day: u32) -> TrackedContact {
        let mut contact = TrackedContact::new(id);
        contact.set_last_contacted(Utc.with_ymd_and_hms(2025, 3, day, 12, 0, 0).unwrap());
        contact
    }

    #[test]
    fn never_contacted_sorts_first() {
        let mut contacts = vec![
            contacted("a", 2),
            TrackedContact::new("z"),
            contacted("b", 1),
            TrackedContact::new("m"),
        ];
        contacts.sort_by(display_order);

        let ids: Vec<_> = contacts.iter().map(|c| c.identifier.as_str()).collect();
        assert_eq!(ids, vec!["m", "z", "b", "a"]);
    }

    #[test]
    fn equal_timestamps_fall_back_to_identifier() {
        let mut contacts = vec![contacted("c", 5), contacted("a", 5), contacted("b", 5)];
        contacts.sort_by(display_order);

        let ids: Vec<_> = contacts.iter().map(|c| c.identifier.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn clearing_restores_never() {
        let mut contact = contacted("a", 1);
        contact.clear_last_contacted();

        assert_eq!(contact.last_contacted, None);
        assert_eq!(contact.last_contacted_text("%Y-%m-%d"), "Never");
    }

    #[test]
    fn none_sentinel_is_not_a_zone() {
        let mut contact = TrackedContact::new("a");
        contact.time_zone = Some(NONE_TIME_ZONE.to_string());

        assert_eq!(contact.time_zone_id(), None);
        assert_eq!(contact.time_zone_city(), "None");
    }

    #[test]
    fn assigning_zone_entries() {
        let mut contact = TrackedContact::new("a");
        contact.set_time_zone(&TimeZoneEntry::Zone(chrono_tz::America::New_York));
        assert_eq!(contact.time_zone.as_deref(), Some("America/New_York"));
        assert_eq!(contact.time_zone_city(), "New York");

        contact.set_time_zone(&TimeZoneEntry::None);
        assert_eq!(contact.time_zone, None);
    }
}
