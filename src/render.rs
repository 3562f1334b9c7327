//! Terminal rendering for keepintouch types.

use chrono::{DateTime, Utc};
use keepintouch_core::ResolvedContact;
use keepintouch_core::actions::{CallKind, call_targets};
use keepintouch_core::time_zone::local_time_label;
use owo_colors::OwoColorize;

/// The plain text of one list row, before styling.
#[derive(Debug, PartialEq, Eq)]
pub struct ContactRow {
    pub name: String,
    pub local_time: Option<String>,
    pub caught_up: String,
    pub can_call: bool,
    pub can_video: bool,
}

impl ContactRow {
    pub fn new(resolved: &ResolvedContact, date_format: &str, now: DateTime<Utc>) -> Self {
        ContactRow {
            name: resolved.display_name(),
            local_time: local_time_label(resolved.tracked.time_zone_id(), now),
            caught_up: format!("Caught up: {}", resolved.tracked.last_contacted_text(date_format)),
            can_call: !call_targets(&resolved.contact, CallKind::Voice).is_empty(),
            can_video: !call_targets(&resolved.contact, CallKind::Video).is_empty(),
        }
    }

    pub fn render(&self) -> String {
        let mut first = format!("{}", self.name.bold());
        if let Some(local) = &self.local_time {
            first.push_str(&format!("  {}", local.dimmed()));
        }

        format!(
            "{}\n   {}   {} {}",
            first,
            self.caught_up,
            action_badge("call", self.can_call),
            action_badge("video", self.can_video),
        )
    }
}

/// Green when the action has somewhere to go, gray otherwise.
fn action_badge(label: &str, available: bool) -> String {
    if available {
        label.green().to_string()
    } else {
        label.bright_black().to_string()
    }
}

/// Header of the detail/edit view.
pub fn contact_header(resolved: &ResolvedContact) -> String {
    format!("{}", resolved.display_name().bold())
}

pub fn pluralize(word: &str, count: usize) -> String {
    if count == 1 {
        word.to_string()
    } else {
        format!("{word}s")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use keepintouch_core::TrackedContact;
    use keepintouch_core::contact_book::ExternalContact;

    fn resolved(phones: &[&str], emails: &[&str]) -> ResolvedContact {
        let mut tracked = TrackedContact::new("ada");
        tracked.time_zone = Some("Europe/London".into());
        ResolvedContact {
            tracked,
            contact: ExternalContact {
                identifier: "ada".into(),
                given_name: "Ada".into(),
                family_name: "Lovelace".into(),
                phone_numbers: phones.iter().map(|s| s.to_string()).collect(),
                email_addresses: emails.iter().map(|s| s.to_string()).collect(),
            },
        }
    }

    #[test]
    fn row_for_never_contacted() {
        let now = Utc.with_ymd_and_hms(2025, 1, 15, 9, 5, 0).unwrap();
        let row = ContactRow::new(&resolved(&[], &["ada@example.com"]), "%Y-%m-%d", now);

        assert_eq!(
            row,
            ContactRow {
                name: "Ada Lovelace".into(),
                local_time: Some("Local: 9:05 AM".into()),
                caught_up: "Caught up: Never".into(),
                can_call: false,
                can_video: true,
            }
        );
        assert!(row.render().contains("Caught up: Never"));
    }

    #[test]
    fn plurals() {
        assert_eq!(pluralize("contact", 1), "contact");
        assert_eq!(pluralize("contact", 3), "contacts");
    }
}
