//! Minimal vCard (2.1 / 3.0 / 4.0) reader.
//!
//! Only the properties this app displays are extracted: UID, N, FN, TEL
//! and EMAIL. Everything else is skipped.

use crate::error::{KeepInTouchError, KeepInTouchResult};

/// A parsed card, before an identifier has been settled on.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VCard {
    pub uid: Option<String>,
    pub formatted_name: Option<String>,
    pub given_name: String,
    pub family_name: String,
    pub phone_numbers: Vec<String>,
    pub email_addresses: Vec<String>,
}

/// Parse every `BEGIN:VCARD` .. `END:VCARD` block in `content`.
pub fn parse_vcards(content: &str) -> KeepInTouchResult<Vec<VCard>> {
    let mut cards = Vec::new();
    let mut current: Option<VCard> = None;

    for line in unfold(content) {
        let Some((name, value)) = split_property(&line) else {
            continue;
        };

        let is_vcard = value.trim().eq_ignore_ascii_case("VCARD");

        match (name.as_str(), current.is_some()) {
            ("BEGIN", false) if is_vcard => current = Some(VCard::default()),
            ("BEGIN", true) if is_vcard => {
                return Err(KeepInTouchError::VCard("nested BEGIN:VCARD".into()));
            }
            ("END", true) if is_vcard => cards.extend(current.take()),
            ("END", false) if is_vcard => {
                return Err(KeepInTouchError::VCard("END:VCARD without BEGIN".into()));
            }
            _ => {
                if let Some(card) = current.as_mut() {
                    apply_property(card, &name, value);
                }
            }
        }
    }

    if current.is_some() {
        return Err(KeepInTouchError::VCard("missing END:VCARD".into()));
    }

    Ok(cards)
}

fn apply_property(card: &mut VCard, name: &str, value: &str) {
    match name {
        "UID" => {
            let uid = unescape(value);
            if !uid.is_empty() {
                card.uid = Some(uid);
            }
        }
        "FN" => card.formatted_name = Some(unescape(value)),
        "N" => {
            let mut parts = split_unescaped(value, ';').into_iter();
            card.family_name = parts.next().unwrap_or_default();
            card.given_name = parts.next().unwrap_or_default();
        }
        "TEL" => {
            let number = unescape(value);
            let number = number.strip_prefix("tel:").unwrap_or(&number).trim().to_string();
            if !number.is_empty() {
                card.phone_numbers.push(number);
            }
        }
        "EMAIL" => {
            let email = unescape(value).trim().to_string();
            if !email.is_empty() {
                card.email_addresses.push(email);
            }
        }
        _ => {}
    }
}

/// Join continuation lines (leading space or tab) onto the previous line.
fn unfold(content: &str) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();

    for raw in content.lines() {
        let raw = raw.trim_end_matches('\r');
        match (raw.strip_prefix([' ', '\t']), lines.last_mut()) {
            (Some(rest), Some(last)) => last.push_str(rest),
            _ => {
                if !raw.trim().is_empty() {
                    lines.push(raw.to_string());
                }
            }
        }
    }

    lines
}

/// Split `item1.TEL;TYPE=CELL:+1 555` into ("TEL", "+1 555").
/// The property name is upper-cased and stripped of its group and parameters.
fn split_property(line: &str) -> Option<(String, &str)> {
    let mut in_quotes = false;
    let colon = line.char_indices().find_map(|(i, c)| match c {
        '"' => {
            in_quotes = !in_quotes;
            None
        }
        ':' if !in_quotes => Some(i),
        _ => None,
    })?;

    let (head, value) = (&line[..colon], &line[colon + 1..]);
    let name = head.split(';').next().unwrap_or(head);
    let name = name.rsplit('.').next().unwrap_or(name);

    Some((name.trim().to_ascii_uppercase(), value))
}

fn split_unescaped(value: &str, separator: char) -> Vec<String> {
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut chars = value.chars();

    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                current.push(c);
                current.extend(chars.next());
            }
            c if c == separator => parts.push(unescape(&std::mem::take(&mut current))),
            c => current.push(c),
        }
    }
    parts.push(unescape(&current));
    parts
}

fn unescape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n' | 'N') => out.push('\n'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }

    out
}
