//! Voice and video call targets for a contact, and dispatching them.

use url::Url;

use crate::catch_up::{CatchUpEvent, CatchUpWorkflow};
use crate::config::KeepInTouchConfig;
use crate::contact_book::ExternalContact;
use crate::error::{KeepInTouchError, KeepInTouchResult};

pub const NO_PHONE_NUMBERS: &str =
    "No phone numbers found for this contact. Try adding one in your address book!";
pub const NO_VIDEO_ADDRESSES: &str =
    "No video call addresses found for this contact. Try adding one in your address book!";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallKind {
    Voice,
    Video,
}

/// A video call candidate: what to show, and the address to call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoTarget {
    pub label: String,
    pub address: String,
}

/// A target the user can pick for a call of a given kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallTarget {
    pub kind: CallKind,
    pub label: String,
    pub address: String,
}

/// Every phone number, verbatim. Whether it is callable is decided at dispatch.
pub fn phone_targets(contact: &ExternalContact) -> Vec<String> {
    contact.phone_numbers.clone()
}

/// Phone numbers reduced to their digits, followed by email addresses as-is.
pub fn video_targets(contact: &ExternalContact) -> Vec<VideoTarget> {
    let phones = contact.phone_numbers.iter().map(|number| VideoTarget {
        label: number.clone(),
        address: digits_only(number),
    });
    let emails = contact.email_addresses.iter().map(|email| VideoTarget {
        label: email.clone(),
        address: email.clone(),
    });

    phones.chain(emails).collect()
}

/// Targets for `kind`, in the order they are offered to the user.
pub fn call_targets(contact: &ExternalContact, kind: CallKind) -> Vec<CallTarget> {
    match kind {
        CallKind::Voice => phone_targets(contact)
            .into_iter()
            .map(|number| CallTarget {
                kind,
                label: number.clone(),
                address: number,
            })
            .collect(),
        CallKind::Video => video_targets(contact)
            .into_iter()
            .map(|target| CallTarget {
                kind,
                label: target.label,
                address: target.address,
            })
            .collect(),
    }
}

fn digits_only(number: &str) -> String {
    number.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Hands a call target to whatever can place the call.
pub trait Dispatcher {
    fn dispatch(&self, kind: CallKind, address: &str) -> KeepInTouchResult<()>;
}

/// Opens `<scheme>://<address>` with the platform's URL handler.
#[derive(Debug, Clone)]
pub struct SystemDispatcher {
    voice_scheme: String,
    video_scheme: String,
}

impl SystemDispatcher {
    pub fn new(voice_scheme: impl Into<String>, video_scheme: impl Into<String>) -> Self {
        SystemDispatcher {
            voice_scheme: voice_scheme.into(),
            video_scheme: video_scheme.into(),
        }
    }

    pub fn from_config(config: &KeepInTouchConfig) -> Self {
        Self::new(&config.voice_scheme, &config.video_scheme)
    }

    /// The URL a target is opened as. Fails if it is not a valid URL.
    ///
    /// Whitespace is dropped from voice targets; anything else invalid in a
    /// URL host ("<", "|", ...) makes the target uncallable.
    pub fn url_for(&self, kind: CallKind, address: &str) -> KeepInTouchResult<Url> {
        let raw = match kind {
            CallKind::Voice => {
                let number: String = address.split_whitespace().collect();
                format!("{}://{number}", self.voice_scheme)
            }
            CallKind::Video => format!("{}://{address}", self.video_scheme),
        };

        Url::parse(&raw).map_err(|e| KeepInTouchError::Dispatch(format!("Cannot call {raw}: {e}")))
    }
}

impl Dispatcher for SystemDispatcher {
    fn dispatch(&self, kind: CallKind, address: &str) -> KeepInTouchResult<()> {
        let url = self.url_for(kind, address)?;
        open::that(url.as_str())
            .map_err(|e| KeepInTouchError::Dispatch(format!("Cannot call {url}: {e}")))
    }
}

/// Try to place a call. On success the workflow learns a call started;
/// on failure only a warning is logged.
///
/// Returns whether the call was handed off.
pub fn place_call<D>(
    dispatcher: &D,
    workflow: &mut CatchUpWorkflow,
    identifier: &str,
    target: &CallTarget,
) -> bool
where
    D: Dispatcher + ?Sized,
{
    match dispatcher.dispatch(target.kind, &target.address) {
        Ok(()) => {
            tracing::info!(identifier, kind = ?target.kind, "call dispatched");
            workflow.handle(CatchUpEvent::CallStarted {
                contact: identifier.to_string(),
            });
            true
        }
        Err(e) => {
            tracing::warn!(identifier, error = %e, "could not dispatch call");
            false
        }
    }
}
