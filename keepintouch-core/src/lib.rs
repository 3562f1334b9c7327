//! Core of keepintouch, a tracker for when you last caught up with people.
//!
//! - `store`: persisted `TrackedContact` records behind `ContactRepository`
//! - `contact_book`: read-only address book access behind `ContactBook`
//! - `resolution`: the sorted list of contacts that can be shown
//! - `catch_up`: the post-call "did you catch up?" state machine
//! - `actions`: voice/video call targets and dispatch
//! - `time_zone`: the zone catalog and city search

pub mod actions;
pub mod catch_up;
pub mod config;
pub mod contact_book;
pub mod error;
pub mod keep_in_touch;
pub mod resolution;
pub mod store;
pub mod time_zone;
pub mod tracked_contact;

pub use error::{KeepInTouchError, KeepInTouchResult};
pub use keep_in_touch::KeepInTouch;
pub use resolution::ResolvedContact;
pub use tracked_contact::TrackedContact;
