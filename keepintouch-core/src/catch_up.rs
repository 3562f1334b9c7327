//! The "did you catch up?" prompt that follows a call.
//!
//! ```text
//! Idle --CallStarted--> CallInProgress --AppForegrounded--> AwaitingConfirmation
//!   ^                                                          |
//!   +---------------------- Confirmed / Denied ----------------+
//! ```
//!
//! `CallStarted` is accepted in every state and always retargets the
//! workflow at the newest contact. Nothing times out. The state lives only
//! as long as the process.

use chrono::{DateTime, Utc};

use crate::error::{KeepInTouchError, KeepInTouchResult};
use crate::store::ContactRepository;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CatchUpState {
    #[default]
    Idle,
    CallInProgress {
        contact: String,
    },
    AwaitingConfirmation {
        contact: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatchUpEvent {
    /// A call or video call to `contact` was dispatched.
    CallStarted { contact: String },
    /// The user came back to the app.
    AppForegrounded,
    Confirmed,
    Denied,
}

/// Side effect the host has to carry out after a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatchUpEffect {
    /// Show "Did you catch up with ...?" for this contact.
    Prompt { contact: String },
    /// Set this contact's last-contacted time to now.
    MarkContacted { contact: String },
}

#[derive(Debug, Default, Clone)]
pub struct CatchUpWorkflow {
    state: CatchUpState,
}

impl CatchUpWorkflow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &CatchUpState {
        &self.state
    }

    /// Contact the workflow is currently about, if any.
    pub fn target(&self) -> Option<&str> {
        match &self.state {
            CatchUpState::Idle => None,
            CatchUpState::CallInProgress { contact }
            | CatchUpState::AwaitingConfirmation { contact } => Some(contact),
        }
    }

    /// Feed one event through the machine.
    pub fn handle(&mut self, event: CatchUpEvent) -> Option<CatchUpEffect> {
        let state = std::mem::take(&mut self.state);

        let (next, effect) = match (state, event) {
            (_, CatchUpEvent::CallStarted { contact }) => {
                (CatchUpState::CallInProgress { contact }, None)
            }
            (CatchUpState::CallInProgress { contact }, CatchUpEvent::AppForegrounded) => {
                let effect = CatchUpEffect::Prompt {
                    contact: contact.clone(),
                };
                (CatchUpState::AwaitingConfirmation { contact }, Some(effect))
            }
            (CatchUpState::AwaitingConfirmation { contact }, CatchUpEvent::Confirmed) => {
                (CatchUpState::Idle, Some(CatchUpEffect::MarkContacted { contact }))
            }
            (CatchUpState::AwaitingConfirmation { .. }, CatchUpEvent::Denied) => {
                (CatchUpState::Idle, None)
            }
            (state, event) => {
                tracing::trace!(?state, ?event, "catch-up event ignored");
                (state, None)
            }
        };

        self.state = next;
        effect
    }

    /// Answer the pending prompt and apply the result to `repo`.
    ///
    /// Returns the identifier that was marked, if any. A record deleted
    /// while the prompt was open is skipped quietly.
    pub fn answer<R>(
        &mut self,
        caught_up: bool,
        repo: &mut R,
        now: DateTime<Utc>,
    ) -> KeepInTouchResult<Option<String>>
    where
        R: ContactRepository + ?Sized,
    {
        let event = if caught_up {
            CatchUpEvent::Confirmed
        } else {
            CatchUpEvent::Denied
        };

        let Some(CatchUpEffect::MarkContacted { contact }) = self.handle(event) else {
            return Ok(None);
        };

        match repo.mark_contacted(&contact, now) {
            Ok(()) => Ok(Some(contact)),
            Err(KeepInTouchError::NotTracked(id)) => {
                tracing::debug!(identifier = %id, "contact deleted before catch-up was confirmed");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }
}
