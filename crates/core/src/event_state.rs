//! Event lifecycle state machine.
//!
//! Legal transitions:
//!
//! ```text
//! PENDING  --publish (admin)-->        PUBLISHED   (terminal)
//! PENDING  --reject (admin)-->         CANCELED
//! PENDING  --cancel review (user)-->   CANCELED
//! CANCELED --send to review (user)-->  PENDING
//! ```
//!
//! Any other requested transition is a [`CoreError::Conflict`]; the caller's
//! state is never mutated on failure.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Moderation state of an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventState {
    Pending,
    Published,
    Canceled,
}

impl EventState {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventState::Pending => "PENDING",
            EventState::Published => "PUBLISHED",
            EventState::Canceled => "CANCELED",
        }
    }
}

impl std::fmt::Display for EventState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for EventState {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(EventState::Pending),
            "PUBLISHED" => Ok(EventState::Published),
            "CANCELED" => Ok(EventState::Canceled),
            other => Err(CoreError::Validation(format!("Unknown event state: {other}"))),
        }
    }
}

impl TryFrom<String> for EventState {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// State action an event initiator may request alongside an update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserStateAction {
    SendToReview,
    CancelReview,
}

/// State action an administrator may request alongside an update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AdminStateAction {
    PublishEvent,
    RejectEvent,
}

/// Apply a user state action, returning the next state.
pub fn apply_user_action(state: EventState, action: UserStateAction) -> Result<EventState, CoreError> {
    match action {
        UserStateAction::SendToReview => {
            if state != EventState::Canceled {
                return Err(CoreError::Conflict(
                    "Only canceled events can be sent to review".into(),
                ));
            }
            Ok(EventState::Pending)
        }
        UserStateAction::CancelReview => {
            if state != EventState::Pending {
                return Err(CoreError::Conflict(
                    "Only pending events can be canceled".into(),
                ));
            }
            Ok(EventState::Canceled)
        }
    }
}

/// Apply an admin state action, returning the next state.
pub fn apply_admin_action(
    state: EventState,
    action: AdminStateAction,
) -> Result<EventState, CoreError> {
    match action {
        AdminStateAction::PublishEvent => {
            if state != EventState::Pending {
                return Err(CoreError::Conflict(
                    "Only pending events can be published".into(),
                ));
            }
            Ok(EventState::Published)
        }
        AdminStateAction::RejectEvent => {
            if state != EventState::Pending {
                return Err(CoreError::Conflict(
                    "Cannot reject an already published or canceled event".into(),
                ));
            }
            Ok(EventState::Canceled)
        }
    }
}

/// Whether the initiator may still edit the event at all.
pub fn user_may_update(state: EventState) -> bool {
    matches!(state, EventState::Pending | EventState::Canceled)
}
