//! Participation-request status rules and capacity allocation.
//!
//! The event's confirmed counter is only ever changed together with the
//! request rows inside one transaction that holds a lock on the event row,
//! so these functions can treat the counter they are handed as authoritative.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::DbId;

/// Status of a participation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RequestStatus {
    Pending,
    Confirmed,
    Rejected,
    Canceled,
}

impl RequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStatus::Pending => "PENDING",
            RequestStatus::Confirmed => "CONFIRMED",
            RequestStatus::Rejected => "REJECTED",
            RequestStatus::Canceled => "CANCELED",
        }
    }
}

impl std::fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for RequestStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(RequestStatus::Pending),
            "CONFIRMED" => Ok(RequestStatus::Confirmed),
            "REJECTED" => Ok(RequestStatus::Rejected),
            "CANCELED" => Ok(RequestStatus::Canceled),
            other => Err(CoreError::Validation(format!(
                "Unknown request status: {other}"
            ))),
        }
    }
}

impl TryFrom<String> for RequestStatus {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Initial status of a freshly made request.
///
/// Auto-confirmed when the event is unlimited or does not moderate requests;
/// otherwise it waits for the initiator's decision.
pub fn initial_status(participant_limit: i32, request_moderation: bool) -> RequestStatus {
    if participant_limit == 0 || !request_moderation {
        RequestStatus::Confirmed
    } else {
        RequestStatus::Pending
    }
}

/// Outcome of a bulk confirmation pass over pending requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Allocation {
    pub confirmed: Vec<DbId>,
    pub rejected: Vec<DbId>,
    /// New value for the event's confirmed counter.
    pub confirmed_count: i32,
}

/// Allocate confirmations for `request_ids` against remaining capacity.
///
/// Requests are confirmed in the given order until the limit is reached;
/// the excess is rejected. Fails with a conflict when the limit is already
/// exhausted before anything can be confirmed.
pub fn allocate_confirmations(
    request_ids: &[DbId],
    confirmed_count: i32,
    participant_limit: i32,
) -> Result<Allocation, CoreError> {
    if confirmed_count >= participant_limit {
        return Err(CoreError::Conflict("Participant limit reached".into()));
    }

    let mut confirmed = Vec::new();
    let mut rejected = Vec::new();
    let mut count = confirmed_count;

    for &id in request_ids {
        if count < participant_limit {
            confirmed.push(id);
            count += 1;
        } else {
            rejected.push(id);
        }
    }

    Ok(Allocation {
        confirmed,
        rejected,
        confirmed_count: count,
    })
}
