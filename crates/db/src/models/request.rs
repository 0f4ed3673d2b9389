//! Participation-request models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use ewm_core::participation::RequestStatus;
use ewm_core::time::micros_format;
use ewm_core::types::{DbId, Timestamp};

/// A row from the `requests` table.
#[derive(Debug, Clone, FromRow)]
pub struct ParticipationRequest {
    pub id: DbId,
    pub created: Timestamp,
    pub event_id: DbId,
    pub requester_id: DbId,
    #[sqlx(try_from = "String")]
    pub status: RequestStatus,
}

impl ParticipationRequest {
    pub fn into_dto(self) -> ParticipationRequestDto {
        ParticipationRequestDto {
            id: self.id,
            created: self.created,
            event: self.event_id,
            requester: self.requester_id,
            status: self.status,
        }
    }
}

/// Wire representation of a participation request. The creation time keeps
/// microsecond precision, unlike every other date on the wire.
#[derive(Debug, Clone, Serialize)]
pub struct ParticipationRequestDto {
    pub id: DbId,
    #[serde(with = "micros_format")]
    pub created: Timestamp,
    pub event: DbId,
    pub requester: DbId,
    pub status: RequestStatus,
}

/// Target status of a bulk request-status update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StatusUpdateTarget {
    Confirmed,
    Rejected,
}

/// DTO for the initiator's bulk status decision.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRequestStatusUpdateRequest {
    pub request_ids: Vec<DbId>,
    pub status: StatusUpdateTarget,
}

/// Result of a bulk status decision.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRequestStatusUpdateResult {
    pub confirmed_requests: Vec<ParticipationRequestDto>,
    pub rejected_requests: Vec<ParticipationRequestDto>,
}
