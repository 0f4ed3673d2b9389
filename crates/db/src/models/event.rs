//! Event models, DTOs, and search filters.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use ewm_core::error::CoreError;
use ewm_core::event_state::{AdminStateAction, EventState, UserStateAction};
use ewm_core::time::{date_format, date_format_opt};
use ewm_core::types::{DbId, Timestamp};

use crate::models::category::Category;
use crate::models::user::UserShortDto;

/// Geographic location of an event.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Location {
    pub lat: f64,
    pub lon: f64,
}

/// An `events` row joined with its category and initiator names.
#[derive(Debug, Clone, FromRow)]
pub struct EventRecord {
    pub id: DbId,
    pub annotation: String,
    pub category_id: DbId,
    pub category_name: String,
    pub confirmed_requests: i32,
    pub created_on: Timestamp,
    pub description: String,
    pub event_date: Timestamp,
    pub initiator_id: DbId,
    pub initiator_name: String,
    pub lat: f64,
    pub lon: f64,
    pub paid: bool,
    pub participant_limit: i32,
    pub published_on: Option<Timestamp>,
    pub request_moderation: bool,
    #[sqlx(try_from = "String")]
    pub state: EventState,
    pub title: String,
}

impl EventRecord {
    /// Assemble the full DTO, attaching the view count supplied by the
    /// stats service.
    pub fn into_full(self, views: i64) -> EventFullDto {
        EventFullDto {
            id: self.id,
            annotation: self.annotation,
            category: Category {
                id: self.category_id,
                name: self.category_name,
            },
            confirmed_requests: self.confirmed_requests,
            created_on: self.created_on,
            description: self.description,
            event_date: self.event_date,
            initiator: UserShortDto {
                id: self.initiator_id,
                name: self.initiator_name,
            },
            location: Location {
                lat: self.lat,
                lon: self.lon,
            },
            paid: self.paid,
            participant_limit: self.participant_limit,
            published_on: self.published_on,
            request_moderation: self.request_moderation,
            state: self.state,
            title: self.title,
            views,
        }
    }

    /// Assemble the abbreviated DTO used in listings and compilations.
    pub fn into_short(self, views: i64) -> EventShortDto {
        EventShortDto {
            id: self.id,
            annotation: self.annotation,
            category: Category {
                id: self.category_id,
                name: self.category_name,
            },
            confirmed_requests: self.confirmed_requests,
            event_date: self.event_date,
            initiator: UserShortDto {
                id: self.initiator_id,
                name: self.initiator_name,
            },
            paid: self.paid,
            title: self.title,
            views,
        }
    }
}

/// Full event representation returned to initiators and admins.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventFullDto {
    pub id: DbId,
    pub annotation: String,
    pub category: Category,
    pub confirmed_requests: i32,
    #[serde(with = "date_format")]
    pub created_on: Timestamp,
    pub description: String,
    #[serde(with = "date_format")]
    pub event_date: Timestamp,
    pub initiator: UserShortDto,
    pub location: Location,
    pub paid: bool,
    pub participant_limit: i32,
    #[serde(with = "date_format_opt")]
    pub published_on: Option<Timestamp>,
    pub request_moderation: bool,
    pub state: EventState,
    pub title: String,
    pub views: i64,
}

/// Abbreviated event representation used in public listings.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventShortDto {
    pub id: DbId,
    pub annotation: String,
    pub category: Category,
    pub confirmed_requests: i32,
    #[serde(with = "date_format")]
    pub event_date: Timestamp,
    pub initiator: UserShortDto,
    pub paid: bool,
    pub title: String,
    pub views: i64,
}

fn default_true() -> bool {
    true
}

/// DTO for creating an event.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewEventDto {
    #[validate(length(min = 20, max = 2000))]
    pub annotation: String,
    pub category: DbId,
    #[validate(length(min = 20, max = 7000))]
    pub description: String,
    #[serde(with = "date_format")]
    pub event_date: Timestamp,
    pub location: Location,
    #[serde(default)]
    pub paid: bool,
    #[serde(default)]
    #[validate(range(min = 0))]
    pub participant_limit: i32,
    #[serde(default = "default_true")]
    pub request_moderation: bool,
    #[validate(length(min = 3, max = 120))]
    pub title: String,
}

/// DTO for the initiator's partial event update.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEventUserRequest {
    #[validate(length(min = 20, max = 2000))]
    pub annotation: Option<String>,
    pub category: Option<DbId>,
    #[validate(length(min = 20, max = 7000))]
    pub description: Option<String>,
    #[serde(default, with = "date_format_opt")]
    pub event_date: Option<Timestamp>,
    pub location: Option<Location>,
    pub paid: Option<bool>,
    #[validate(range(min = 0))]
    pub participant_limit: Option<i32>,
    pub request_moderation: Option<bool>,
    pub state_action: Option<UserStateAction>,
    #[validate(length(min = 3, max = 120))]
    pub title: Option<String>,
}

/// DTO for the admin's partial event update.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEventAdminRequest {
    #[validate(length(min = 20, max = 2000))]
    pub annotation: Option<String>,
    pub category: Option<DbId>,
    #[validate(length(min = 20, max = 7000))]
    pub description: Option<String>,
    #[serde(default, with = "date_format_opt")]
    pub event_date: Option<Timestamp>,
    pub location: Option<Location>,
    pub paid: Option<bool>,
    #[validate(range(min = 0))]
    pub participant_limit: Option<i32>,
    pub request_moderation: Option<bool>,
    pub state_action: Option<AdminStateAction>,
    #[validate(length(min = 3, max = 120))]
    pub title: Option<String>,
}

/// Column set shared by the update DTOs, already validated by the handler.
#[derive(Debug, Clone, Default)]
pub struct EventPatch {
    pub annotation: Option<String>,
    pub category: Option<DbId>,
    pub description: Option<String>,
    pub event_date: Option<Timestamp>,
    pub location: Option<Location>,
    pub paid: Option<bool>,
    pub participant_limit: Option<i32>,
    pub request_moderation: Option<bool>,
    pub title: Option<String>,
    pub state: Option<EventState>,
    pub published_on: Option<Timestamp>,
}

impl From<UpdateEventUserRequest> for EventPatch {
    fn from(dto: UpdateEventUserRequest) -> Self {
        EventPatch {
            annotation: dto.annotation,
            category: dto.category,
            description: dto.description,
            event_date: dto.event_date,
            location: dto.location,
            paid: dto.paid,
            participant_limit: dto.participant_limit,
            request_moderation: dto.request_moderation,
            title: dto.title,
            ..EventPatch::default()
        }
    }
}

impl From<UpdateEventAdminRequest> for EventPatch {
    fn from(dto: UpdateEventAdminRequest) -> Self {
        EventPatch {
            annotation: dto.annotation,
            category: dto.category,
            description: dto.description,
            event_date: dto.event_date,
            location: dto.location,
            paid: dto.paid,
            participant_limit: dto.participant_limit,
            request_moderation: dto.request_moderation,
            title: dto.title,
            ..EventPatch::default()
        }
    }
}

/// Capacity-relevant columns fetched under `FOR UPDATE` while a transaction
/// mutates requests against the event.
#[derive(Debug, Clone, FromRow)]
pub struct EventCapacity {
    pub id: DbId,
    pub initiator_id: DbId,
    pub participant_limit: i32,
    pub request_moderation: bool,
    pub confirmed_requests: i32,
    #[sqlx(try_from = "String")]
    pub state: EventState,
}

/// Admin event search filter.
#[derive(Debug, Clone)]
pub struct AdminEventFilter {
    pub users: Option<Vec<DbId>>,
    pub states: Option<Vec<EventState>>,
    pub categories: Option<Vec<DbId>>,
    pub range_start: Timestamp,
    pub range_end: Timestamp,
    pub offset: i64,
    pub limit: i64,
}

/// Public event search filter; only published events are considered.
#[derive(Debug, Clone)]
pub struct PublicEventFilter {
    pub text: Option<String>,
    pub categories: Option<Vec<DbId>>,
    pub paid: Option<bool>,
    pub range_start: Timestamp,
    pub range_end: Timestamp,
    pub only_available: bool,
    pub offset: i64,
    pub limit: i64,
}

/// Sort order for the public event search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventSort {
    EventDate,
    Views,
}

impl std::str::FromStr for EventSort {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "EVENT_DATE" => Ok(EventSort::EventDate),
            "VIEWS" => Ok(EventSort::Views),
            other => Err(CoreError::Validation(format!("Unknown sort: {other}"))),
        }
    }
}
