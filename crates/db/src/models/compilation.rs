//! Compilation models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use ewm_core::types::DbId;

use crate::models::event::EventShortDto;

/// A row from the `compilations` table.
#[derive(Debug, Clone, FromRow)]
pub struct Compilation {
    pub id: DbId,
    pub title: String,
    pub pinned: bool,
}

/// Wire representation of a compilation with its member events.
#[derive(Debug, Clone, Serialize)]
pub struct CompilationDto {
    pub id: DbId,
    pub title: String,
    pub pinned: bool,
    pub events: Vec<EventShortDto>,
}

/// DTO for creating a compilation.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewCompilationDto {
    #[validate(length(min = 1, max = 50))]
    pub title: String,
    #[serde(default)]
    pub pinned: bool,
    #[serde(default)]
    pub events: Vec<DbId>,
}

/// DTO for partially updating a compilation. A supplied `events` list
/// replaces the membership wholesale.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateCompilationRequest {
    #[validate(length(min = 1, max = 50))]
    pub title: Option<String>,
    pub pinned: Option<bool>,
    pub events: Option<Vec<DbId>>,
}
