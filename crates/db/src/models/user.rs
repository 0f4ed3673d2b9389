//! User models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use ewm_core::types::DbId;

/// A row from the `users` table; doubles as the full user DTO.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub id: DbId,
    pub name: String,
    pub email: String,
}

/// Abbreviated user view embedded in event DTOs.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct UserShortDto {
    pub id: DbId,
    pub name: String,
}

/// DTO for registering a new user.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewUserRequest {
    #[validate(length(min = 2, max = 250))]
    pub name: String,
    #[validate(email, length(min = 6, max = 254))]
    pub email: String,
}
