//! Category models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use ewm_core::types::DbId;

/// A row from the `categories` table; doubles as the category DTO.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Category {
    pub id: DbId,
    pub name: String,
}

/// DTO for creating or renaming a category.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewCategoryDto {
    #[validate(length(min = 1, max = 50))]
    pub name: String,
}
