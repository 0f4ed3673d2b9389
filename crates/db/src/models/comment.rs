//! Comment models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use ewm_core::comment::CommentStatus;
use ewm_core::error::CoreError;
use ewm_core::time::date_format;
use ewm_core::types::{DbId, Timestamp};

/// A `comments` row joined with the author's name.
#[derive(Debug, Clone, FromRow)]
pub struct CommentRecord {
    pub id: DbId,
    pub text: String,
    pub event_id: DbId,
    pub author_id: DbId,
    pub author_name: String,
    pub created_on: Timestamp,
    #[sqlx(try_from = "String")]
    pub status: CommentStatus,
}

impl CommentRecord {
    pub fn into_dto(self) -> CommentDto {
        CommentDto {
            id: self.id,
            text: self.text,
            author_name: self.author_name,
            event_id: self.event_id,
            created: self.created_on,
        }
    }
}

/// Wire representation of a comment.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentDto {
    pub id: DbId,
    pub text: String,
    pub author_name: String,
    pub event_id: DbId,
    #[serde(with = "date_format")]
    pub created: Timestamp,
}

/// DTO for creating or editing a comment.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewCommentDto {
    #[validate(length(min = 1, max = 2000))]
    pub text: String,
}

/// Sort direction of the admin comment search, applied to creation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentSort {
    Asc,
    Desc,
}

impl CommentSort {
    pub fn sql(self) -> &'static str {
        match self {
            CommentSort::Asc => "ASC",
            CommentSort::Desc => "DESC",
        }
    }
}

impl std::str::FromStr for CommentSort {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ASC" => Ok(CommentSort::Asc),
            "DESC" => Ok(CommentSort::Desc),
            other => Err(CoreError::Validation(format!("Unknown sort: {other}"))),
        }
    }
}

/// Admin comment search filter.
#[derive(Debug, Clone)]
pub struct AdminCommentFilter {
    pub user_ids: Option<Vec<DbId>>,
    pub event_ids: Option<Vec<DbId>>,
    pub comment_ids: Option<Vec<DbId>>,
    pub text: Option<String>,
    pub range_start: Timestamp,
    pub range_end: Timestamp,
    pub sort: CommentSort,
    pub offset: i64,
    pub limit: i64,
}
