//! Comment moderation status.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Visibility of a comment. Admin deletion hides the comment instead of
/// removing the row; author deletion removes the row outright.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CommentStatus {
    Active,
    HiddenByAdmin,
}

impl CommentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CommentStatus::Active => "ACTIVE",
            CommentStatus::HiddenByAdmin => "HIDDEN_BY_ADMIN",
        }
    }
}

impl std::fmt::Display for CommentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for CommentStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ACTIVE" => Ok(CommentStatus::Active),
            "HIDDEN_BY_ADMIN" => Ok(CommentStatus::HiddenByAdmin),
            other => Err(CoreError::Validation(format!(
                "Unknown comment status: {other}"
            ))),
        }
    }
}

impl TryFrom<String> for CommentStatus {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
