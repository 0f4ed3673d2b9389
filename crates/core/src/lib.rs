//! Framework-free domain logic shared by the main and stats services.

pub mod comment;
pub mod error;
pub mod event_state;
pub mod pagination;
pub mod participation;
pub mod stats;
pub mod time;
pub mod types;

/// Application name reported to the stats service on every recorded hit.
pub const APP_NAME: &str = "ewm-main";
