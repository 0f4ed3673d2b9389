//! HTTP handlers, one module per resource.

pub mod categories;
pub mod comments;
pub mod compilations;
pub mod events;
pub mod health;
pub mod requests;
pub mod users;
