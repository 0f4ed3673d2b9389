//! Row models and request/response DTOs.
//!
//! Each module holds the entity structs (database rows) for one table
//! together with the DTOs of the endpoints that touch it.

pub mod category;
pub mod comment;
pub mod compilation;
pub mod event;
pub mod request;
pub mod user;
