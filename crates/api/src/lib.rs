//! Main event service library.
//!
//! Exposes the building blocks (config, state, error handling, routes,
//! stats client) so integration tests and the binary entrypoint can both
//! access them.

pub mod config;
pub mod error;
pub mod handlers;
pub mod query;
pub mod router;
pub mod routes;
pub mod state;
pub mod stats_client;
