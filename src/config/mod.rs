//! Configuration module.

pub mod loader;
pub mod schema;

pub use loader::{load_config, parse_config};
pub use schema::{ProbeConfig, FD_SETSIZE, MAX_EVENTS_LIMIT};
