//! Shared utilities

pub mod config;
pub mod schema;

pub use config::Settings;
pub use schema::Schema;
