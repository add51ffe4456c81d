//! CLI command handlers.

pub mod breeds;
pub mod browse;
pub mod config;
pub mod search;
