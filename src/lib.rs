//! # `homely`
//!
//! Home maintenance tracking: task lifecycle with recurrence, points and
//! badges, derived notifications, and local SQLite persistence.

pub mod app;
pub mod badges;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod error;
pub mod id;
pub mod lifecycle;
pub mod models;
pub mod notifications;
pub mod paths;
pub mod points;
pub mod recurrence;
pub mod state;
pub mod store;
pub mod suggest;
pub mod sync;
pub mod testing;

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
