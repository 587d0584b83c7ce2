// forum-stats: statistics dashboard for Discourse forums.
// Caching API client, topic window aggregation and a terminal UI over them.

pub mod app;
pub mod cache;
pub mod config;
pub mod discourse;
pub mod error;
pub mod state;
pub mod table;
pub mod telemetry;
pub mod ui;

pub use error::{ForumError, Result};
