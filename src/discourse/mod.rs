// Discourse API module.
// Client, cached endpoints, category resolution and the topic window aggregator.

pub mod aggregate;
pub mod categories;
pub mod client;
pub mod forum;
pub mod types;
pub mod window;

#[cfg(test)]
pub(crate) mod testing;

pub use aggregate::TopicWindow;
pub use categories::{CategoryIndex, CategoryTable};
pub use client::{DiscourseClient, Fetch, RawResponse};
pub use forum::Forum;
pub use types::*;
pub use window::{LOOKBACK_DAYS, LookbackWindow};
