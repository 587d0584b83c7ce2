// State management module.
// Dashboard panel state and the aggregations its charts draw from.

pub mod dashboard;
pub mod stats;

pub use dashboard::{DashboardState, LoadingState};
