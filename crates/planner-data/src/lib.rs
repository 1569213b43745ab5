//! Local persistence for the media planner.
//!
//! Keeps the plan list in a JSON file (the analogue of the browser's local
//! storage), seeds it with sample plans on first use, and provides the list
//! filtering and portfolio totals used by the plan list view.

pub mod query;
pub mod seed;
pub mod store;

pub use planner_core as core;
