//! Domain layer for the media planner.
//!
//! Holds the plan model, the budget reallocation rules, the channel cost
//! table and catalog, fixed recommendations, the creation wizard, the
//! scripted assistant and the CLI settings shared by the other crates.

pub mod budget;
pub mod channels;
pub mod chat;
pub mod error;
pub mod formatting;
pub mod models;
pub mod notifications;
pub mod recommendations;
pub mod regions;
pub mod settings;
pub mod timeline;
pub mod wizard;

pub use budget::{BudgetState, ChannelAllocation, EditPolicy, Reallocation};
pub use error::{PlannerError, Result, ValidationError};
pub use models::MediaPlan;
pub use notifications::{Notice, NoticeLevel};
