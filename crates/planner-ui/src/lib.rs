//! Terminal UI layer for the media planner.
//!
//! Provides themes, the header, allocation slider and status line
//! components, the plan list, plan detail and budget editor screens, and the
//! application event loop built on [`ratatui`].

pub mod app;
pub mod budget_view;
pub mod components;
pub mod plan_detail;
pub mod plan_list;
pub mod themes;

pub use planner_core as core;
