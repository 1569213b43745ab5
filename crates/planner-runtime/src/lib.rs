//! Runtime layer for the media planner.
//!
//! Plays the scripted assistant back in real time on a tokio task so the
//! chat front end only has to forward user text and print events.

pub mod assistant;

pub use planner_core as core;
