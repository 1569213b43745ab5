//! Sample plans written to a fresh store.

use planner_core::error::Result;
use planner_core::models::MediaPlan;

const SAMPLE_PLANS_JSON: &str = include_str!("../data/sample_plans.json");

/// The six sample plans shipped with the planner.
pub fn sample_plans() -> Result<Vec<MediaPlan>> {
    Ok(serde_json::from_str(SAMPLE_PLANS_JSON)?)
}
