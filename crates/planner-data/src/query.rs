use std::collections::BTreeMap;

use planner_core::models::{MediaPlan, PlanStatus};

// ── PlanFilter ────────────────────────────────────────────────────────────────

/// Client-name search plus an optional status filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlanFilter {
    pub search: String,
    /// `None` shows every status.
    pub status: Option<PlanStatus>,
}

impl PlanFilter {
    pub fn new(search: impl Into<String>, status: Option<PlanStatus>) -> Self {
        Self {
            search: search.into(),
            status,
        }
    }

    /// Case-insensitive substring match on the client name, and the status
    /// filter when one is set.
    pub fn matches(&self, plan: &MediaPlan) -> bool {
        let matches_search = plan
            .client_name
            .to_lowercase()
            .contains(&self.search.to_lowercase());
        let matches_status = self.status.map_or(true, |s| plan.status == s);
        matches_search && matches_status
    }

    pub fn apply<'a>(&self, plans: &'a [MediaPlan]) -> Vec<&'a MediaPlan> {
        plans.iter().filter(|p| self.matches(p)).collect()
    }

    /// Step the status filter: all → draft → … → completed → all.
    pub fn cycle_status(&mut self) {
        self.status = match self.status {
            None => Some(PlanStatus::ALL[0]),
            Some(current) => PlanStatus::ALL
                .iter()
                .position(|s| *s == current)
                .and_then(|i| PlanStatus::ALL.get(i + 1))
                .copied(),
        };
    }

    /// `"All Statuses"` or the status label.
    pub fn status_label(&self) -> String {
        match self.status {
            None => "All Statuses".to_string(),
            Some(s) => s.label(),
        }
    }
}

// ── PortfolioTotals ───────────────────────────────────────────────────────────

/// Headline numbers for a set of plans.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PortfolioTotals {
    pub plan_count: usize,
    /// Sum of the budgets of plans that have one.
    pub total_budget: f64,
    pub by_status: BTreeMap<PlanStatus, usize>,
}

impl PortfolioTotals {
    pub fn of<'a>(plans: impl IntoIterator<Item = &'a MediaPlan>) -> Self {
        let mut totals = Self::default();
        for plan in plans {
            totals.plan_count += 1;
            totals.total_budget += plan.total_budget().unwrap_or(0.0);
            *totals.by_status.entry(plan.status).or_insert(0) += 1;
        }
        totals
    }

    pub fn count(&self, status: PlanStatus) -> usize {
        self.by_status.get(&status).copied().unwrap_or(0)
    }
}
