//! The seven-step plan creation flow.
//!
//! [`WizardSession`] owns the draft [`MediaPlan`] while it is being filled
//! in. Every setter refreshes `updated_at`; channel and duration changes
//! regenerate the budget from the cost table.

use std::fmt;

use chrono::{NaiveDate, Utc};

use crate::budget::{BudgetState, EditPolicy};
use crate::error::{FieldError, PlannerError, Result};
use crate::models::{
    Channel, Country, DateRange, DemographicCategory, Industry, KpiGoal, MediaPlan, PlanStatus,
    ProductType,
};
use crate::notifications::Notice;
use crate::recommendations::{recommended_channels, recommended_regions};
use crate::regions::{toggle_region, GermanRegion};
use crate::timeline;

// ── WizardStep ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum WizardStep {
    BasicInfo,
    Goals,
    Timeline,
    Channels,
    Targeting,
    Budget,
    Summary,
}

impl WizardStep {
    pub const ALL: [WizardStep; 7] = [
        WizardStep::BasicInfo,
        WizardStep::Goals,
        WizardStep::Timeline,
        WizardStep::Channels,
        WizardStep::Targeting,
        WizardStep::Budget,
        WizardStep::Summary,
    ];

    /// 1-based position, as shown in the progress indicator.
    pub fn number(&self) -> usize {
        *self as usize + 1
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            WizardStep::BasicInfo => "basic info",
            WizardStep::Goals => "goals",
            WizardStep::Timeline => "timeline",
            WizardStep::Channels => "channels",
            WizardStep::Targeting => "targeting",
            WizardStep::Budget => "budget",
            WizardStep::Summary => "summary",
        }
    }

    pub fn next(&self) -> Option<WizardStep> {
        Self::ALL.get(self.number()).copied()
    }

    pub fn previous(&self) -> Option<WizardStep> {
        (*self as usize).checked_sub(1).map(|i| Self::ALL[i])
    }
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Step {} of {}: {}", self.number(), Self::ALL.len(), self.as_str())
    }
}

// ── WizardSession ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct WizardSession {
    step: WizardStep,
    plan: MediaPlan,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
    policy: EditPolicy,
}

impl Default for WizardSession {
    fn default() -> Self {
        Self::new(EditPolicy::default())
    }
}

impl WizardSession {
    pub fn new(policy: EditPolicy) -> Self {
        Self {
            step: WizardStep::BasicInfo,
            plan: MediaPlan::new_draft(),
            start_date: None,
            end_date: None,
            policy,
        }
    }

    /// Reopen an existing plan for editing, starting at the first step.
    pub fn from_plan(plan: MediaPlan, policy: EditPolicy) -> Self {
        let (start_date, end_date) = match plan.date_range {
            Some(r) => (Some(r.start), Some(r.end)),
            None => (None, None),
        };
        Self {
            step: WizardStep::BasicInfo,
            plan,
            start_date,
            end_date,
            policy,
        }
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn plan(&self) -> &MediaPlan {
        &self.plan
    }

    pub fn policy(&self) -> EditPolicy {
        self.policy
    }

    pub fn duration_months(&self) -> u32 {
        timeline::duration_months(self.plan.date_range.as_ref())
    }

    // ── Form updates ──────────────────────────────────────────────────────────

    pub fn set_client_name(&mut self, name: impl Into<String>) {
        self.plan.client_name = name.into();
        self.plan.touch();
    }

    pub fn set_product_type(&mut self, product_type: ProductType) {
        self.plan.product_type = Some(product_type);
        self.plan.touch();
    }

    pub fn set_industry(&mut self, industry: Industry) {
        self.plan.industry = Some(industry);
        self.plan.touch();
    }

    /// Returns `true` when the goal is selected afterwards.
    pub fn toggle_kpi_goal(&mut self, goal: KpiGoal) -> bool {
        let selected = match self.plan.kpi_goals.iter().position(|g| *g == goal) {
            Some(pos) => {
                self.plan.kpi_goals.remove(pos);
                false
            }
            None => {
                self.plan.kpi_goals.push(goal);
                true
            }
        };
        self.plan.touch();
        selected
    }

    pub fn set_country(&mut self, country: Country) {
        self.plan.country = Some(country);
        self.plan.touch();
    }

    pub fn set_start_date(&mut self, date: Option<NaiveDate>) {
        self.start_date = date;
        self.sync_date_range();
    }

    pub fn set_end_date(&mut self, date: Option<NaiveDate>) {
        self.end_date = date;
        self.sync_date_range();
    }

    fn sync_date_range(&mut self) {
        let months_before = self.duration_months();
        self.plan.date_range = match (self.start_date, self.end_date) {
            (Some(start), Some(end)) => Some(DateRange { start, end }),
            _ => None,
        };
        self.plan.touch();
        if self.duration_months() != months_before {
            self.refresh_budget();
        }
    }

    /// Returns `true` when the channel is selected afterwards.
    pub fn toggle_channel(&mut self, channel: Channel) -> bool {
        let selected = match self.plan.channels.iter().position(|c| *c == channel) {
            Some(pos) => {
                self.plan.channels.remove(pos);
                false
            }
            None => {
                self.plan.channels.push(channel);
                true
            }
        };
        self.plan.touch();
        self.refresh_budget();
        selected
    }

    pub fn set_channels(&mut self, channels: Vec<Channel>) {
        self.plan.channels = channels;
        self.plan.touch();
        self.refresh_budget();
    }

    pub fn toggle_region(&mut self, region: GermanRegion) -> Notice {
        let notice = toggle_region(&mut self.plan.regions, region);
        self.plan.touch();
        notice
    }

    pub fn toggle_demographic(&mut self, category: DemographicCategory, value: &str) -> bool {
        let selected = self
            .plan
            .demographics
            .get_or_insert_with(Default::default)
            .toggle(category, value);
        self.plan.touch();
        selected
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        let description = description.into();
        self.plan.description = (!description.trim().is_empty()).then_some(description);
        self.plan.touch();
    }

    fn refresh_budget(&mut self) {
        self.plan.budget = BudgetState::seed(&self.plan.channels, self.duration_months());
    }

    // ── Budget edits ──────────────────────────────────────────────────────────

    fn budget(&self) -> Result<&BudgetState> {
        self.plan
            .budget
            .as_ref()
            .ok_or_else(|| PlannerError::MissingBudget(self.plan.id.clone()))
    }

    fn apply(&mut self, state: BudgetState) {
        self.plan.budget = Some(state);
        self.plan.touch();
    }

    pub fn adjust_by_percentage(&mut self, index: usize, percentage: f64) -> Result<Option<Notice>> {
        let r = self.budget()?.adjust_by_percentage(index, percentage, self.policy)?;
        self.apply(r.state);
        Ok(r.notice)
    }

    pub fn adjust_by_amount(&mut self, index: usize, amount: f64) -> Result<Option<Notice>> {
        let r = self.budget()?.adjust_by_amount(index, amount, self.policy)?;
        self.apply(r.state);
        Ok(r.notice)
    }

    pub fn set_total_budget(&mut self, total: f64) -> Result<Option<Notice>> {
        let r = self.budget()?.set_total_budget(total, self.policy)?;
        self.apply(r.state);
        Ok(r.notice)
    }

    // ── Navigation ────────────────────────────────────────────────────────────

    /// Field problems that keep `step` from being completed.
    pub fn validate_step(&self, step: WizardStep) -> Vec<FieldError> {
        let plan = &self.plan;
        let mut errors = Vec::new();
        match step {
            WizardStep::BasicInfo => {
                if plan.client_name.trim().is_empty() {
                    errors.push(FieldError::new("client_name", "Client name is required"));
                }
                if plan.product_type.is_none() {
                    errors.push(FieldError::new("product_type", "Product type is required"));
                }
                if plan.industry.is_none() {
                    errors.push(FieldError::new("industry", "Industry is required"));
                }
            }
            WizardStep::Goals => {
                if plan.kpi_goals.is_empty() {
                    errors.push(FieldError::new("kpi_goals", "At least one KPI goal is required"));
                }
                match plan.country {
                    None => errors.push(FieldError::new("country", "Country is required")),
                    Some(c) if !c.is_supported() => errors.push(FieldError::new(
                        "country",
                        "Only campaigns in Germany are supported",
                    )),
                    Some(_) => {}
                }
            }
            WizardStep::Timeline => {
                errors = timeline::validate(self.start_date, self.end_date);
            }
            WizardStep::Channels => {
                if plan.channels.is_empty() {
                    errors.push(FieldError::new("channels", "At least one channel is required"));
                }
            }
            WizardStep::Targeting | WizardStep::Budget | WizardStep::Summary => {}
        }
        errors
    }

    /// Validate the current step and move to the next one.
    pub fn next(&mut self) -> Result<WizardStep> {
        let errors = self.validate_step(self.step);
        if !errors.is_empty() {
            return Err(PlannerError::StepIncomplete {
                step: self.step.as_str(),
                errors,
            });
        }
        if let Some(next) = self.step.next() {
            self.enter(next);
        }
        Ok(self.step)
    }

    pub fn back(&mut self) -> WizardStep {
        if let Some(previous) = self.step.previous() {
            self.step = previous;
        }
        self.step
    }

    fn enter(&mut self, step: WizardStep) {
        match step {
            WizardStep::Channels if self.plan.channels.is_empty() => {
                let channels = recommended_channels(self.plan.industry, &self.plan.kpi_goals);
                tracing::debug!(count = channels.len(), "pre-selecting recommended channels");
                self.set_channels(channels);
            }
            WizardStep::Targeting if self.plan.regions.is_empty() => {
                self.plan.regions = recommended_regions(self.plan.industry, &self.plan.kpi_goals);
                self.plan.touch();
            }
            _ => {}
        }
        self.step = step;
    }

    /// Start over with a fresh draft.
    pub fn reset(&mut self) {
        *self = Self::new(self.policy);
    }

    // ── Finishing ─────────────────────────────────────────────────────────────

    fn finish(&mut self, status: PlanStatus) -> MediaPlan {
        let mut plan = self.plan.clone();
        if plan.id.is_empty() {
            plan.id = uuid::Uuid::new_v4().to_string();
        }
        plan.status = status;
        plan.updated_at = Utc::now();
        self.reset();
        plan
    }

    /// Hand back the plan as a draft and reset the session.
    pub fn save_as_draft(&mut self) -> (MediaPlan, Notice) {
        let plan = self.finish(PlanStatus::Draft);
        tracing::info!(id = %plan.id, client = %plan.client_name, "plan saved as draft");
        let notice =
            Notice::success("Draft saved").with_description("Your media plan has been saved as a draft.");
        (plan, notice)
    }

    /// Hand back the plan marked pending approval and reset the session.
    pub fn send_for_approval(&mut self) -> (MediaPlan, Notice) {
        let plan = self.finish(PlanStatus::PendingApproval);
        tracing::info!(id = %plan.id, client = %plan.client_name, "plan sent for approval");
        let notice = Notice::success("Plan submitted")
            .with_description("Your media plan has been sent to the client for approval.");
        (plan, notice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn filled_to_timeline() -> WizardSession {
        let mut s = WizardSession::default();
        s.set_client_name("Volkswagen AG");
        s.set_product_type(ProductType::Product);
        s.set_industry(Industry::Automotive);
        s.next().unwrap();
        s.toggle_kpi_goal(KpiGoal::BrandAwareness);
        s.set_country(Country::Germany);
        s.next().unwrap();
        s.set_start_date(Some(date(2025, 5, 1)));
        s.set_end_date(Some(date(2025, 7, 31)));
        s
    }

    #[test]
    fn test_step_numbering() {
        assert_eq!(WizardStep::BasicInfo.number(), 1);
        assert_eq!(WizardStep::Summary.number(), 7);
        assert_eq!(WizardStep::Summary.next(), None);
        assert_eq!(WizardStep::BasicInfo.previous(), None);
        assert_eq!(WizardStep::Goals.to_string(), "Step 2 of 7: goals");
    }

    #[test]
    fn test_basic_info_validation() {
        let mut s = WizardSession::default();
        let err = s.next().unwrap_err();
        match err {
            PlannerError::StepIncomplete { step, errors } => {
                assert_eq!(step, "basic info");
                let messages: Vec<_> = errors.iter().map(|e| e.message.as_str()).collect();
                assert_eq!(
                    messages,
                    vec![
                        "Client name is required",
                        "Product type is required",
                        "Industry is required"
                    ]
                );
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(s.step(), WizardStep::BasicInfo);
    }

    #[test]
    fn test_goals_reject_unsupported_country() {
        let mut s = WizardSession::default();
        s.set_client_name("Adidas");
        s.set_product_type(ProductType::Product);
        s.set_industry(Industry::Fashion);
        s.next().unwrap();
        s.toggle_kpi_goal(KpiGoal::Sales);
        s.set_country(Country::France);
        assert!(s.next().is_err());
        s.set_country(Country::Germany);
        assert_eq!(s.next().unwrap(), WizardStep::Timeline);
    }

    #[test]
    fn test_channels_preselected_and_budget_seeded() {
        let mut s = filled_to_timeline();
        assert_eq!(s.next().unwrap(), WizardStep::Channels);
        assert_eq!(
            s.plan().channels,
            vec![Channel::TraditionalTv, Channel::DigitalTv, Channel::Outdoor, Channel::Dooh]
        );
        let budget = s.plan().budget.as_ref().unwrap();
        // 91 days -> 3 months; (250 + 150 + 110 + 130) * 1000 * 3
        assert_eq!(budget.total, 1_920_000.0);
    }

    #[test]
    fn test_targeting_preselects_regions() {
        let mut s = filled_to_timeline();
        s.next().unwrap();
        assert_eq!(s.next().unwrap(), WizardStep::Targeting);
        assert_eq!(s.plan().regions.len(), 4);
        let notice = s.toggle_region(GermanRegion::Berlin);
        assert_eq!(notice.title, "Removed Berlin from selection");
    }

    #[test]
    fn test_channel_toggle_regenerates_or_clears_budget() {
        let mut s = WizardSession::default();
        s.toggle_channel(Channel::Radio);
        assert_eq!(s.plan().budget.as_ref().unwrap().total, 70_000.0);
        s.toggle_channel(Channel::Radio);
        assert!(s.plan().budget.is_none());
    }

    #[test]
    fn test_duration_change_regenerates_budget() {
        let mut s = WizardSession::default();
        s.set_channels(vec![Channel::Print]);
        assert_eq!(s.plan().budget.as_ref().unwrap().total, 100_000.0);
        s.set_start_date(Some(date(2025, 1, 1)));
        s.set_end_date(Some(date(2025, 3, 2)));
        assert_eq!(s.duration_months(), 2);
        assert_eq!(s.plan().budget.as_ref().unwrap().total, 200_000.0);
    }

    #[test]
    fn test_budget_edit_goes_through_reallocator() {
        let mut s = WizardSession::default();
        s.set_channels(vec![Channel::TraditionalTv, Channel::SocialMedia]);
        let notice = s.adjust_by_percentage(0, 60.0).unwrap();
        assert!(notice.is_some());
        assert!(s.plan().budget.as_ref().unwrap().is_balanced());
    }

    #[test]
    fn test_budget_edit_without_budget() {
        let mut s = WizardSession::default();
        assert!(matches!(
            s.set_total_budget(5000.0),
            Err(PlannerError::MissingBudget(_))
        ));
    }

    #[test]
    fn test_strict_policy_surfaces_errors() {
        let mut s = WizardSession::new(EditPolicy::Strict);
        s.set_channels(vec![Channel::Radio, Channel::Print]);
        assert!(s.adjust_by_percentage(0, 90.0).is_err());
    }

    #[test]
    fn test_back_and_reset() {
        let mut s = filled_to_timeline();
        assert_eq!(s.back(), WizardStep::Goals);
        let old_id = s.plan().id.clone();
        s.reset();
        assert_eq!(s.step(), WizardStep::BasicInfo);
        assert_ne!(s.plan().id, old_id);
        assert!(s.plan().client_name.is_empty());
    }

    #[test]
    fn test_save_as_draft_and_send_for_approval() {
        let mut s = filled_to_timeline();
        let id = s.plan().id.clone();
        let created = s.plan().created_at;
        let (plan, notice) = s.save_as_draft();
        assert_eq!(plan.id, id);
        assert_eq!(plan.created_at, created);
        assert_eq!(plan.status, PlanStatus::Draft);
        assert_eq!(notice.title, "Draft saved");
        assert!(s.plan().client_name.is_empty());

        let mut s = WizardSession::from_plan(plan, EditPolicy::Clamp);
        let (submitted, notice) = s.send_for_approval();
        assert_eq!(submitted.id, id);
        assert_eq!(submitted.status, PlanStatus::PendingApproval);
        assert_eq!(notice.title, "Plan submitted");
    }

    #[test]
    fn test_demographics_and_description() {
        let mut s = WizardSession::default();
        assert!(s.toggle_demographic(DemographicCategory::Genders, "all"));
        assert_eq!(s.plan().demographics.as_ref().unwrap().genders, vec!["all"]);
        s.set_description("  ");
        assert!(s.plan().description.is_none());
        s.set_description("Summer launch");
        assert_eq!(s.plan().description.as_deref(), Some("Summer launch"));
    }
}
