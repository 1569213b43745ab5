//! Budget editor screen.
//!
//! [`BudgetEditor`] holds a working copy of one plan's budget. Every key
//! press becomes one reallocation call on [`BudgetState`]; the result
//! replaces the working copy and its notice (or the rejection) is shown in
//! the status line. Nothing reaches the store until the plan is saved.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use planner_core::budget::{BudgetState, EditPolicy, Reallocation};
use planner_core::error::{PlannerError, Result};
use planner_core::formatting::{format_currency, format_percentage};
use planner_core::models::MediaPlan;
use planner_core::notifications::Notice;

use crate::components::allocation_bar::AllocationBar;
use crate::components::header::Header;
use crate::components::status_bar::StatusBar;
use crate::themes::Theme;

/// Slider step for `←`/`→`.
pub const PERCENT_STEP: f64 = 1.0;
/// Amount step for `+`/`-`, in euros.
pub const AMOUNT_STEP: f64 = 1000.0;
/// Relative total change for `[`/`]`.
pub const TOTAL_STEP: f64 = 0.10;

pub const BUDGET_HINTS: &str =
    "↑/↓ channel  ←/→ share ±1%  +/- amount ±1.000 €  [/] total ±10%  w save  Esc back";

// ── BudgetEditor ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct BudgetEditor {
    plan: MediaPlan,
    budget: BudgetState,
    policy: EditPolicy,
    selected: usize,
    dirty: bool,
    notice: Option<Notice>,
}

impl BudgetEditor {
    /// Open the editor on `plan`. Plans without allocations cannot be edited.
    pub fn new(plan: MediaPlan, policy: EditPolicy) -> Result<Self> {
        let budget = match &plan.budget {
            Some(b) if !b.allocations.is_empty() => b.clone(),
            _ => return Err(PlannerError::MissingBudget(plan.id.clone())),
        };
        Ok(Self {
            plan,
            budget,
            policy,
            selected: 0,
            dirty: false,
            notice: None,
        })
    }

    pub fn plan(&self) -> &MediaPlan {
        &self.plan
    }

    pub fn budget(&self) -> &BudgetState {
        &self.budget
    }

    pub fn policy(&self) -> EditPolicy {
        self.policy
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    /// Whether there are edits that have not been saved.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn set_notice(&mut self, notice: Notice) {
        self.notice = Some(notice);
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.budget.allocations.len() {
            self.selected += 1;
        }
    }

    pub fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    // ── Edits ─────────────────────────────────────────────────────────────────

    /// Move the selected channel's share by `delta` points, snapped to the
    /// slider step.
    pub fn nudge_percentage(&mut self, delta: f64) {
        let current = self.budget.allocations[self.selected].percentage;
        let target = ((current + delta) / PERCENT_STEP).round() * PERCENT_STEP;
        let result = self
            .budget
            .adjust_by_percentage(self.selected, target, self.policy);
        self.apply(result);
    }

    /// Move the selected channel's amount by `delta` euros.
    pub fn nudge_amount(&mut self, delta: f64) {
        let current = self.budget.allocations[self.selected].amount;
        let result = self
            .budget
            .adjust_by_amount(self.selected, current + delta, self.policy);
        self.apply(result);
    }

    /// Multiply the total by `factor`, rounded to whole euros.
    pub fn scale_total(&mut self, factor: f64) {
        let target = (self.budget.total * factor).round();
        let result = self.budget.set_total_budget(target, self.policy);
        self.apply(result);
    }

    fn apply(&mut self, result: Result<Reallocation>) {
        match result {
            Ok(r) => {
                if r.state != self.budget {
                    self.budget = r.state;
                    self.dirty = true;
                }
                if let Some(notice) = r.notice {
                    notice.log();
                    self.notice = Some(notice);
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "budget edit rejected");
                self.notice =
                    Some(Notice::error("Budget edit rejected").with_description(e.to_string()));
            }
        }
    }

    /// The plan carrying the edited budget, ready to be stored.
    pub fn updated_plan(&self) -> MediaPlan {
        let mut plan = self.plan.clone();
        plan.budget = Some(self.budget.clone());
        plan.touch();
        plan
    }

    /// Record that `plan` was written to the store.
    pub fn mark_saved(&mut self, plan: MediaPlan) {
        self.plan = plan;
        self.dirty = false;
        self.notice = Some(
            Notice::success("Budget saved").with_description(format!(
                "{} now totals {}",
                self.plan.client_name,
                format_currency(self.budget.total)
            )),
        );
    }
}

// ── Rendering ─────────────────────────────────────────────────────────────────

fn summary_line<'a>(editor: &BudgetEditor, theme: &'a Theme) -> Line<'a> {
    let budget = editor.budget();
    let balance_style = if budget.is_balanced() {
        theme.success
    } else {
        theme.warning
    };
    let mut spans = vec![
        Span::styled("Total: ", theme.label),
        Span::styled(format_currency(budget.total), theme.table_total),
        Span::styled("   Allocated: ", theme.label),
        Span::styled(format_currency(budget.amount_sum()), theme.value),
        Span::styled(
            format!(" ({})", format_percentage(budget.percentage_sum())),
            balance_style,
        ),
        Span::styled("   Policy: ", theme.label),
        Span::styled(editor.policy().as_str(), theme.value),
    ];
    if editor.is_dirty() {
        spans.push(Span::styled("   ● unsaved changes", theme.warning));
    }
    Line::from(spans)
}

/// Lines of the editor body: the summary, a blank line, one slider per
/// channel.
pub fn build_budget_lines<'a>(editor: &BudgetEditor, theme: &'a Theme) -> Vec<Line<'a>> {
    let mut lines = Vec::with_capacity(editor.budget().allocations.len() + 2);
    lines.push(summary_line(editor, theme));
    lines.push(Line::from(""));
    for (i, allocation) in editor.budget().allocations.iter().enumerate() {
        lines.push(AllocationBar::new(allocation, i == editor.selected(), theme).to_line());
    }
    lines
}

/// Render the budget editor into `area`.
pub fn render_budget_view(frame: &mut Frame, area: Rect, editor: &BudgetEditor, theme: &Theme) {
    let [header_area, body_area, status_area] = Layout::vertical([
        Constraint::Length(4),
        Constraint::Min(3),
        Constraint::Length(1),
    ])
    .areas(area);

    frame.render_widget(
        Paragraph::new(Text::from(
            Header::new("budget", &editor.plan().client_name, theme).to_lines(),
        )),
        header_area,
    );
    frame.render_widget(
        Paragraph::new(Text::from(build_budget_lines(editor, theme))).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.table_border)
                .title(" Budget Allocation "),
        ),
        body_area,
    );
    frame.render_widget(
        Paragraph::new(StatusBar::new(editor.notice(), BUDGET_HINTS, theme).to_line()),
        status_area,
    );
}

// ── Tests ──────────────────────────────────────────────────────────────────────
