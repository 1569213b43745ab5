//! Plan list screen.
//!
//! A bordered [`Table`] with one row per plan that passes the current
//! [`PlanFilter`], a search/filter line above it and a status line below.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use planner_core::formatting::{format_date_range, format_optional_currency};
use planner_core::models::{KpiGoal, MediaPlan};
use planner_core::notifications::Notice;
use planner_data::query::{PlanFilter, PortfolioTotals};

use crate::components::header::Header;
use crate::components::status_bar::StatusBar;
use crate::themes::Theme;

pub const LIST_HINTS: &str =
    "↑/↓ select  Enter details  b budget  d delete  / search  s status  q quit";

/// Goals column text: the first two goals, then `+N more`.
pub fn goals_label(goals: &[KpiGoal]) -> String {
    if goals.is_empty() {
        return "-".to_string();
    }
    let shown: Vec<String> = goals.iter().take(2).map(ToString::to_string).collect();
    let mut label = shown.join(", ");
    if goals.len() > 2 {
        label.push_str(&format!(" +{} more", goals.len() - 2));
    }
    label
}

// ── PlanListState ─────────────────────────────────────────────────────────────

/// Selection, filter and search-entry state of the list screen.
#[derive(Debug, Clone, Default)]
pub struct PlanListState {
    pub filter: PlanFilter,
    /// Index into the filtered rows.
    pub selected: usize,
    /// Typed keys go to the search text while set.
    pub editing_search: bool,
}

impl PlanListState {
    pub fn new(filter: PlanFilter) -> Self {
        Self {
            filter,
            selected: 0,
            editing_search: false,
        }
    }

    pub fn visible<'a>(&self, plans: &'a [MediaPlan]) -> Vec<&'a MediaPlan> {
        self.filter.apply(plans)
    }

    pub fn selected_plan<'a>(&self, plans: &'a [MediaPlan]) -> Option<&'a MediaPlan> {
        self.visible(plans).get(self.selected).copied()
    }

    pub fn select_next(&mut self, row_count: usize) {
        if row_count > 0 && self.selected + 1 < row_count {
            self.selected += 1;
        }
    }

    pub fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Keep the selection on a row after the list shrank.
    pub fn clamp_selection(&mut self, row_count: usize) {
        self.selected = self.selected.min(row_count.saturating_sub(1));
    }

    pub fn push_search_char(&mut self, ch: char) {
        self.filter.search.push(ch);
        self.selected = 0;
    }

    pub fn pop_search_char(&mut self) {
        self.filter.search.pop();
        self.selected = 0;
    }

    pub fn cycle_status(&mut self) {
        self.filter.cycle_status();
        self.selected = 0;
    }
}

// ── Rendering ─────────────────────────────────────────────────────────────────

/// Render the whole list screen into `area`.
pub fn render_plan_list(
    frame: &mut Frame,
    area: Rect,
    plans: &[MediaPlan],
    state: &PlanListState,
    notice: Option<&Notice>,
    theme: &Theme,
) {
    let rows = state.visible(plans);
    let totals = PortfolioTotals::of(rows.iter().copied());
    let context = format!(
        "{} plans | {}",
        totals.plan_count,
        format_optional_currency(Some(totals.total_budget))
    );

    let [header_area, filter_area, table_area, status_area] = Layout::vertical([
        Constraint::Length(4),
        Constraint::Length(1),
        Constraint::Min(3),
        Constraint::Length(1),
    ])
    .areas(area);

    frame.render_widget(
        Paragraph::new(Text::from(Header::new("plans", &context, theme).to_lines())),
        header_area,
    );
    frame.render_widget(Paragraph::new(filter_line(state, theme)), filter_area);

    if rows.is_empty() {
        render_no_data(frame, table_area, state, theme);
    } else {
        render_table(frame, table_area, &rows, state.selected, theme);
    }

    frame.render_widget(
        Paragraph::new(StatusBar::new(notice, LIST_HINTS, theme).to_line()),
        status_area,
    );
}

fn filter_line<'a>(state: &PlanListState, theme: &'a Theme) -> Line<'a> {
    let search_style = if state.editing_search {
        theme.value
    } else {
        theme.text
    };
    let cursor = if state.editing_search { "▏" } else { "" };
    Line::from(vec![
        Span::styled("Search: ", theme.label),
        Span::styled(format!("{}{}", state.filter.search, cursor), search_style),
        Span::styled("   Status: ", theme.label),
        Span::styled(state.filter.status_label(), theme.value),
    ])
}

fn render_table(
    frame: &mut Frame,
    area: Rect,
    rows: &[&MediaPlan],
    selected: usize,
    theme: &Theme,
) {
    let header = Row::new(
        ["Client", "Status", "Industry", "Goals", "Timeline", "Budget"]
            .iter()
            .map(|h| Cell::from(*h).style(theme.table_header)),
    )
    .height(1);

    let data_rows: Vec<Row> = rows
        .iter()
        .enumerate()
        .map(|(i, plan)| {
            let style = if i == selected {
                theme.selected
            } else if i % 2 == 0 {
                theme.table_row
            } else {
                theme.table_row_alt
            };
            let status_cell = if i == selected {
                Cell::from(plan.status.label())
            } else {
                Cell::from(plan.status.label()).style(theme.status_style(plan.status))
            };
            Row::new(vec![
                Cell::from(plan.client_name.clone()),
                status_cell,
                Cell::from(
                    plan.industry
                        .map(|i| i.to_string())
                        .unwrap_or_else(|| "-".to_string()),
                ),
                Cell::from(goals_label(&plan.kpi_goals)),
                Cell::from(format_date_range(plan.date_range.as_ref())),
                Cell::from(format_optional_currency(plan.total_budget())),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Length(20),
        Constraint::Length(18),
        Constraint::Length(16),
        Constraint::Length(38),
        Constraint::Length(28),
        Constraint::Length(14),
    ];

    let table = Table::new(data_rows, widths)
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.table_border)
                .title(" Media Plans "),
        )
        .style(theme.text);

    frame.render_widget(table, area);
}

/// Placeholder shown when no plan passes the filter.
pub fn render_no_data(frame: &mut Frame, area: Rect, state: &PlanListState, theme: &Theme) {
    let hint = if state.filter.search.is_empty() && state.filter.status.is_none() {
        "Create one with --view create or --view chat."
    } else {
        "Try adjusting your search or filters."
    };
    let text = vec![
        Line::from(""),
        Line::from(Span::styled("No media plans found", theme.warning)),
        Line::from(""),
        Line::from(Span::styled(hint, theme.dim)),
    ];
    frame.render_widget(
        Paragraph::new(Text::from(text)).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.table_border)
                .title(" Media Plans "),
        ),
        area,
    );
}

// ── Tests ──────────────────────────────────────────────────────────────────────
