//! Plan detail screen and the plain-text plan summary.
//!
//! Both are built from the same [`summary_sections`], so the `summary` view
//! of the binary prints exactly what the detail screen shows.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use planner_core::formatting::{
    format_currency, format_date_range, format_list_items, format_number,
    format_optional_currency, format_percentage,
};
use planner_core::models::MediaPlan;
use planner_core::notifications::Notice;
use planner_core::regions::ReachSummary;
use planner_core::timeline::{duration_days, duration_label};

use crate::components::allocation_bar::pad_to_width;
use crate::components::header::Header;
use crate::components::status_bar::StatusBar;
use crate::themes::Theme;

pub const DETAIL_HINTS: &str = "s status  b budget  Esc back  q quit";

const LABEL_WIDTH: usize = 22;
const NOT_SPECIFIED: &str = "Not specified";

/// A titled group of `(label, value)` rows.
#[derive(Debug, Clone, PartialEq)]
pub struct SummarySection {
    pub title: &'static str,
    pub rows: Vec<(String, String)>,
}

impl SummarySection {
    fn new(title: &'static str) -> Self {
        Self {
            title,
            rows: Vec::new(),
        }
    }

    fn row(mut self, label: impl Into<String>, value: impl Into<String>) -> Self {
        self.rows.push((label.into(), value.into()));
        self
    }
}

fn or_not_specified<T: ToString>(value: Option<T>) -> String {
    value
        .map(|v| v.to_string())
        .unwrap_or_else(|| NOT_SPECIFIED.to_string())
}

/// Everything known about `plan`, grouped for display.
pub fn summary_sections(plan: &MediaPlan) -> Vec<SummarySection> {
    let mut sections = Vec::with_capacity(6);

    let goals: Vec<&str> = plan.kpi_goals.iter().map(|g| g.as_str()).collect();
    sections.push(
        SummarySection::new("Campaign Details")
            .row("Client", plan.client_name.clone())
            .row("Status", plan.status.label())
            .row("Created", plan.created_at.format("%B %-d, %Y").to_string())
            .row("Product Type", or_not_specified(plan.product_type))
            .row("Industry", or_not_specified(plan.industry))
            .row("Market", or_not_specified(plan.country))
            .row(
                "KPI Goals",
                if goals.is_empty() {
                    NOT_SPECIFIED.to_string()
                } else {
                    format_list_items(&goals)
                },
            ),
    );

    let mut timeline = SummarySection::new("Timeline")
        .row("Dates", format_date_range(plan.date_range.as_ref()));
    if let Some(range) = &plan.date_range {
        timeline = timeline.row("Duration", duration_label(duration_days(range)));
    }
    sections.push(timeline);

    let reach = ReachSummary::of(&plan.regions);
    let region_names: Vec<&str> = plan.regions.iter().map(|r| r.name()).collect();
    let demographics = plan.demographics.clone().unwrap_or_default();
    sections.push(
        SummarySection::new("Targeting")
            .row("Regions", format_list_items(&region_names))
            .row(
                "Reach",
                format!(
                    "{} states, {} people",
                    reach.states,
                    format_number(reach.population as f64)
                ),
            )
            .row("Age Ranges", format_list_items(&demographics.age_ranges))
            .row("Genders", format_list_items(&demographics.genders))
            .row("Income", format_list_items(&demographics.income))
            .row("Interests", format_list_items(&demographics.interests)),
    );

    let channels: Vec<&str> = plan.channels.iter().map(|c| c.as_str()).collect();
    sections.push(
        SummarySection::new("Channels").row("Selected", format_list_items(&channels)),
    );

    let mut budget = SummarySection::new("Budget")
        .row("Total Budget", format_optional_currency(plan.total_budget()));
    match &plan.budget {
        Some(state) if !state.allocations.is_empty() => {
            for a in &state.allocations {
                budget = budget.row(
                    a.channel.label(),
                    format!(
                        "{} ({})",
                        format_currency(a.amount),
                        format_percentage(a.percentage)
                    ),
                );
            }
        }
        _ => {
            budget = budget.row("Allocations", "No budget allocation details available");
        }
    }
    sections.push(budget);

    if let Some(description) = plan.description.as_deref().filter(|d| !d.trim().is_empty()) {
        sections.push(SummarySection::new("Additional Notes").row("Notes", description));
    }

    sections
}

/// Plain-text rendering of [`summary_sections`] for non-interactive output.
pub fn format_summary(plan: &MediaPlan) -> String {
    let mut out = String::new();
    for (i, section) in summary_sections(plan).iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str(section.title);
        out.push('\n');
        out.push_str(&"-".repeat(section.title.chars().count()));
        out.push('\n');
        for (label, value) in &section.rows {
            out.push_str(&format!("  {}{}\n", pad_to_width(label, LABEL_WIDTH), value));
        }
    }
    out
}

/// Styled lines of the detail screen body.
pub fn build_detail_lines<'a>(plan: &MediaPlan, theme: &'a Theme) -> Vec<Line<'a>> {
    let mut lines = Vec::with_capacity(48);
    for section in summary_sections(plan) {
        lines.push(Line::from(Span::styled(section.title, theme.bold)));
        for (label, value) in section.rows {
            let value_style = if label == "Status" {
                theme.status_style(plan.status)
            } else {
                theme.value
            };
            lines.push(Line::from(vec![
                Span::raw("  "),
                Span::styled(pad_to_width(&label, LABEL_WIDTH), theme.label),
                Span::styled(value, value_style),
            ]));
        }
        lines.push(Line::from(""));
    }
    lines
}

/// Render the detail screen for `plan` into `area`.
pub fn render_plan_detail(
    frame: &mut Frame,
    area: Rect,
    plan: &MediaPlan,
    notice: Option<&Notice>,
    theme: &Theme,
) {
    let [header_area, body_area, status_area] = Layout::vertical([
        Constraint::Length(4),
        Constraint::Min(3),
        Constraint::Length(1),
    ])
    .areas(area);

    frame.render_widget(
        Paragraph::new(Text::from(
            Header::new("detail", &plan.client_name, theme).to_lines(),
        )),
        header_area,
    );
    frame.render_widget(
        Paragraph::new(Text::from(build_detail_lines(plan, theme)))
            .wrap(Wrap { trim: false })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(theme.table_border)
                    .title(format!(" {} ", plan.client_name)),
            ),
        body_area,
    );
    frame.render_widget(
        Paragraph::new(StatusBar::new(notice, DETAIL_HINTS, theme).to_line()),
        status_area,
    );
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use planner_data::seed::sample_plans;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn plan(id: &str) -> MediaPlan {
        sample_plans()
            .unwrap()
            .into_iter()
            .find(|p| p.id == id)
            .unwrap()
    }

    fn row<'a>(sections: &'a [SummarySection], label: &str) -> &'a str {
        sections
            .iter()
            .flat_map(|s| s.rows.iter())
            .find(|(l, _)| l == label)
            .map(|(_, v)| v.as_str())
            .unwrap_or_else(|| panic!("no row {label}"))
    }

    #[test]
    fn test_sections_for_full_plan() {
        let p = plan("1");
        let sections = summary_sections(&p);
        let titles: Vec<&str> = sections.iter().map(|s| s.title).collect();
        assert_eq!(
            &titles[..5],
            ["Campaign Details", "Timeline", "Targeting", "Channels", "Budget"]
        );
        assert_eq!(row(&sections, "Client"), "Volkswagen AG");
        assert_eq!(row(&sections, "Total Budget"), "2.500.000 €");
    }

    #[test]
    fn test_sections_for_plan_without_budget() {
        let p = plan("6");
        let sections = summary_sections(&p);
        assert_eq!(row(&sections, "Total Budget"), "Not specified");
        assert_eq!(
            row(&sections, "Allocations"),
            "No budget allocation details available"
        );
        assert_eq!(row(&sections, "Selected"), "None selected");
        assert_eq!(row(&sections, "Age Ranges"), "None selected");
    }

    #[test]
    fn test_sections_for_new_draft() {
        let p = MediaPlan::new_draft();
        let sections = summary_sections(&p);
        assert_eq!(row(&sections, "Dates"), "Not specified");
        assert_eq!(row(&sections, "Industry"), "Not specified");
        assert_eq!(row(&sections, "KPI Goals"), "Not specified");
        assert_eq!(row(&sections, "Reach"), "0 states, 0 people");
        assert!(sections
            .iter()
            .all(|s| s.rows.iter().all(|(l, _)| l != "Duration")));
    }

    #[test]
    fn test_description_section_only_when_present() {
        let mut p = MediaPlan::new_draft();
        p.client_name = "Bosch".to_string();
        assert!(summary_sections(&p)
            .iter()
            .all(|s| s.title != "Additional Notes"));
        p.description = Some("Launch in spring".to_string());
        let sections = summary_sections(&p);
        assert_eq!(row(&sections, "Notes"), "Launch in spring");
    }

    #[test]
    fn test_format_summary_layout() {
        let p = plan("3");
        let text = format_summary(&p);
        assert!(text.starts_with("Campaign Details\n----------------\n"));
        assert!(text.contains("  Client                Adidas\n"));
        assert!(text.contains("\nBudget\n------\n"));
    }

    #[test]
    fn test_render_plan_detail_does_not_panic() {
        let backend = TestBackend::new(100, 50);
        let mut terminal = Terminal::new(backend).unwrap();
        let theme = Theme::dark();
        let p = plan("2");
        let notice = Notice::success("Status updated");

        terminal
            .draw(|frame| {
                let area = frame.area();
                render_plan_detail(frame, area, &p, Some(&notice), &theme);
            })
            .unwrap();
    }

    #[test]
    fn test_render_plan_detail_small_terminal_does_not_panic() {
        let backend = TestBackend::new(30, 8);
        let mut terminal = Terminal::new(backend).unwrap();
        let theme = Theme::classic();
        let p = plan("6");

        terminal
            .draw(|frame| {
                let area = frame.area();
                render_plan_detail(frame, area, &p, None, &theme);
            })
            .unwrap();
    }
}
