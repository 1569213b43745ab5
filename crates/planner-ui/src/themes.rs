use planner_core::models::PlanStatus;
use planner_core::notifications::NoticeLevel;
use ratatui::style::{Color, Modifier, Style};

/// Terminal background type detection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BackgroundType {
    Dark,
    Light,
    Unknown,
}

/// Detect terminal background type from the `COLORFGBG` environment variable.
///
/// The variable has the format `"foreground;background"`. Background values
/// 0–6 are dark, 7–15 light. Anything else yields `BackgroundType::Dark`.
pub fn detect_background() -> BackgroundType {
    if let Ok(val) = std::env::var("COLORFGBG") {
        if let Some(bg) = val.split(';').next_back() {
            if let Ok(bg_num) = bg.parse::<u8>() {
                return if bg_num <= 6 {
                    BackgroundType::Dark
                } else {
                    BackgroundType::Light
                };
            }
        }
    }
    BackgroundType::Dark
}

/// Every style used by the planner screens.
#[derive(Debug, Clone)]
pub struct Theme {
    // ── Header ───────────────────────────────────────────────────────────────
    pub header: Style,
    pub header_accent: Style,
    pub separator: Style,

    // ── Text ─────────────────────────────────────────────────────────────────
    pub text: Style,
    pub dim: Style,
    pub bold: Style,
    pub label: Style,
    pub value: Style,

    // ── Notices ──────────────────────────────────────────────────────────────
    pub info: Style,
    pub success: Style,
    pub warning: Style,
    pub error: Style,

    // ── Allocation sliders ───────────────────────────────────────────────────
    /// Slider fill for shares under 25 %.
    pub allocation_low: Style,
    /// Slider fill for shares from 25 % to under 50 %.
    pub allocation_medium: Style,
    /// Slider fill for shares of 50 % and more.
    pub allocation_high: Style,
    pub allocation_empty: Style,
    pub allocation_label: Style,

    // ── Plan status badges ───────────────────────────────────────────────────
    pub status_draft: Style,
    pub status_pending: Style,
    pub status_approved: Style,
    pub status_running: Style,
    pub status_completed: Style,

    // ── Table ────────────────────────────────────────────────────────────────
    pub table_header: Style,
    pub table_border: Style,
    pub table_row: Style,
    pub table_row_alt: Style,
    pub table_total: Style,
    pub selected: Style,
}

impl Theme {
    // ── Constructors ─────────────────────────────────────────────────────────

    /// Dark-background terminal theme (default).
    pub fn dark() -> Self {
        Self {
            header: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            header_accent: Style::default().fg(Color::Yellow),
            separator: Style::default().fg(Color::DarkGray),

            text: Style::default().fg(Color::White),
            dim: Style::default().fg(Color::DarkGray),
            bold: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            label: Style::default().fg(Color::Gray),
            value: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),

            info: Style::default().fg(Color::Cyan),
            success: Style::default().fg(Color::Green),
            warning: Style::default().fg(Color::Yellow),
            error: Style::default().fg(Color::Red),

            allocation_low: Style::default().fg(Color::Cyan),
            allocation_medium: Style::default().fg(Color::Green),
            allocation_high: Style::default().fg(Color::Magenta),
            allocation_empty: Style::default().fg(Color::DarkGray),
            allocation_label: Style::default().fg(Color::Gray),

            status_draft: Style::default().fg(Color::Gray),
            status_pending: Style::default().fg(Color::Yellow),
            status_approved: Style::default().fg(Color::Green),
            status_running: Style::default().fg(Color::Cyan),
            status_completed: Style::default().fg(Color::Magenta),

            table_header: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            table_border: Style::default().fg(Color::DarkGray),
            table_row: Style::default().fg(Color::White),
            table_row_alt: Style::default().fg(Color::Gray),
            table_total: Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
            selected: Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        }
    }

    /// Light-background terminal theme.
    pub fn light() -> Self {
        Self {
            header: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            header_accent: Style::default().fg(Color::Magenta),
            separator: Style::default().fg(Color::Gray),

            text: Style::default().fg(Color::Black),
            dim: Style::default().fg(Color::Gray),
            bold: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
            label: Style::default().fg(Color::DarkGray),
            value: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),

            info: Style::default().fg(Color::Blue),
            success: Style::default().fg(Color::Green),
            warning: Style::default().fg(Color::Yellow),
            error: Style::default().fg(Color::Red),

            allocation_low: Style::default().fg(Color::Blue),
            allocation_medium: Style::default().fg(Color::Green),
            allocation_high: Style::default().fg(Color::Magenta),
            allocation_empty: Style::default().fg(Color::Gray),
            allocation_label: Style::default().fg(Color::DarkGray),

            status_draft: Style::default().fg(Color::DarkGray),
            status_pending: Style::default().fg(Color::Yellow),
            status_approved: Style::default().fg(Color::Green),
            status_running: Style::default().fg(Color::Blue),
            status_completed: Style::default().fg(Color::Magenta),

            table_header: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            table_border: Style::default().fg(Color::Gray),
            table_row: Style::default().fg(Color::Black),
            table_row_alt: Style::default().fg(Color::DarkGray),
            table_total: Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
            selected: Style::default()
                .fg(Color::White)
                .bg(Color::Blue)
                .add_modifier(Modifier::BOLD),
        }
    }

    /// Basic 8-colour ANSI palette without bold modifiers.
    pub fn classic() -> Self {
        Self {
            header: Style::default().fg(Color::Cyan),
            header_accent: Style::default().fg(Color::White),
            separator: Style::default().fg(Color::DarkGray),

            text: Style::default().fg(Color::White),
            dim: Style::default().fg(Color::DarkGray),
            bold: Style::default().fg(Color::White),
            label: Style::default().fg(Color::Gray),
            value: Style::default().fg(Color::White),

            info: Style::default().fg(Color::Cyan),
            success: Style::default().fg(Color::Green),
            warning: Style::default().fg(Color::Yellow),
            error: Style::default().fg(Color::Red),

            allocation_low: Style::default().fg(Color::Cyan),
            allocation_medium: Style::default().fg(Color::Green),
            allocation_high: Style::default().fg(Color::Magenta),
            allocation_empty: Style::default().fg(Color::DarkGray),
            allocation_label: Style::default().fg(Color::White),

            status_draft: Style::default().fg(Color::White),
            status_pending: Style::default().fg(Color::Yellow),
            status_approved: Style::default().fg(Color::Green),
            status_running: Style::default().fg(Color::Cyan),
            status_completed: Style::default().fg(Color::Magenta),

            table_header: Style::default().fg(Color::Cyan),
            table_border: Style::default().fg(Color::DarkGray),
            table_row: Style::default().fg(Color::White),
            table_row_alt: Style::default().fg(Color::Gray),
            table_total: Style::default().fg(Color::Yellow),
            selected: Style::default().fg(Color::Black).bg(Color::White),
        }
    }

    /// Choose a theme based on the detected terminal background.
    pub fn auto_detect() -> Self {
        match detect_background() {
            BackgroundType::Light => Self::light(),
            _ => Self::dark(),
        }
    }

    /// Construct a theme by name. Unknown names fall back to `auto_detect`.
    pub fn from_name(name: &str) -> Self {
        match name {
            "light" => Self::light(),
            "dark" => Self::dark(),
            "classic" => Self::classic(),
            _ => Self::auto_detect(),
        }
    }

    // ── Style helpers ────────────────────────────────────────────────────────

    /// Slider fill style for a channel share.
    ///
    /// * `< 25 %`  → `allocation_low`
    /// * `25–50 %` → `allocation_medium`
    /// * `≥ 50 %`  → `allocation_high`
    pub fn allocation_style(&self, percentage: f64) -> Style {
        if percentage >= 50.0 {
            self.allocation_high
        } else if percentage >= 25.0 {
            self.allocation_medium
        } else {
            self.allocation_low
        }
    }

    pub fn status_style(&self, status: PlanStatus) -> Style {
        match status {
            PlanStatus::Draft => self.status_draft,
            PlanStatus::PendingApproval => self.status_pending,
            PlanStatus::Approved => self.status_approved,
            PlanStatus::Running => self.status_running,
            PlanStatus::Completed => self.status_completed,
        }
    }

    pub fn notice_style(&self, level: NoticeLevel) -> Style {
        match level {
            NoticeLevel::Info => self.info,
            NoticeLevel::Success => self.success,
            NoticeLevel::Error => self.error,
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
