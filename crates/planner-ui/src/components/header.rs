use crate::themes::Theme;
use ratatui::text::{Line, Span};

/// Decorative accent placed either side of the application title.
pub const ACCENT: &str = "◆ ◇ ◆";

/// Screen header rendering four lines:
///
/// 1. Application title with accents.
/// 2. A 60-column `=` separator.
/// 3. Context in `[ screen | detail ]` format.
/// 4. An empty line.
pub struct Header<'a> {
    /// Name of the current screen (e.g. "plans", "budget").
    pub screen: &'a str,
    /// Screen-specific context (e.g. a client name or plan count).
    pub context: &'a str,
    pub theme: &'a Theme,
}

impl<'a> Header<'a> {
    pub fn new(screen: &'a str, context: &'a str, theme: &'a Theme) -> Self {
        Self {
            screen,
            context,
            theme,
        }
    }

    pub fn to_lines(&self) -> Vec<Line<'a>> {
        vec![
            Line::from(vec![
                Span::styled(ACCENT, self.theme.header_accent),
                Span::styled(" MEDIA PLANNER ", self.theme.header),
                Span::styled(ACCENT, self.theme.header_accent),
            ]),
            Line::from(Span::styled("=".repeat(60), self.theme.separator)),
            Line::from(vec![
                Span::styled("[ ", self.theme.label),
                Span::styled(self.screen.to_lowercase(), self.theme.value),
                Span::styled(" | ", self.theme.label),
                Span::styled(self.context.to_string(), self.theme.value),
                Span::styled(" ]", self.theme.label),
            ]),
            Line::from(""),
        ]
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
