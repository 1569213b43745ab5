use crate::themes::Theme;
use planner_core::notifications::Notice;
use ratatui::text::{Line, Span};

/// Bottom line of every screen: the latest notice, then the key hints.
pub struct StatusBar<'a> {
    pub notice: Option<&'a Notice>,
    pub hints: &'a str,
    pub theme: &'a Theme,
}

impl<'a> StatusBar<'a> {
    pub fn new(notice: Option<&'a Notice>, hints: &'a str, theme: &'a Theme) -> Self {
        Self {
            notice,
            hints,
            theme,
        }
    }

    /// `"<notice>  │  <hints>"`, or only the hints when there is no notice.
    pub fn to_line(&self) -> Line<'a> {
        let mut spans = Vec::with_capacity(3);
        if let Some(notice) = self.notice {
            spans.push(Span::styled(
                notice.text(),
                self.theme.notice_style(notice.level),
            ));
            spans.push(Span::styled("  │  ", self.theme.separator));
        }
        spans.push(Span::styled(self.hints, self.theme.dim));
        Line::from(spans)
    }
}
