use crate::themes::Theme;
use planner_core::budget::{ChannelAllocation, MAX_CHANNEL_PERCENTAGE, MIN_CHANNEL_PERCENTAGE};
use planner_core::formatting::{format_currency, format_percentage};
use ratatui::text::{Line, Span};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Pad `text` with spaces to `width` display columns, truncating with `…`
/// when it is wider.
pub fn pad_to_width(text: &str, width: usize) -> String {
    let text_width = UnicodeWidthStr::width(text);
    if text_width <= width {
        return format!("{}{}", text, " ".repeat(width - text_width));
    }
    if width == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + w > width - 1 {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    used += 1;
    out.push_str(&" ".repeat(width.saturating_sub(used)));
    out
}

/// Where `percentage` sits between the slider bounds, in `[0.0, 1.0]`.
pub fn slider_position(percentage: f64) -> f64 {
    let span = MAX_CHANNEL_PERCENTAGE - MIN_CHANNEL_PERCENTAGE;
    ((percentage - MIN_CHANNEL_PERCENTAGE) / span).clamp(0.0, 1.0)
}

/// Visual configuration of a channel slider.
pub struct SliderConfig {
    /// Columns of the track, excluding label and figures.
    pub width: u16,
    pub filled_char: char,
    pub empty_char: char,
    /// Display columns reserved for the channel name.
    pub label_width: usize,
}

impl Default for SliderConfig {
    fn default() -> Self {
        Self {
            width: 30,
            filled_char: '\u{2588}', // █  FULL BLOCK
            empty_char: '\u{2591}',  // ░  LIGHT SHADE
            label_width: 22,
        }
    }
}

// ── AllocationBar ────────────────────────────────────────────────────────────

/// One channel row of the budget editor:
///
/// ```text
/// ▶ Social Media           [█████████░░░░░░░░░░░░░░░░░░░░░]  24%  288.000 €
/// ```
///
/// The track shows the share's position between the 5 % and 70 % bounds.
pub struct AllocationBar<'a> {
    pub label: String,
    pub percentage: f64,
    pub amount: f64,
    pub selected: bool,
    pub theme: &'a Theme,
    pub config: SliderConfig,
}

impl<'a> AllocationBar<'a> {
    pub fn new(allocation: &ChannelAllocation, selected: bool, theme: &'a Theme) -> Self {
        Self {
            label: allocation.channel.label(),
            percentage: allocation.percentage,
            amount: allocation.amount,
            selected,
            theme,
            config: SliderConfig::default(),
        }
    }

    pub fn to_line(&self) -> Line<'a> {
        let filled =
            (slider_position(self.percentage) * f64::from(self.config.width)).round() as u16;
        let empty = self.config.width.saturating_sub(filled);

        let filled_str = self.config.filled_char.to_string().repeat(filled as usize);
        let empty_str = self.config.empty_char.to_string().repeat(empty as usize);

        let (marker, label_style) = if self.selected {
            ("▶ ", self.theme.bold)
        } else {
            ("  ", self.theme.label)
        };

        Line::from(vec![
            Span::styled(marker, self.theme.header_accent),
            Span::styled(
                pad_to_width(&self.label, self.config.label_width),
                label_style,
            ),
            Span::styled(" [", self.theme.dim),
            Span::styled(filled_str, self.theme.allocation_style(self.percentage)),
            Span::styled(empty_str, self.theme.allocation_empty),
            Span::styled("] ", self.theme.dim),
            Span::styled(
                format!("{:>4}", format_percentage(self.percentage)),
                self.theme.allocation_label,
            ),
            Span::raw("  "),
            Span::styled(format_currency(self.amount), self.theme.value),
        ])
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use planner_core::models::Channel;

    fn allocation(percentage: f64, amount: f64) -> ChannelAllocation {
        ChannelAllocation {
            channel: Channel::SocialMedia,
            amount,
            percentage,
        }
    }

    fn count_char(line: &Line, ch: char) -> usize {
        line.spans
            .iter()
            .map(|s| s.content.chars().filter(|c| *c == ch).count())
            .sum()
    }

    #[test]
    fn test_pad_to_width_pads_and_truncates() {
        assert_eq!(pad_to_width("Radio", 8), "Radio   ");
        assert_eq!(pad_to_width("Digital Interactive", 10), "Digital I…");
        assert_eq!(pad_to_width("abc", 0), "");
        // Wide characters count as two columns.
        assert_eq!(UnicodeWidthStr::width(pad_to_width("日本語テレビ", 7).as_str()), 7);
    }

    #[test]
    fn test_slider_position_bounds() {
        assert_eq!(slider_position(5.0), 0.0);
        assert_eq!(slider_position(70.0), 1.0);
        assert_eq!(slider_position(37.5), 0.5);
        assert_eq!(slider_position(0.0), 0.0);
        assert_eq!(slider_position(95.0), 1.0);
    }

    #[test]
    fn test_allocation_bar_fill() {
        let theme = Theme::dark();
        let alloc = allocation(37.5, 450_000.0);
        let bar = AllocationBar::new(&alloc, false, &theme);
        let line = bar.to_line();
        assert_eq!(count_char(&line, '\u{2588}'), 15);
        assert_eq!(count_char(&line, '\u{2591}'), 15);
    }

    #[test]
    fn test_allocation_bar_text() {
        let theme = Theme::dark();
        let alloc = allocation(24.0, 288_000.0);
        let line = AllocationBar::new(&alloc, true, &theme).to_line();
        let text: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
        assert!(text.starts_with("▶ Social Media"), "got: {text}");
        assert!(text.contains(" 24%"));
        assert!(text.ends_with("288.000 €"));
    }

    #[test]
    fn test_unselected_bar_has_blank_marker() {
        let theme = Theme::dark();
        let alloc = allocation(5.0, 60_000.0);
        let line = AllocationBar::new(&alloc, false, &theme).to_line();
        assert_eq!(line.spans[0].content, "  ");
        assert_eq!(count_char(&line, '\u{2588}'), 0);
    }
}
