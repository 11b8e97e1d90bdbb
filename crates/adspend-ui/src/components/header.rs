//! Banner shown at the top of every dashboard screen.

use ratatui::text::{Line, Span};

use crate::themes::Theme;

/// Chart emoji shown before the title.
const TITLE_BADGE: &str = "📊";
/// Application title, rendered in caps on the banner line.
const TITLE: &str = "PERFORMANCE DE MARKETING DIGITAL";
/// Width of the `=` rule under the title.
const RULE_WIDTH: usize = 60;

/// Build the four banner lines: the badged title, a [`RULE_WIDTH`]-column
/// `=` rule, the active screen and data source as `[ screen | source ]`
/// (both lowercased), and a trailing blank line.
pub fn build_header_lines(screen: &str, source: &str, theme: &Theme) -> Vec<Line<'static>> {
    vec![
        Line::from(vec![
            Span::styled(format!("{TITLE_BADGE} "), theme.header_badge),
            Span::styled(TITLE, theme.header),
        ]),
        Line::from(Span::styled("=".repeat(RULE_WIDTH), theme.separator)),
        Line::from(vec![
            Span::styled("[ ", theme.label),
            Span::styled(screen.to_lowercase(), theme.value),
            Span::styled(" | ", theme.label),
            Span::styled(source.to_lowercase(), theme.value),
            Span::styled(" ]", theme.label),
        ]),
        Line::from(""),
    ]
}

// ── Tests ─────────────────────────────────────────────────────────────────────
