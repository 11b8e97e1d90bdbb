use adspend_core::formatting::{format_currency, percentage};
use adspend_core::models::Platform;
use ratatui::text::{Line, Span};
use unicode_width::UnicodeWidthStr;

use crate::themes::Theme;

/// Width in terminal columns of the bar portion of each share row.
const BAR_WIDTH: u16 = 30;

/// Columns reserved for the platform label before each bar.
const LABEL_WIDTH: usize = 14;

/// Cost-share breakdown for the selected platforms.
///
/// Renders one row per platform (padded label, proportional fill, share
/// percentage and absolute cost), followed by a stacked composite row where
/// every platform occupies a segment proportional to its share of the total.
pub struct PlatformShareBar<'a> {
    /// Ordered `(platform, cost)` pairs, consolidation order.
    pub shares: &'a [(Platform, f64)],
    /// Theme from which platform colour styles are taken.
    pub theme: &'a Theme,
    /// Total width of the bar portion in terminal columns.
    pub width: u16,
}

impl<'a> PlatformShareBar<'a> {
    /// Construct a new share bar over the platform cost breakdown.
    pub fn new(shares: &'a [(Platform, f64)], theme: &'a Theme) -> Self {
        Self {
            shares,
            theme,
            width: BAR_WIDTH,
        }
    }

    /// Render the breakdown as one [`Line`] per platform plus the composite
    /// total row.
    pub fn to_lines(&self) -> Vec<Line<'a>> {
        let total: f64 = self.shares.iter().map(|(_, cost)| cost).sum();
        let mut lines = Vec::with_capacity(self.shares.len() + 1);

        for (platform, cost) in self.shares {
            let pct = percentage(*cost, total, 1);
            let filled = ((pct / 100.0) * self.width as f64).round() as usize;
            let empty = (self.width as usize).saturating_sub(filled);

            let style = self.theme.platform_style(*platform);
            lines.push(Line::from(vec![
                Span::styled(pad_label(platform.label()), style),
                Span::styled("█".repeat(filled), style),
                Span::styled("░".repeat(empty), self.theme.share_empty),
                Span::styled(
                    format!(" {:>5.1}%  {}", pct, format_currency(*cost)),
                    self.theme.share_label,
                ),
            ]));
        }

        // Stacked composite row: one segment per platform, total at the end.
        let mut spans: Vec<Span<'a>> =
            vec![Span::styled(pad_label("Total"), self.theme.share_label)];
        for (platform, cost) in self.shares {
            let pct = percentage(*cost, total, 1);
            let chars = ((pct / 100.0) * self.width as f64).round() as usize;
            if chars > 0 {
                spans.push(Span::styled(
                    "█".repeat(chars),
                    self.theme.platform_style(*platform),
                ));
            }
        }
        spans.push(Span::styled(
            format!(
                " {:>5.1}%  {}",
                percentage(total, total, 1),
                format_currency(total)
            ),
            self.theme.share_label,
        ));
        lines.push(Line::from(spans));

        lines
    }
}

/// Pad `label` with trailing spaces to [`LABEL_WIDTH`] display columns.
fn pad_label(label: &str) -> String {
    let padding = LABEL_WIDTH.saturating_sub(UnicodeWidthStr::width(label));
    format!("{}{}", label, " ".repeat(padding))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
