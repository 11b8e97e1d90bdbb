//! KPI strip and interactive filter bar for the dashboard.
//!
//! The KPI row shows the five headline metrics of the marketing dashboard:
//! total cost, total clicks, total impressions, average CPC and average CPM.
//! The filter bar above it shows the current platform selection and date
//! range plus the key bindings that drive them.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use adspend_core::formatting;
use adspend_core::models::Platform;
use adspend_data::view::{DashboardFilters, ViewTotals};

use crate::themes::Theme;

// ── KPI row ───────────────────────────────────────────────────────────────────

/// Build the five KPI cells as `(label, formatted value)` pairs, in
/// display order: cost, clicks, impressions, CPC, CPM.
pub fn kpi_cells(totals: &ViewTotals) -> Vec<(&'static str, String)> {
    vec![
        (
            "Custo Total",
            formatting::format_currency(totals.total_cost),
        ),
        (
            "Cliques Totais",
            formatting::format_count(Some(totals.total_clicks)),
        ),
        (
            "Impressões Totais",
            formatting::format_count(Some(totals.total_impressions)),
        ),
        (
            "CPC Médio",
            formatting::format_currency(totals.avg_cost_per_click),
        ),
        (
            "CPM Médio",
            formatting::format_currency(totals.avg_cost_per_mille),
        ),
    ]
}

/// Render the KPI strip: five bordered boxes side by side, one per metric.
pub fn render_kpi_row(frame: &mut Frame, area: Rect, totals: &ViewTotals, theme: &Theme) {
    let cells = kpi_cells(totals);
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 5); 5])
        .split(area);

    for ((label, value), column) in cells.into_iter().zip(columns.iter()) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(theme.separator)
            .title(Span::styled(format!(" {} ", label), theme.kpi_label));
        let paragraph = Paragraph::new(Line::from(Span::styled(value, theme.kpi_value)))
            .alignment(Alignment::Center)
            .block(block);
        frame.render_widget(paragraph, *column);
    }
}

// ── Filter bar ────────────────────────────────────────────────────────────────

/// Marker for a platform included in the selection.
const SELECTED: &str = "■";
/// Marker for a platform excluded from the selection.
const DESELECTED: &str = "□";

/// Build the two filter-bar lines: the current selection and the key hints.
pub fn build_filter_lines<'a>(filters: &DashboardFilters, theme: &'a Theme) -> Vec<Line<'a>> {
    let mut selection: Vec<Span<'a>> = vec![Span::styled("Plataformas: ", theme.label)];
    for platform in Platform::ALL {
        if filters.platforms.contains(&platform) {
            selection.push(Span::styled(
                format!("{} {}  ", SELECTED, platform.short_label()),
                theme.platform_style(platform),
            ));
        } else {
            selection.push(Span::styled(
                format!("{} {}  ", DESELECTED, platform.short_label()),
                theme.dim,
            ));
        }
    }
    selection.push(Span::styled("Período: ", theme.label));
    selection.push(Span::styled(
        format!(
            "{} → {}",
            formatting::format_date(filters.start),
            formatting::format_date(filters.end)
        ),
        theme.value,
    ));

    vec![
        Line::from(selection),
        Line::from(Span::styled(
            "1/2/3 plataformas · a todas · x limpar · [ ] início · { } fim · \
             r redefinir · R recarregar · Tab tela · q sair",
            theme.dim,
        )),
    ]
}

/// Render the filter bar into `area`.
pub fn render_filter_bar(
    frame: &mut Frame,
    area: Rect,
    filters: &DashboardFilters,
    theme: &Theme,
) {
    let lines = build_filter_lines(filters, theme);
    frame.render_widget(Paragraph::new(Text::from(lines)), area);
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn sample_totals() -> ViewTotals {
        ViewTotals {
            total_cost: 1_234.56,
            total_clicks: 4_321,
            total_impressions: 987_654,
            avg_cost_per_click: 2.5,
            avg_cost_per_mille: 12.34,
        }
    }

    fn sample_filters() -> DashboardFilters {
        DashboardFilters {
            platforms: Platform::ALL.into_iter().collect(),
            start: date("2025-01-01"),
            end: date("2025-01-31"),
        }
    }

    fn line_text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    // ── kpi_cells ─────────────────────────────────────────────────────────────

    #[test]
    fn test_kpi_cells_labels_in_order() {
        let cells = kpi_cells(&sample_totals());
        let labels: Vec<&str> = cells.iter().map(|(label, _)| *label).collect();
        assert_eq!(
            labels,
            vec![
                "Custo Total",
                "Cliques Totais",
                "Impressões Totais",
                "CPC Médio",
                "CPM Médio"
            ]
        );
    }

    #[test]
    fn test_kpi_cells_formatted_values() {
        let cells = kpi_cells(&sample_totals());
        assert_eq!(cells[0].1, "R$ 1,234.56");
        assert_eq!(cells[1].1, "4,321");
        assert_eq!(cells[2].1, "987,654");
        assert_eq!(cells[3].1, "R$ 2.50");
        assert_eq!(cells[4].1, "R$ 12.34");
    }

    #[test]
    fn test_kpi_cells_zero_totals() {
        let cells = kpi_cells(&ViewTotals::default());
        assert_eq!(cells[0].1, "R$ 0.00");
        assert_eq!(cells[1].1, "0");
        assert_eq!(cells[2].1, "0");
    }

    // ── Filter bar lines ──────────────────────────────────────────────────────

    #[test]
    fn test_filter_lines_show_all_selected_markers() {
        let theme = Theme::dark();
        let lines = build_filter_lines(&sample_filters(), &theme);
        assert_eq!(lines.len(), 2);

        let selection = line_text(&lines[0]);
        assert_eq!(selection.matches('■').count(), 3);
        assert!(!selection.contains('□'));
        assert!(selection.contains("2025-01-01"));
        assert!(selection.contains("2025-01-31"));
    }

    #[test]
    fn test_filter_lines_mark_deselected_platforms() {
        let theme = Theme::dark();
        let mut filters = sample_filters();
        filters.platforms = [Platform::FacebookAds].into_iter().collect();

        let lines = build_filter_lines(&filters, &theme);
        let selection = line_text(&lines[0]);
        assert_eq!(selection.matches('■').count(), 1);
        assert_eq!(selection.matches('□').count(), 2);
        assert!(selection.contains("Facebook"));
    }

    #[test]
    fn test_filter_hint_line_lists_key_bindings() {
        let theme = Theme::dark();
        let lines = build_filter_lines(&sample_filters(), &theme);
        let hints = line_text(&lines[1]);
        assert!(hints.contains("Tab tela"));
        assert!(hints.contains("q sair"));
        assert!(hints.contains("R recarregar"));
    }

    // ── Render (does not panic) ───────────────────────────────────────────────

    #[test]
    fn test_render_kpi_row_does_not_panic() {
        let backend = TestBackend::new(120, 5);
        let mut terminal = Terminal::new(backend).unwrap();
        let theme = Theme::dark();
        let totals = sample_totals();

        terminal
            .draw(|frame| {
                let area = frame.area();
                render_kpi_row(frame, area, &totals, &theme);
            })
            .unwrap();
    }

    #[test]
    fn test_render_kpi_row_tiny_area_does_not_panic() {
        let backend = TestBackend::new(20, 2);
        let mut terminal = Terminal::new(backend).unwrap();
        let theme = Theme::classic();
        let totals = ViewTotals::default();

        terminal
            .draw(|frame| {
                let area = frame.area();
                render_kpi_row(frame, area, &totals, &theme);
            })
            .unwrap();
    }

    #[test]
    fn test_render_filter_bar_does_not_panic() {
        let backend = TestBackend::new(120, 3);
        let mut terminal = Terminal::new(backend).unwrap();
        let theme = Theme::light();
        let filters = sample_filters();

        terminal
            .draw(|frame| {
                let area = frame.area();
                render_filter_bar(frame, area, &filters, &theme);
            })
            .unwrap();
    }
}
