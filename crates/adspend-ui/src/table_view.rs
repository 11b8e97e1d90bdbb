//! Detailed records table for the dashboard.
//!
//! Renders the working set as a bordered [`ratatui::widgets::Table`] with one
//! row per canonical record plus a highlighted totals row pinned at the
//! bottom. Vertical scrolling is handled by the caller through `offset`.
//! The missing-data and load-error placeholder screens also live here.

use std::path::Path;

use ratatui::{
    layout::{Constraint, Rect},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use adspend_core::formatting;
use adspend_core::models::CanonicalRecord;
use adspend_data::view::ViewTotals;

use crate::themes::Theme;

/// Render the detailed records table into `area`.
///
/// Rows before `offset` are skipped so the caller can scroll; the totals row
/// stays pinned at the bottom regardless of the scroll position.
pub fn render_records_table(
    frame: &mut Frame,
    area: Rect,
    records: &[CanonicalRecord],
    totals: &ViewTotals,
    offset: usize,
    theme: &Theme,
) {
    let header_cells = [
        "Data",
        "Plataforma",
        "Custo",
        "Cliques",
        "Impressões",
        "CPC",
        "CPM",
    ]
    .iter()
    .map(|h| Cell::from(*h).style(theme.table_header));
    let header = Row::new(header_cells).height(1);

    let offset = offset.min(records.len());
    let data_rows: Vec<Row> = records[offset..]
        .iter()
        .enumerate()
        .map(|(i, record)| {
            // Stripe on the absolute index so rows keep their colour while
            // scrolling.
            let style = if (offset + i) % 2 == 0 {
                theme.table_row
            } else {
                theme.table_row_alt
            };
            Row::new(vec![
                Cell::from(formatting::format_date(record.date)),
                Cell::from(record.platform.label()),
                Cell::from(formatting::format_currency(record.cost)),
                Cell::from(formatting::format_count(record.clicks)),
                Cell::from(formatting::format_count(record.impressions)),
                Cell::from(formatting::format_ratio(record.cost_per_click())),
                Cell::from(formatting::format_ratio(record.cost_per_mille())),
            ])
            .style(style)
        })
        .collect();

    // Totals row – styled separately to stand out.
    let total_row = Row::new(vec![
        Cell::from("TOTAL"),
        Cell::from(format!("{} registros", records.len())),
        Cell::from(formatting::format_currency(totals.total_cost)),
        Cell::from(formatting::format_count(Some(totals.total_clicks))),
        Cell::from(formatting::format_count(Some(totals.total_impressions))),
        Cell::from(formatting::format_ratio(Some(totals.avg_cost_per_click))),
        Cell::from(formatting::format_ratio(Some(totals.avg_cost_per_mille))),
    ])
    .style(theme.table_total);

    let mut all_rows = data_rows;
    all_rows.push(total_row);

    let widths = [
        Constraint::Length(12),
        Constraint::Length(14),
        Constraint::Length(14),
        Constraint::Length(10),
        Constraint::Length(12),
        Constraint::Length(10),
        Constraint::Length(10),
    ];

    let table = Table::new(all_rows, widths)
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.table_border)
                .title(format!(
                    " Explore os Dados Detalhados ({} registros) ",
                    records.len()
                )),
        )
        .style(theme.text);

    frame.render_widget(table, area);
}

/// Render the placeholder shown when the consolidated file does not exist.
pub fn render_missing_data(frame: &mut Frame, area: Rect, path: &Path, theme: &Theme) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("Arquivo de dados não encontrado em '{}'.", path.display()),
            theme.warning,
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Por favor, execute `adspend etl` primeiro para gerar os dados limpos.",
            theme.dim,
        )),
        Line::from(Span::styled(
            "Pressione 'R' para verificar novamente ou 'q' para sair",
            theme.dim,
        )),
    ];
    frame.render_widget(
        Paragraph::new(Text::from(text)).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Performance de Marketing Digital "),
        ),
        area,
    );
}

/// Render the placeholder shown when the consolidated file exists but could
/// not be read or parsed.
pub fn render_load_error(frame: &mut Frame, area: Rect, message: &str, theme: &Theme) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Falha ao carregar os dados consolidados",
            theme.error,
        )),
        Line::from(""),
        Line::from(Span::styled(message.to_string(), theme.dim)),
        Line::from(""),
        Line::from(Span::styled(
            "Pressione 'R' para tentar novamente ou 'q' para sair",
            theme.dim,
        )),
    ];
    frame.render_widget(
        Paragraph::new(Text::from(text)).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Performance de Marketing Digital "),
        ),
        area,
    );
}

// ── Tests ──────────────────────────────────────────────────────────────────────
