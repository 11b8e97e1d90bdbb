//! Chart rendering for the dashboard's visual analysis screen.
//!
//! Translates the computed view series into ratatui [`Chart`] widgets: a
//! per-platform daily cost line chart and a CPC vs CPM efficiency scatter.
//! Chart datasets borrow `(f64, f64)` slices, so each chart first builds an
//! owned [`ChartData`] and then renders from it.

use std::collections::BTreeMap;

use ratatui::{
    layout::Rect,
    symbols,
    text::Span,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType},
    Frame,
};

use adspend_core::formatting;
use adspend_core::models::Platform;
use adspend_data::view::{DailySeries, EfficiencyPoint};

use crate::themes::Theme;

// ── ChartData ─────────────────────────────────────────────────────────────────

/// Owned, render-ready chart content: one `(x, y)` point list per platform
/// plus axis bounds and labels.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartData {
    pub series: Vec<(Platform, Vec<(f64, f64)>)>,
    pub x_bounds: [f64; 2],
    pub y_bounds: [f64; 2],
    pub x_labels: Vec<String>,
    pub y_labels: Vec<String>,
}

impl ChartData {
    fn empty() -> Self {
        Self {
            series: Vec::new(),
            x_bounds: [0.0, 1.0],
            y_bounds: [0.0, 1.0],
            x_labels: Vec::new(),
            y_labels: Vec::new(),
        }
    }

    /// True when no platform contributes any point.
    pub fn is_empty(&self) -> bool {
        self.series.iter().all(|(_, points)| points.is_empty())
    }
}

// ── Data builders ─────────────────────────────────────────────────────────────

/// Build the daily cost chart data from the per-platform series.
///
/// X is days since the earliest plotted date so the axis stays linear across
/// gaps; the labels show the first, middle and last date of the span.
pub fn daily_cost_data(daily_cost: &[DailySeries]) -> ChartData {
    let Some(first) = daily_cost
        .iter()
        .flat_map(|s| s.points.iter())
        .map(|(date, _)| *date)
        .min()
    else {
        return ChartData::empty();
    };
    let last = daily_cost
        .iter()
        .flat_map(|s| s.points.iter())
        .map(|(date, _)| *date)
        .max()
        .unwrap_or(first);
    let max_cost = daily_cost
        .iter()
        .flat_map(|s| s.points.iter())
        .map(|(_, cost)| *cost)
        .fold(0.0_f64, f64::max);

    let series: Vec<(Platform, Vec<(f64, f64)>)> = daily_cost
        .iter()
        .map(|s| {
            let points = s
                .points
                .iter()
                .map(|(date, cost)| ((*date - first).num_days() as f64, *cost))
                .collect();
            (s.platform, points)
        })
        .collect();

    let span_days = (last - first).num_days();
    let mid = first
        .checked_add_days(chrono::Days::new((span_days / 2) as u64))
        .unwrap_or(last);
    let x_labels = if span_days == 0 {
        vec![formatting::format_date(first)]
    } else {
        vec![
            formatting::format_date(first),
            formatting::format_date(mid),
            formatting::format_date(last),
        ]
    };

    let y_max = max_cost.max(1.0);
    ChartData {
        series,
        x_bounds: [0.0, (span_days as f64).max(1.0)],
        y_bounds: [0.0, y_max],
        x_labels,
        y_labels: axis_labels(y_max, 0),
    }
}

/// Build the efficiency scatter data: one dataset per platform, one point per
/// record with both CPC (x) and CPM (y) present. Records missing either
/// metric are skipped.
pub fn efficiency_data(efficiency: &[EfficiencyPoint]) -> ChartData {
    let mut grouped: BTreeMap<Platform, Vec<(f64, f64)>> = BTreeMap::new();
    for point in efficiency {
        if let (Some(cpc), Some(cpm)) = (point.cost_per_click, point.cost_per_mille) {
            grouped.entry(point.platform).or_default().push((cpc, cpm));
        }
    }
    if grouped.is_empty() {
        return ChartData::empty();
    }

    let max_cpc = grouped
        .values()
        .flatten()
        .map(|(x, _)| *x)
        .fold(0.0_f64, f64::max);
    let max_cpm = grouped
        .values()
        .flatten()
        .map(|(_, y)| *y)
        .fold(0.0_f64, f64::max);
    let x_max = max_cpc.max(1.0);
    let y_max = max_cpm.max(1.0);

    ChartData {
        series: grouped.into_iter().collect(),
        x_bounds: [0.0, x_max],
        y_bounds: [0.0, y_max],
        x_labels: axis_labels(x_max, 2),
        y_labels: axis_labels(y_max, 2),
    }
}

/// Three numeric labels (zero, midpoint, max) for a `[0, max]` axis.
fn axis_labels(max: f64, decimals: u32) -> Vec<String> {
    vec![
        formatting::format_number(0.0, decimals),
        formatting::format_number(max / 2.0, decimals),
        formatting::format_number(max, decimals),
    ]
}

// ── Render ────────────────────────────────────────────────────────────────────

/// Render the per-platform daily cost line chart into `area`.
pub fn render_daily_cost_chart(
    frame: &mut Frame,
    area: Rect,
    daily_cost: &[DailySeries],
    theme: &Theme,
) {
    let data = daily_cost_data(daily_cost);
    render_chart(
        frame,
        area,
        &data,
        ("Evolução do Custo Diário", "Data", "Custo (R$)"),
        GraphType::Line,
        symbols::Marker::Braille,
        theme,
    );
}

/// Render the CPC vs CPM efficiency scatter into `area`.
pub fn render_efficiency_chart(
    frame: &mut Frame,
    area: Rect,
    efficiency: &[EfficiencyPoint],
    theme: &Theme,
) {
    let data = efficiency_data(efficiency);
    render_chart(
        frame,
        area,
        &data,
        ("Eficiência de Custo por Plataforma", "CPC", "CPM"),
        GraphType::Scatter,
        symbols::Marker::Dot,
        theme,
    );
}

/// Shared chart assembly for both chart kinds. `titles` is the block title
/// followed by the x and y axis titles.
fn render_chart(
    frame: &mut Frame,
    area: Rect,
    data: &ChartData,
    titles: (&str, &str, &str),
    graph_type: GraphType,
    marker: symbols::Marker,
    theme: &Theme,
) {
    let datasets: Vec<Dataset> = data
        .series
        .iter()
        .map(|(platform, points)| {
            Dataset::default()
                .name(platform.short_label())
                .marker(marker)
                .graph_type(graph_type)
                .style(theme.platform_style(*platform))
                .data(points)
        })
        .collect();

    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.separator)
                .title(format!(" {} ", titles.0)),
        )
        .x_axis(
            Axis::default()
                .title(Span::styled(titles.1, theme.label))
                .style(theme.chart_axis)
                .bounds(data.x_bounds)
                .labels(data.x_labels.clone()),
        )
        .y_axis(
            Axis::default()
                .title(Span::styled(titles.2, theme.label))
                .style(theme.chart_axis)
                .bounds(data.y_bounds)
                .labels(data.y_labels.clone()),
        );

    frame.render_widget(chart, area);
}

// ── Tests ──────────────────────────────────────────────────────────────────────
