//! Pure view computation for the dashboard.
//!
//! [`compute_view`] takes the full canonical record set plus the current
//! [`DashboardFilters`] and produces everything the UI renders: the working
//! set, scalar totals, the per-platform daily cost series, the platform cost
//! breakdown and the efficiency scatter points. It never touches the
//! filesystem, so every filter change is a cheap synchronous recomputation.

use std::collections::{BTreeMap, BTreeSet};

use adspend_core::metrics::Metric;
use adspend_core::models::{CanonicalRecord, Platform};
use chrono::NaiveDate;

// ── Filters ───────────────────────────────────────────────────────────────────

/// The two interactive controls: platform multi-select and inclusive date
/// range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardFilters {
    pub platforms: BTreeSet<Platform>,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DashboardFilters {
    /// Defaults: every platform present in `records` selected, date range
    /// spanning the whole dataset. An empty dataset gets an empty selection
    /// and a degenerate single-day range.
    pub fn default_for(records: &[CanonicalRecord]) -> Self {
        let platforms: BTreeSet<Platform> = records.iter().map(|r| r.platform).collect();
        let start = records.iter().map(|r| r.date).min().unwrap_or_default();
        let end = records.iter().map(|r| r.date).max().unwrap_or_default();
        Self {
            platforms,
            start,
            end,
        }
    }

    /// Whether `record` belongs to the working set under these filters.
    pub fn matches(&self, record: &CanonicalRecord) -> bool {
        self.platforms.contains(&record.platform)
            && record.date >= self.start
            && record.date <= self.end
    }
}

// ── View types ────────────────────────────────────────────────────────────────

/// Scalar aggregates over the working set. Null counts contribute zero to
/// the sums; averages fall back to zero when their denominator is zero.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ViewTotals {
    pub total_cost: f64,
    pub total_clicks: u64,
    pub total_impressions: u64,
    pub avg_cost_per_click: f64,
    pub avg_cost_per_mille: f64,
}

/// Daily cost series for one platform, dates ascending, same-day rows summed.
#[derive(Debug, Clone, PartialEq)]
pub struct DailySeries {
    pub platform: Platform,
    pub points: Vec<(NaiveDate, f64)>,
}

/// One working-set record's efficiency metrics plus the raw fields they
/// derive from, nulls preserved.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EfficiencyPoint {
    pub date: NaiveDate,
    pub platform: Platform,
    pub cost: f64,
    pub clicks: Option<u64>,
    pub impressions: Option<u64>,
    pub cost_per_click: Option<f64>,
    pub cost_per_mille: Option<f64>,
}

/// Everything the dashboard renders for one filter state.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub totals: ViewTotals,
    /// One series per selected platform with data, consolidation order.
    pub daily_cost: Vec<DailySeries>,
    /// Total cost per platform present in the working set, consolidation
    /// order.
    pub platform_cost: Vec<(Platform, f64)>,
    /// One point per working-set record, in working-set order.
    pub efficiency: Vec<EfficiencyPoint>,
    /// The working set itself, in canonical file order.
    pub records: Vec<CanonicalRecord>,
}

// ── Public function ───────────────────────────────────────────────────────────

/// Compute the dashboard view for `records` under `filters`.
///
/// Pure: same inputs always produce the same view.
pub fn compute_view(records: &[CanonicalRecord], filters: &DashboardFilters) -> DashboardView {
    let working: Vec<CanonicalRecord> = records
        .iter()
        .filter(|r| filters.matches(r))
        .cloned()
        .collect();

    // Scalar totals. Null clicks/impressions count as zero.
    let total_cost: f64 = working.iter().map(|r| r.cost).sum();
    let total_clicks: u64 = working.iter().filter_map(|r| r.clicks).sum();
    let total_impressions: u64 = working.iter().filter_map(|r| r.impressions).sum();
    let avg_cost_per_click = (Metric::new(total_cost) / Metric::from_count(Some(total_clicks)))
        .value()
        .unwrap_or_default();
    let avg_cost_per_mille = ((Metric::new(total_cost)
        / Metric::from_count(Some(total_impressions)))
        * 1000.0)
        .value()
        .unwrap_or_default();

    // Daily cost per platform: group on (platform, date), sum same-day rows.
    // BTreeMap keeps dates ascending within each series.
    let mut grouped: BTreeMap<Platform, BTreeMap<NaiveDate, f64>> = BTreeMap::new();
    for record in &working {
        *grouped
            .entry(record.platform)
            .or_default()
            .entry(record.date)
            .or_default() += record.cost;
    }
    let daily_cost: Vec<DailySeries> = grouped
        .iter()
        .map(|(platform, by_date)| DailySeries {
            platform: *platform,
            points: by_date.iter().map(|(d, c)| (*d, *c)).collect(),
        })
        .collect();

    let platform_cost: Vec<(Platform, f64)> = grouped
        .into_iter()
        .map(|(platform, by_date)| (platform, by_date.into_values().sum()))
        .collect();

    let efficiency: Vec<EfficiencyPoint> = working
        .iter()
        .map(|r| EfficiencyPoint {
            date: r.date,
            platform: r.platform,
            cost: r.cost,
            clicks: r.clicks,
            impressions: r.impressions,
            cost_per_click: r.cost_per_click(),
            cost_per_mille: r.cost_per_mille(),
        })
        .collect();

    DashboardView {
        totals: ViewTotals {
            total_cost,
            total_clicks,
            total_impressions,
            avg_cost_per_click,
            avg_cost_per_mille,
        },
        daily_cost,
        platform_cost,
        efficiency,
        records: working,
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
