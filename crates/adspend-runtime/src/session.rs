//! Interactive explorer session state.
//!
//! [`ExplorerSession`] owns the dataset cache and the current filter state,
//! and keeps a recomputed [`DashboardView`] in step with both. The UI layer
//! calls the mutation methods in response to key presses and re-renders from
//! [`view`](ExplorerSession::view).

use std::path::{Path, PathBuf};

use adspend_core::models::Platform;
use adspend_data::view::{compute_view, DashboardFilters, DashboardView};
use chrono::{Days, NaiveDate};

use crate::dataset_cache::DatasetCache;

// ── SessionState ──────────────────────────────────────────────────────────────

/// What the session can currently show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// A dataset is loaded; filters and view are available.
    Ready,
    /// The consolidated file does not exist and nothing was ever loaded.
    Missing,
    /// The consolidated file exists but could not be read or parsed.
    Failed,
}

// ── ExplorerSession ───────────────────────────────────────────────────────────

/// Owns the cached dataset plus the interactive filter state.
///
/// Every mutation recomputes the dashboard view synchronously; the dataset is
/// small enough that a full recomputation per key press beats any incremental
/// bookkeeping.
pub struct ExplorerSession {
    cache: DatasetCache,
    /// Current filters; `None` until the first successful load derives the
    /// defaults from the data.
    filters: Option<DashboardFilters>,
    /// Dataset date span captured at load time, used to clamp range shifts.
    span: Option<(NaiveDate, NaiveDate)>,
    /// View matching the current data and filters.
    view: Option<DashboardView>,
}

impl ExplorerSession {
    /// Create a session reading from the consolidated file at `path`.
    /// Nothing is loaded until the first [`refresh`](Self::refresh).
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            cache: DatasetCache::new(path),
            filters: None,
            span: None,
            view: None,
        }
    }

    // ── Data loading ──────────────────────────────────────────────────────

    /// Load or reload the dataset through the cache and recompute the view.
    ///
    /// Filters chosen by the user survive a reload; only the first successful
    /// load derives the defaults (every platform, full date span).
    pub fn refresh(&mut self, force: bool) {
        let _ = self.cache.get_data(force);
        self.recompute();
    }

    /// What the session can currently show.
    pub fn state(&self) -> SessionState {
        if self.view.is_some() {
            SessionState::Ready
        } else if self.cache.is_missing() {
            SessionState::Missing
        } else {
            SessionState::Failed
        }
    }

    /// Location of the consolidated file the session reads.
    pub fn path(&self) -> &Path {
        self.cache.path()
    }

    /// Human-readable description of the last load failure, if any.
    pub fn last_error_message(&self) -> Option<String> {
        self.cache.last_error().map(|e| e.to_string())
    }

    // ── Render data ───────────────────────────────────────────────────────

    /// The view for the current data and filters, when data is loaded.
    pub fn view(&self) -> Option<&DashboardView> {
        self.view.as_ref()
    }

    /// The current filters, when data is loaded.
    pub fn filters(&self) -> Option<&DashboardFilters> {
        self.filters.as_ref()
    }

    // ── Filter mutations ──────────────────────────────────────────────────

    /// Toggle `platform` in or out of the selection.
    pub fn toggle_platform(&mut self, platform: Platform) {
        let Some(filters) = self.filters.as_mut() else {
            return;
        };
        if !filters.platforms.remove(&platform) {
            filters.platforms.insert(platform);
        }
        tracing::debug!(platform = %platform, "platform toggled");
        self.recompute();
    }

    /// Select every platform.
    pub fn select_all_platforms(&mut self) {
        if let Some(filters) = self.filters.as_mut() {
            filters.platforms = Platform::ALL.into_iter().collect();
            self.recompute();
        }
    }

    /// Deselect every platform, leaving an empty working set.
    pub fn clear_platforms(&mut self) {
        if let Some(filters) = self.filters.as_mut() {
            filters.platforms.clear();
            self.recompute();
        }
    }

    /// Shift the range start by `days`, clamped to the dataset span. A shift
    /// that would cross the end collapses the range to that single day.
    pub fn shift_start(&mut self, days: i64) {
        let (Some(filters), Some((min, max))) = (self.filters.as_mut(), self.span) else {
            return;
        };
        let shifted = shift_date(filters.start, days).clamp(min, max);
        filters.start = shifted.min(filters.end);
        self.recompute();
    }

    /// Shift the range end by `days`, clamped to the dataset span. A shift
    /// that would cross the start collapses the range to that single day.
    pub fn shift_end(&mut self, days: i64) {
        let (Some(filters), Some((min, max))) = (self.filters.as_mut(), self.span) else {
            return;
        };
        let shifted = shift_date(filters.end, days).clamp(min, max);
        filters.end = shifted.max(filters.start);
        self.recompute();
    }

    /// Restore the default filters (every platform present, full date span).
    pub fn reset_filters(&mut self) {
        let defaults = self
            .cache
            .get_data(false)
            .map(|dataset| DashboardFilters::default_for(&dataset.records));
        if let Some(defaults) = defaults {
            tracing::debug!("filters reset to defaults");
            self.filters = Some(defaults);
            self.recompute();
        }
    }

    // ── Private helpers ───────────────────────────────────────────────────

    /// Recompute the dashboard view from the cached dataset and current
    /// filters, deriving default filters on the first load.
    fn recompute(&mut self) {
        let Some(dataset) = self.cache.get_data(false) else {
            self.view = None;
            return;
        };
        self.span = dataset.date_span();
        let filters = self
            .filters
            .get_or_insert_with(|| DashboardFilters::default_for(&dataset.records));
        self.view = Some(compute_view(&dataset.records, filters));
    }
}

/// `date` moved by `days`, saturating at the calendar limits.
fn shift_date(date: NaiveDate, days: i64) -> NaiveDate {
    if days >= 0 {
        date.checked_add_days(Days::new(days as u64)).unwrap_or(date)
    } else {
        date.checked_sub_days(Days::new(days.unsigned_abs()))
            .unwrap_or(date)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use adspend_core::models::CanonicalRecord;
    use adspend_data::consolidated::write_consolidated;
    use std::collections::BTreeSet;
    use tempfile::TempDir;

    // ── helpers ───────────────────────────────────────────────────────────

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn record(day: &str, platform: Platform, cost: f64) -> CanonicalRecord {
        CanonicalRecord {
            date: date(day),
            platform,
            cost,
            clicks: Some(10),
            impressions: Some(1_000),
        }
    }

    fn sample_records() -> Vec<CanonicalRecord> {
        vec![
            record("2025-03-01", Platform::GoogleAds, 100.0),
            record("2025-03-02", Platform::FacebookAds, 50.0),
            record("2025-03-03", Platform::LinkedinAds, 200.0),
            record("2025-03-04", Platform::GoogleAds, 25.0),
        ]
    }

    /// Session over a consolidated file holding `records`, already refreshed.
    /// The TempDir must stay alive for the test.
    fn ready_session(records: &[CanonicalRecord]) -> (ExplorerSession, TempDir) {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("marketing_consolidado.csv");
        write_consolidated(&path, records).expect("write consolidated");
        let mut session = ExplorerSession::new(path);
        session.refresh(false);
        (session, dir)
    }

    // ── loading states ────────────────────────────────────────────────────

    #[test]
    fn test_missing_file_state() {
        let dir = TempDir::new().expect("temp dir");
        let mut session = ExplorerSession::new(dir.path().join("marketing_consolidado.csv"));
        session.refresh(false);

        assert_eq!(session.state(), SessionState::Missing);
        assert!(session.view().is_none());
        assert!(session.filters().is_none());
        let message = session.last_error_message().expect("error message");
        assert!(message.contains("adspend etl"));
    }

    #[test]
    fn test_unreadable_file_reports_failed_state() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("marketing_consolidado.csv");
        std::fs::write(&path, "date,platform,cost\n2025-01-01,g,1\n").expect("write");

        let mut session = ExplorerSession::new(&path);
        session.refresh(false);

        assert_eq!(session.state(), SessionState::Failed);
        assert!(session
            .last_error_message()
            .expect("message")
            .contains("Unexpected header"));
    }

    #[test]
    fn test_mutations_are_noops_without_data() {
        let dir = TempDir::new().expect("temp dir");
        let mut session = ExplorerSession::new(dir.path().join("marketing_consolidado.csv"));
        session.refresh(false);

        session.toggle_platform(Platform::GoogleAds);
        session.select_all_platforms();
        session.shift_start(1);
        session.reset_filters();

        assert_eq!(session.state(), SessionState::Missing);
        assert!(session.filters().is_none());
    }

    #[test]
    fn test_ready_with_default_filters() {
        let (session, _dir) = ready_session(&sample_records());

        assert_eq!(session.state(), SessionState::Ready);
        let filters = session.filters().expect("filters derived");
        let all: BTreeSet<Platform> = Platform::ALL.into_iter().collect();
        assert_eq!(filters.platforms, all);
        assert_eq!(filters.start, date("2025-03-01"));
        assert_eq!(filters.end, date("2025-03-04"));
        assert_eq!(session.view().expect("view").records.len(), 4);
    }

    #[test]
    fn test_recovers_when_file_appears() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("marketing_consolidado.csv");
        let mut session = ExplorerSession::new(&path);
        session.refresh(false);
        assert_eq!(session.state(), SessionState::Missing);

        write_consolidated(&path, &sample_records()).expect("write consolidated");
        session.refresh(true);

        assert_eq!(session.state(), SessionState::Ready);
        assert_eq!(session.view().expect("view").records.len(), 4);
    }

    // ── platform selection ────────────────────────────────────────────────

    #[test]
    fn test_toggle_platform_out_and_back() {
        let (mut session, _dir) = ready_session(&sample_records());

        session.toggle_platform(Platform::GoogleAds);
        let view = session.view().expect("view");
        assert!(view
            .records
            .iter()
            .all(|r| r.platform != Platform::GoogleAds));
        assert_eq!(view.records.len(), 2);

        session.toggle_platform(Platform::GoogleAds);
        assert_eq!(session.view().expect("view").records.len(), 4);
    }

    #[test]
    fn test_clear_then_select_all() {
        let (mut session, _dir) = ready_session(&sample_records());

        session.clear_platforms();
        let view = session.view().expect("view");
        assert!(view.records.is_empty());
        assert_eq!(view.totals.total_cost, 0.0);

        session.select_all_platforms();
        assert_eq!(session.view().expect("view").records.len(), 4);
    }

    // ── date range shifts ─────────────────────────────────────────────────

    #[test]
    fn test_shift_start_narrows_range() {
        let (mut session, _dir) = ready_session(&sample_records());

        session.shift_start(1);
        let filters = session.filters().expect("filters");
        assert_eq!(filters.start, date("2025-03-02"));
        assert_eq!(session.view().expect("view").records.len(), 3);
    }

    #[test]
    fn test_shift_clamps_to_dataset_span() {
        let (mut session, _dir) = ready_session(&sample_records());

        session.shift_start(-10);
        assert_eq!(session.filters().unwrap().start, date("2025-03-01"));

        session.shift_end(10);
        assert_eq!(session.filters().unwrap().end, date("2025-03-04"));
    }

    #[test]
    fn test_crossing_shift_collapses_to_single_day() {
        let (mut session, _dir) = ready_session(&sample_records());

        // Walk the end all the way down past the start.
        for _ in 0..10 {
            session.shift_end(-1);
        }
        let filters = session.filters().expect("filters");
        assert_eq!(filters.start, date("2025-03-01"));
        assert_eq!(filters.end, date("2025-03-01"));

        // The start can no longer move past the collapsed end.
        session.shift_start(1);
        assert_eq!(session.filters().unwrap().start, date("2025-03-01"));
        assert_eq!(session.view().expect("view").records.len(), 1);
    }

    #[test]
    fn test_reset_restores_defaults() {
        let (mut session, _dir) = ready_session(&sample_records());

        session.toggle_platform(Platform::FacebookAds);
        session.shift_start(2);
        session.reset_filters();

        let filters = session.filters().expect("filters");
        assert_eq!(filters.platforms.len(), 3);
        assert_eq!(filters.start, date("2025-03-01"));
        assert_eq!(filters.end, date("2025-03-04"));
    }

    // ── filters survive reloads ───────────────────────────────────────────

    #[test]
    fn test_filters_survive_forced_reload() {
        let (mut session, dir) = ready_session(&sample_records());
        let path = dir.path().join("marketing_consolidado.csv");

        session.toggle_platform(Platform::LinkedinAds);

        let mut extended = sample_records();
        extended.push(record("2025-03-05", Platform::GoogleAds, 75.0));
        write_consolidated(&path, &extended).expect("rewrite");
        session.refresh(true);

        // Platform selection and date range are kept: the new row falls
        // outside the old range and stays hidden.
        let filters = session.filters().expect("filters");
        assert!(!filters.platforms.contains(&Platform::LinkedinAds));
        assert_eq!(session.view().expect("view").records.len(), 3);

        // The span now extends to the new row, so the end can shift onto it.
        session.shift_end(1);
        assert_eq!(session.view().expect("view").records.len(), 4);
    }
}
