//! Reading and writing of the consolidated canonical file.
//!
//! The file layout is fixed: UTF-8 CSV, header
//! `data,plataforma,custo,cliques,impressoes,cpc,cpm`, ISO dates, `.` as
//! decimal separator, empty cells for null counts. The `cpc`/`cpm` columns
//! are written for human consumption only; [`read_consolidated`] recomputes
//! both from cost and the denominators so a record can never carry a stale
//! derived value.

use std::collections::BTreeSet;
use std::fs::File;
use std::path::Path;

use adspend_core::error::{AdspendError, Result};
use adspend_core::formatting::format_date;
use adspend_core::models::{CanonicalRecord, Platform};
use chrono::NaiveDate;
use tracing::debug;

/// Canonical column order of the consolidated file.
pub const CANONICAL_HEADER: [&str; 7] = [
    "data",
    "plataforma",
    "custo",
    "cliques",
    "impressoes",
    "cpc",
    "cpm",
];

// ── Public API ────────────────────────────────────────────────────────────────

/// Write canonical records to `path`, creating parent directories if needed.
///
/// Costs are written with centavo precision, efficiency metrics with four
/// decimals, null counts and null metrics as empty cells.
pub fn write_consolidated(path: &Path, records: &[CanonicalRecord]) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let mut writer = csv::Writer::from_writer(File::create(path)?);
    writer.write_record(CANONICAL_HEADER)?;

    for record in records {
        writer.write_record([
            format_date(record.date),
            record.platform.label().to_string(),
            format!("{:.2}", record.cost),
            record.clicks.map(|c| c.to_string()).unwrap_or_default(),
            record
                .impressions
                .map(|i| i.to_string())
                .unwrap_or_default(),
            record
                .cost_per_click()
                .map(|v| format!("{:.4}", v))
                .unwrap_or_default(),
            record
                .cost_per_mille()
                .map(|v| format!("{:.4}", v))
                .unwrap_or_default(),
        ])?;
    }

    writer.flush()?;
    debug!(file = %path.display(), rows = records.len(), "consolidated file written");
    Ok(())
}

/// Load the consolidated file into a [`LoadedDataset`].
///
/// Fails with [`AdspendError::MissingConsolidated`] when the file does not
/// exist and [`AdspendError::InvalidHeader`] when its header does not match
/// the canonical layout exactly.
pub fn read_consolidated(path: &Path) -> Result<LoadedDataset> {
    let file = File::open(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => AdspendError::MissingConsolidated {
            path: path.to_path_buf(),
        },
        _ => AdspendError::FileRead {
            path: path.to_path_buf(),
            source: e,
        },
    })?;

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(file);

    let headers = reader.headers()?;
    let found: Vec<&str> = headers.iter().collect();
    if found != CANONICAL_HEADER {
        return Err(AdspendError::InvalidHeader {
            path: path.to_path_buf(),
            expected: CANONICAL_HEADER.join(","),
            found: found.join(","),
        });
    }

    let mut records = Vec::new();
    for (i, result) in reader.records().enumerate() {
        let row = result?;
        let line = row.position().map(|p| p.line()).unwrap_or(i as u64 + 2);

        let invalid = |message: String| AdspendError::InvalidField {
            path: path.to_path_buf(),
            line,
            message,
        };

        let date_raw = row.get(0).unwrap_or("");
        let date = NaiveDate::parse_from_str(date_raw, "%Y-%m-%d")
            .map_err(|e| invalid(format!("invalid date '{}': {}", date_raw, e)))?;

        let platform_raw = row.get(1).unwrap_or("");
        let platform = Platform::from_label(platform_raw)
            .ok_or_else(|| invalid(format!("unknown platform '{}'", platform_raw)))?;

        let cost_raw = row.get(2).unwrap_or("");
        let cost: f64 = cost_raw
            .parse()
            .map_err(|_| invalid(format!("invalid cost '{}'", cost_raw)))?;

        let clicks = parse_nullable_count(row.get(3).unwrap_or(""), "cliques", &invalid)?;
        let impressions = parse_nullable_count(row.get(4).unwrap_or(""), "impressoes", &invalid)?;

        // Columns 5 and 6 (cpc, cpm) are intentionally ignored: they are
        // derived values and get recomputed from the fields above.

        records.push(CanonicalRecord {
            date,
            platform,
            cost,
            clicks,
            impressions,
        });
    }

    debug!(file = %path.display(), rows = records.len(), "consolidated file loaded");
    Ok(LoadedDataset::new(records))
}

// ── LoadedDataset ─────────────────────────────────────────────────────────────

/// The full canonical record set plus the facts the dashboard derives its
/// default filters from.
#[derive(Debug, Clone)]
pub struct LoadedDataset {
    /// All canonical records, in file order.
    pub records: Vec<CanonicalRecord>,
    /// Distinct platforms present, in consolidation order.
    pub platforms: Vec<Platform>,
}

impl LoadedDataset {
    /// Build a dataset, deriving the distinct-platform list.
    pub fn new(records: Vec<CanonicalRecord>) -> Self {
        let present: BTreeSet<Platform> = records.iter().map(|r| r.platform).collect();
        let platforms = present.into_iter().collect();
        Self { records, platforms }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Inclusive `[min(date), max(date)]` over all records, `None` when the
    /// dataset is empty.
    pub fn date_span(&self) -> Option<(NaiveDate, NaiveDate)> {
        let min = self.records.iter().map(|r| r.date).min()?;
        let max = self.records.iter().map(|r| r.date).max()?;
        Some((min, max))
    }
}

// ── Internal helpers ──────────────────────────────────────────────────────────

fn parse_nullable_count(
    raw: &str,
    column: &str,
    invalid: &dyn Fn(String) -> AdspendError,
) -> Result<Option<u64>> {
    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse::<u64>()
        .map(Some)
        .map_err(|_| invalid(format!("invalid count '{}' in column '{}'", raw, column)))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
