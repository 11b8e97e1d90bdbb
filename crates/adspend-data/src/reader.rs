//! Raw export loading for the consolidation pipeline.
//!
//! One generic reader turns any platform export into canonical records,
//! driven entirely by the [`SourceSpec`] mapping tables. Row order is
//! preserved so consolidated output stays in source order.

use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

use adspend_core::error::{AdspendError, Result};
use adspend_core::models::CanonicalRecord;
use csv::StringRecord;
use tracing::debug;

use crate::sources::SourceSpec;

// ── Public API ────────────────────────────────────────────────────────────────

/// Read one raw export and map every row into a canonical record.
///
/// Fails with [`AdspendError::MissingSource`] when the file does not exist,
/// [`AdspendError::MissingColumn`] when the header lacks a mapped column,
/// and [`AdspendError::InvalidField`] (naming file and line) when a cell
/// cannot be parsed.
pub fn read_source(path: &Path, spec: &SourceSpec) -> Result<Vec<CanonicalRecord>> {
    let file = File::open(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => AdspendError::MissingSource {
            platform: spec.platform,
            path: path.to_path_buf(),
        },
        _ => AdspendError::FileRead {
            path: path.to_path_buf(),
            source: e,
        },
    })?;

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(file);

    let headers = build_header_map(reader.headers()?);

    let date_idx = require_column(&headers, spec.columns.date, path)?;
    let cost_idx = require_column(&headers, spec.columns.cost, path)?;
    let clicks_idx = spec
        .columns
        .clicks
        .map(|c| require_column(&headers, c, path))
        .transpose()?;
    let impressions_idx = spec
        .columns
        .impressions
        .map(|c| require_column(&headers, c, path))
        .transpose()?;

    let mut records = Vec::new();
    for (i, result) in reader.records().enumerate() {
        let row = result?;
        // Header occupies line 1; fall back to the row index when the csv
        // reader cannot report a position.
        let line = row.position().map(|p| p.line()).unwrap_or(i as u64 + 2);

        let date_raw = get_cell(&row, date_idx, spec.columns.date, path, line)?;
        let date = spec.date_layout.parse(date_raw).map_err(|e| {
            AdspendError::InvalidField {
                path: path.to_path_buf(),
                line,
                message: format!("invalid date '{}': {}", date_raw, e),
            }
        })?;

        let cost_raw = get_cell(&row, cost_idx, spec.columns.cost, path, line)?;
        let raw_cost: f64 = cost_raw.parse().map_err(|_| AdspendError::InvalidField {
            path: path.to_path_buf(),
            line,
            message: format!("invalid number '{}' in column '{}'", cost_raw, spec.columns.cost),
        })?;
        let cost = spec.cost_conversion.apply(raw_cost);

        let clicks = parse_optional_count(&row, clicks_idx, spec.columns.clicks, path, line)?;
        let impressions =
            parse_optional_count(&row, impressions_idx, spec.columns.impressions, path, line)?;

        records.push(CanonicalRecord {
            date,
            platform: spec.platform,
            cost,
            clicks,
            impressions,
        });
    }

    debug!(
        file = %path.display(),
        platform = %spec.platform,
        rows = records.len(),
        "raw source loaded"
    );

    Ok(records)
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Map normalised header names to their column index.
///
/// Normalisation strips a UTF-8 BOM on the first header, trims whitespace,
/// and lowercases, so exports from spreadsheet tools still resolve.
fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .map(|(idx, name)| (normalize_header(name), idx))
        .collect()
}

fn normalize_header(name: &str) -> String {
    name.trim_start_matches('\u{feff}').trim().to_lowercase()
}

/// Resolve a mapped column to its index or fail naming the column.
fn require_column(headers: &HashMap<String, usize>, column: &str, path: &Path) -> Result<usize> {
    headers
        .get(column)
        .copied()
        .ok_or_else(|| AdspendError::MissingColumn {
            column: column.to_string(),
            path: path.to_path_buf(),
        })
}

/// Fetch a required cell by index.
fn get_cell<'r>(
    row: &'r StringRecord,
    idx: usize,
    column: &str,
    path: &Path,
    line: u64,
) -> Result<&'r str> {
    row.get(idx).ok_or_else(|| AdspendError::InvalidField {
        path: path.to_path_buf(),
        line,
        message: format!("row too short, no value for column '{}'", column),
    })
}

/// Parse an optional count column. Absent column or empty cell → `None`.
fn parse_optional_count(
    row: &StringRecord,
    idx: Option<usize>,
    column: Option<&'static str>,
    path: &Path,
    line: u64,
) -> Result<Option<u64>> {
    let Some(idx) = idx else {
        return Ok(None);
    };
    let raw = row.get(idx).unwrap_or("");
    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse::<u64>()
        .map(Some)
        .map_err(|_| AdspendError::InvalidField {
            path: path.to_path_buf(),
            line,
            message: format!(
                "invalid count '{}' in column '{}'",
                raw,
                column.unwrap_or("?")
            ),
        })
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;
    use tempfile::TempDir;

    use adspend_core::models::Platform;

    // ── Helpers ───────────────────────────────────────────────────────────────

    fn write_csv(dir: &Path, name: &str, lines: &[&str]) -> PathBuf {
        let path = dir.join(name);
        let mut file = File::create(&path).unwrap();
        for line in lines {
            writeln!(file, "{}", line).unwrap();
        }
        path
    }

    // ── read_source: per-platform mapping ────────────────────────────────────

    #[test]
    fn test_read_google_converts_usd_and_nulls_impressions() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(
            dir.path(),
            "google_ads.csv",
            &[
                "data,custo_usd,cliques",
                "2025-01-15,10.0,1200",
                "2025-01-16,99.5,800",
            ],
        );

        let records = read_source(&path, &SourceSpec::google_ads()).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].platform, Platform::GoogleAds);
        assert!((records[0].cost - 51.5).abs() < 1e-9, "10 USD → 51.50 BRL");
        assert_eq!(records[0].clicks, Some(1_200));
        assert_eq!(records[0].impressions, None);
        assert_eq!(
            records[0].date,
            chrono::NaiveDate::from_ymd_opt(2025, 1, 15).unwrap()
        );
    }

    #[test]
    fn test_read_facebook_divides_centavos_and_parses_day_first_dates() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(
            dir.path(),
            "facebook_ads.csv",
            &[
                "date,spend_brl,impressions,clicks",
                "15/01/2025,5000,30000,100",
            ],
        );

        let records = read_source(&path, &SourceSpec::facebook_ads()).unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].platform, Platform::FacebookAds);
        assert!((records[0].cost - 50.0).abs() < 1e-9, "5000 centavos → 50.00 BRL");
        assert_eq!(records[0].clicks, Some(100));
        assert_eq!(records[0].impressions, Some(30_000));
        assert_eq!(
            records[0].date,
            chrono::NaiveDate::from_ymd_opt(2025, 1, 15).unwrap()
        );
    }

    #[test]
    fn test_read_linkedin_keeps_brl_and_nulls_clicks() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(
            dir.path(),
            "linkedin_ads.csv",
            &["dia,valor_gasto,impressoes", "2025-02-01,123.45,9000"],
        );

        let records = read_source(&path, &SourceSpec::linkedin_ads()).unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].platform, Platform::LinkedinAds);
        assert!((records[0].cost - 123.45).abs() < 1e-9);
        assert_eq!(records[0].clicks, None);
        assert_eq!(records[0].impressions, Some(9_000));
    }

    #[test]
    fn test_read_source_preserves_row_order() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(
            dir.path(),
            "google_ads.csv",
            &[
                "data,custo_usd,cliques",
                "2025-03-03,1.0,10",
                "2025-01-01,2.0,20",
                "2025-02-02,3.0,30",
            ],
        );

        let records = read_source(&path, &SourceSpec::google_ads()).unwrap();
        let days: Vec<u32> = records.iter().map(|r| {
            use chrono::Datelike;
            r.date.month()
        }).collect();
        // Exactly the file order, not date order.
        assert_eq!(days, vec![3, 1, 2]);
    }

    #[test]
    fn test_read_source_handles_header_bom_and_case() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(
            dir.path(),
            "google_ads.csv",
            &["\u{feff}Data,CUSTO_USD,Cliques", "2025-01-15,10.0,1200"],
        );

        let records = read_source(&path, &SourceSpec::google_ads()).unwrap();
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn test_read_source_empty_optional_cell_is_null() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(
            dir.path(),
            "facebook_ads.csv",
            &["date,spend_brl,impressions,clicks", "15/01/2025,5000,30000,"],
        );

        let records = read_source(&path, &SourceSpec::facebook_ads()).unwrap();
        assert_eq!(records[0].clicks, None);
        assert_eq!(records[0].impressions, Some(30_000));
    }

    // ── read_source: failures ─────────────────────────────────────────────────

    #[test]
    fn test_read_source_missing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("google_ads.csv");

        let err = read_source(&path, &SourceSpec::google_ads()).unwrap_err();
        match err {
            AdspendError::MissingSource { platform, path: p } => {
                assert_eq!(platform, Platform::GoogleAds);
                assert!(p.ends_with("google_ads.csv"));
            }
            other => panic!("expected MissingSource, got {other:?}"),
        }
    }

    #[test]
    fn test_read_source_missing_column() {
        let dir = TempDir::new().unwrap();
        // 'custo_usd' renamed away.
        let path = write_csv(
            dir.path(),
            "google_ads.csv",
            &["data,cost,cliques", "2025-01-15,10.0,1200"],
        );

        let err = read_source(&path, &SourceSpec::google_ads()).unwrap_err();
        match err {
            AdspendError::MissingColumn { column, .. } => assert_eq!(column, "custo_usd"),
            other => panic!("expected MissingColumn, got {other:?}"),
        }
    }

    #[test]
    fn test_read_source_invalid_date_names_line() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(
            dir.path(),
            "google_ads.csv",
            &[
                "data,custo_usd,cliques",
                "2025-01-15,10.0,1200",
                "not-a-date,10.0,1200",
            ],
        );

        let err = read_source(&path, &SourceSpec::google_ads()).unwrap_err();
        match err {
            AdspendError::InvalidField { line, message, .. } => {
                assert_eq!(line, 3);
                assert!(message.contains("not-a-date"));
            }
            other => panic!("expected InvalidField, got {other:?}"),
        }
    }

    #[test]
    fn test_read_source_invalid_cost() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(
            dir.path(),
            "linkedin_ads.csv",
            &["dia,valor_gasto,impressoes", "2025-02-01,abc,9000"],
        );

        let err = read_source(&path, &SourceSpec::linkedin_ads()).unwrap_err();
        match err {
            AdspendError::InvalidField { message, .. } => {
                assert!(message.contains("valor_gasto"));
                assert!(message.contains("abc"));
            }
            other => panic!("expected InvalidField, got {other:?}"),
        }
    }

    #[test]
    fn test_read_source_negative_count_rejected() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(
            dir.path(),
            "facebook_ads.csv",
            &["date,spend_brl,impressions,clicks", "15/01/2025,5000,-1,100"],
        );

        let err = read_source(&path, &SourceSpec::facebook_ads()).unwrap_err();
        assert!(matches!(err, AdspendError::InvalidField { .. }));
    }
}
