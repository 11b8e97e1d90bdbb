//! The normalizer pipeline.
//!
//! Orchestrates reading the three raw platform exports, concatenating them in
//! consolidation order and writing the canonical consolidated file, returning
//! an [`EtlSummary`] ready for the CLI layer.

use std::path::PathBuf;

use adspend_core::error::Result;
use adspend_core::models::Platform;
use adspend_core::paths::ProjectPaths;
use chrono::Utc;
use tracing::info;

use crate::consolidated::write_consolidated;
use crate::reader::read_source;
use crate::sources::SourceSpec;

// ── Public types ──────────────────────────────────────────────────────────────

/// Row count contributed by a single raw source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceCount {
    pub platform: Platform,
    pub rows: usize,
}

/// The complete output of [`run_pipeline`].
#[derive(Debug, Clone)]
pub struct EtlSummary {
    /// ISO-8601 timestamp when this run finished.
    pub generated_at: String,
    /// Rows read per source, in consolidation order.
    pub source_counts: Vec<SourceCount>,
    /// Total rows written to the consolidated file.
    pub total_records: usize,
    /// Where the consolidated file was written.
    pub output_path: PathBuf,
    /// Wall-clock seconds spent reading the raw exports.
    pub load_time_seconds: f64,
    /// Wall-clock seconds spent writing the consolidated file.
    pub write_time_seconds: f64,
}

// ── Public function ───────────────────────────────────────────────────────────

/// Run the full normalizer pipeline.
///
/// 1. Read every raw export under `data_raw/`, normalizing each row.
/// 2. Concatenate the sources in consolidation order.
/// 3. Write the canonical file to `data_clean/marketing_consolidado.csv`.
///
/// All three sources are read before anything is written, so a missing file
/// or a malformed row leaves a previously written consolidated file
/// untouched.
pub fn run_pipeline(paths: &ProjectPaths) -> Result<EtlSummary> {
    let raw_dir = paths.raw_dir();

    // ── Step 1: Read raw exports ──────────────────────────────────────────────
    let load_start = std::time::Instant::now();
    let mut source_counts = Vec::with_capacity(3);
    let mut per_source = Vec::with_capacity(3);
    for spec in SourceSpec::all() {
        let records = read_source(&spec.path_in(&raw_dir), &spec)?;
        source_counts.push(SourceCount {
            platform: spec.platform,
            rows: records.len(),
        });
        per_source.push(records);
    }
    let load_time = load_start.elapsed().as_secs_f64();

    // ── Step 2: Concatenate in consolidation order ────────────────────────────
    let records: Vec<_> = per_source.into_iter().flatten().collect();

    // ── Step 3: Write the consolidated file ───────────────────────────────────
    let output_path = paths.consolidated();
    let write_start = std::time::Instant::now();
    write_consolidated(&output_path, &records)?;
    let write_time = write_start.elapsed().as_secs_f64();

    info!(
        output = %output_path.display(),
        rows = records.len(),
        "pipeline finished"
    );

    Ok(EtlSummary {
        generated_at: Utc::now().to_rfc3339(),
        source_counts,
        total_records: records.len(),
        output_path,
        load_time_seconds: load_time,
        write_time_seconds: write_time,
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────
