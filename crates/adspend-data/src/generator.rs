//! Synthetic raw-export generator.
//!
//! Produces the three platform exports under `data_raw/` with their
//! source-native headers, so a fresh checkout can exercise the pipeline and
//! the dashboard without real exports. Value ranges mirror what the real
//! platforms produce at this account's scale.

use std::fs::File;
use std::path::{Path, PathBuf};

use adspend_core::error::Result;
use adspend_core::models::Platform;
use adspend_core::paths::ProjectPaths;
use chrono::{Duration, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;

use crate::sources::SourceSpec;

// ── Constants ─────────────────────────────────────────────────────────────────

/// First date synthetic rows may carry.
const SPAN_START: NaiveDate = match NaiveDate::from_ymd_opt(2025, 1, 1) {
    Some(d) => d,
    None => unreachable!(),
};

/// Last date synthetic rows may carry (inclusive).
const SPAN_END: NaiveDate = match NaiveDate::from_ymd_opt(2025, 10, 31) {
    Some(d) => d,
    None => unreachable!(),
};

// ── Public types ──────────────────────────────────────────────────────────────

/// One raw export written by [`generate_raw_sources`].
#[derive(Debug, Clone)]
pub struct GeneratedFile {
    pub platform: Platform,
    pub path: PathBuf,
    pub rows: usize,
}

/// The complete output of [`generate_raw_sources`].
#[derive(Debug, Clone)]
pub struct GenerateSummary {
    /// Files written, in consolidation order.
    pub files: Vec<GeneratedFile>,
}

// ── Public function ───────────────────────────────────────────────────────────

/// Write synthetic versions of the three raw exports under `data_raw/`.
///
/// With a `seed` the output is reproducible; without one the generator draws
/// from OS entropy.
pub fn generate_raw_sources(
    paths: &ProjectPaths,
    rows: usize,
    seed: Option<u64>,
) -> Result<GenerateSummary> {
    let raw_dir = paths.raw_dir();
    std::fs::create_dir_all(&raw_dir)?;

    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let mut files = Vec::with_capacity(3);
    for spec in SourceSpec::all() {
        let path = spec.path_in(&raw_dir);
        write_source(&path, &spec, rows, &mut rng)?;
        info!(file = %path.display(), rows, "raw export generated");
        files.push(GeneratedFile {
            platform: spec.platform,
            path,
            rows,
        });
    }

    Ok(GenerateSummary { files })
}

// ── Internal helpers ──────────────────────────────────────────────────────────

fn write_source(path: &Path, spec: &SourceSpec, rows: usize, rng: &mut StdRng) -> Result<()> {
    let mut writer = csv::Writer::from_writer(File::create(path)?);
    writer.write_record(header_for(spec))?;

    for _ in 0..rows {
        let date = spec.date_layout.format(random_date(rng));
        match spec.platform {
            Platform::GoogleAds => {
                let cost_usd = round2(rng.random_range(30.0..=250.0));
                let clicks: u64 = rng.random_range(800..=7000);
                writer.write_record([date, format!("{:.2}", cost_usd), clicks.to_string()])?;
            }
            Platform::FacebookAds => {
                let spend_centavos: u64 = rng.random_range(10_000..=500_000);
                let impressions: u64 = rng.random_range(20_000..=150_000);
                let clicks: u64 = rng.random_range(500..=3_000);
                writer.write_record([
                    date,
                    spend_centavos.to_string(),
                    impressions.to_string(),
                    clicks.to_string(),
                ])?;
            }
            Platform::LinkedinAds => {
                let cost_brl = round2(rng.random_range(50.0..=400.0));
                let impressions: u64 = rng.random_range(5_000..=30_000);
                writer.write_record([
                    date,
                    format!("{:.2}", cost_brl),
                    impressions.to_string(),
                ])?;
            }
        }
    }

    writer.flush()?;
    Ok(())
}

/// The source-native header row, in the mapped column order.
fn header_for(spec: &SourceSpec) -> Vec<&'static str> {
    match spec.platform {
        Platform::GoogleAds => vec!["data", "custo_usd", "cliques"],
        Platform::FacebookAds => vec!["date", "spend_brl", "impressions", "clicks"],
        Platform::LinkedinAds => vec!["dia", "valor_gasto", "impressoes"],
    }
}

fn random_date(rng: &mut StdRng) -> NaiveDate {
    let span_days = (SPAN_END - SPAN_START).num_days();
    SPAN_START + Duration::days(rng.random_range(0..=span_days))
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

// ── Tests ─────────────────────────────────────────────────────────────────────
