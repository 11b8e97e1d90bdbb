//! Declarative mapping tables from each platform's raw export to the
//! canonical schema.
//!
//! Every per-source difference lives here as data: which column holds which
//! canonical field, which date layout the export uses, and how its cost
//! value converts into BRL major units. The reader is a single generic loop
//! driven by these tables, so adding or auditing a source never touches
//! parsing code.

use std::path::{Path, PathBuf};

use adspend_core::models::Platform;
use chrono::NaiveDate;

/// Fixed USD→BRL exchange rate applied to Google Ads costs.
pub const USD_TO_BRL_RATE: f64 = 5.15;

// ── Conversion rules ──────────────────────────────────────────────────────────

/// Date layout used by a raw export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateLayout {
    /// ISO calendar date, `2025-01-31`.
    YearMonthDay,
    /// Brazilian day-first text, `31/01/2025`.
    DayMonthYear,
}

impl DateLayout {
    /// The `chrono` format pattern for this layout.
    pub fn pattern(&self) -> &'static str {
        match self {
            DateLayout::YearMonthDay => "%Y-%m-%d",
            DateLayout::DayMonthYear => "%d/%m/%Y",
        }
    }

    /// Parse a raw cell into a calendar date.
    pub fn parse(&self, raw: &str) -> Result<NaiveDate, chrono::ParseError> {
        NaiveDate::parse_from_str(raw, self.pattern())
    }

    /// Render a date back into this layout (used by the generator).
    pub fn format(&self, date: NaiveDate) -> String {
        date.format(self.pattern()).to_string()
    }
}

/// How a raw cost value converts into BRL major units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CostConversion {
    /// Multiply by [`USD_TO_BRL_RATE`].
    UsdToBrl,
    /// Divide by 100 (the export stores centavos).
    CentavosToBrl,
    /// Already BRL major units.
    Identity,
}

impl CostConversion {
    /// Apply the conversion to a raw cost value.
    pub fn apply(&self, raw: f64) -> f64 {
        match self {
            CostConversion::UsdToBrl => raw * USD_TO_BRL_RATE,
            CostConversion::CentavosToBrl => raw / 100.0,
            CostConversion::Identity => raw,
        }
    }
}

// ── Column mapping ────────────────────────────────────────────────────────────

/// Raw column names holding each canonical field. `None` means the source
/// does not report that field and the canonical value is null.
#[derive(Debug, Clone)]
pub struct ColumnMap {
    pub date: &'static str,
    pub cost: &'static str,
    pub clicks: Option<&'static str>,
    pub impressions: Option<&'static str>,
}

/// Complete mapping description for one raw source.
#[derive(Debug, Clone)]
pub struct SourceSpec {
    pub platform: Platform,
    pub file_name: &'static str,
    pub columns: ColumnMap,
    pub date_layout: DateLayout,
    pub cost_conversion: CostConversion,
}

impl SourceSpec {
    /// Google Ads export: ISO dates, USD costs, clicks, no impressions.
    pub fn google_ads() -> SourceSpec {
        SourceSpec {
            platform: Platform::GoogleAds,
            file_name: "google_ads.csv",
            columns: ColumnMap {
                date: "data",
                cost: "custo_usd",
                clicks: Some("cliques"),
                impressions: None,
            },
            date_layout: DateLayout::YearMonthDay,
            cost_conversion: CostConversion::UsdToBrl,
        }
    }

    /// Facebook Ads export: day-first dates, centavo costs, clicks and
    /// impressions.
    pub fn facebook_ads() -> SourceSpec {
        SourceSpec {
            platform: Platform::FacebookAds,
            file_name: "facebook_ads.csv",
            columns: ColumnMap {
                date: "date",
                cost: "spend_brl",
                clicks: Some("clicks"),
                impressions: Some("impressions"),
            },
            date_layout: DateLayout::DayMonthYear,
            cost_conversion: CostConversion::CentavosToBrl,
        }
    }

    /// LinkedIn Ads export: ISO dates, BRL costs, impressions, no clicks.
    pub fn linkedin_ads() -> SourceSpec {
        SourceSpec {
            platform: Platform::LinkedinAds,
            file_name: "linkedin_ads.csv",
            columns: ColumnMap {
                date: "dia",
                cost: "valor_gasto",
                clicks: None,
                impressions: Some("impressoes"),
            },
            date_layout: DateLayout::YearMonthDay,
            cost_conversion: CostConversion::Identity,
        }
    }

    /// Mapping tables for the three sources, in consolidation order.
    pub fn all() -> [SourceSpec; 3] {
        [
            Self::google_ads(),
            Self::facebook_ads(),
            Self::linkedin_ads(),
        ]
    }

    /// The mapping table for a given platform.
    pub fn for_platform(platform: Platform) -> SourceSpec {
        match platform {
            Platform::GoogleAds => Self::google_ads(),
            Platform::FacebookAds => Self::facebook_ads(),
            Platform::LinkedinAds => Self::linkedin_ads(),
        }
    }

    /// Resolve the raw file location under `raw_dir`.
    pub fn path_in(&self, raw_dir: &Path) -> PathBuf {
        raw_dir.join(self.file_name)
    }
}
