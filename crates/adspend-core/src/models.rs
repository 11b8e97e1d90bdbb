use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::metrics::Metric;

/// The advertising platform a record originates from.
///
/// Variant order matches the pipeline's consolidation order (Google →
/// Facebook → LinkedIn), so deriving `Ord` keeps grouped output in the same
/// order the consolidated file is written in.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Platform {
    #[serde(rename = "Google Ads")]
    GoogleAds,
    #[serde(rename = "Facebook Ads")]
    FacebookAds,
    #[serde(rename = "LinkedIn Ads")]
    LinkedinAds,
}

impl Platform {
    /// All platforms, in consolidation order.
    pub const ALL: [Platform; 3] = [
        Platform::GoogleAds,
        Platform::FacebookAds,
        Platform::LinkedinAds,
    ];

    /// The canonical label stored in the `plataforma` column.
    pub fn label(&self) -> &'static str {
        match self {
            Platform::GoogleAds => "Google Ads",
            Platform::FacebookAds => "Facebook Ads",
            Platform::LinkedinAds => "LinkedIn Ads",
        }
    }

    /// Compact label for places where the full one does not fit.
    pub fn short_label(&self) -> &'static str {
        match self {
            Platform::GoogleAds => "Google",
            Platform::FacebookAds => "Facebook",
            Platform::LinkedinAds => "LinkedIn",
        }
    }

    /// Resolve a canonical label back into a platform.
    pub fn from_label(label: &str) -> Option<Platform> {
        Platform::ALL.into_iter().find(|p| p.label() == label)
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A normalized marketing-performance row in the unified schema.
///
/// Only the measured fields are stored. The efficiency metrics (`cpc`,
/// `cpm`) are derived on demand from cost and the nullable denominators, so
/// a record can never carry a stale derived value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalRecord {
    /// Calendar date of the spend, normalized from each source's format.
    #[serde(rename = "data")]
    pub date: NaiveDate,
    /// Originating platform.
    #[serde(rename = "plataforma")]
    pub platform: Platform,
    /// Spend in BRL, major units.
    #[serde(rename = "custo")]
    pub cost: f64,
    /// Click count; `None` for sources that do not report it.
    #[serde(rename = "cliques")]
    pub clicks: Option<u64>,
    /// Impression count; `None` for sources that do not report it.
    #[serde(rename = "impressoes")]
    pub impressions: Option<u64>,
}

impl CanonicalRecord {
    /// Cost per click: `cost / clicks`, null when clicks is null or zero.
    pub fn cost_per_click(&self) -> Option<f64> {
        (Metric::new(self.cost) / Metric::from_count(self.clicks)).value()
    }

    /// Cost per thousand impressions: `cost / impressions × 1000`, null when
    /// impressions is null or zero.
    pub fn cost_per_mille(&self) -> Option<f64> {
        ((Metric::new(self.cost) / Metric::from_count(self.impressions)) * 1000.0).value()
    }
}
