//! Ratio registry for discovering and describing the available ratios.

use crate::insight::InsightCategory;
use crate::ratio::RatioKind;
use serde::Serialize;

/// Metadata about a ratio.
#[derive(Debug, Clone, Serialize)]
pub struct RatioInfo {
    /// Unique identifier for the ratio
    pub name: &'static str,

    /// Ratio this entry describes
    pub kind: RatioKind,

    /// Insight category the ratio informs
    pub category: InsightCategory,

    /// Human-readable description
    pub description: &'static str,

    /// Formula in terms of statement lines
    pub formula: &'static str,

    /// Alternative names accepted on lookup
    pub aliases: &'static [&'static str],
}

impl RatioInfo {
    /// Whether the ratio is reported as a percentage.
    #[must_use]
    pub const fn is_percentage(&self) -> bool {
        self.kind.is_percentage()
    }

    fn matches(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
            || self.aliases.iter().any(|a| a.eq_ignore_ascii_case(name))
    }
}

/// Get information about all available ratios.
#[must_use]
pub fn available_ratios() -> Vec<RatioInfo> {
    vec![
        RatioInfo {
            name: RatioKind::Roa.name(),
            kind: RatioKind::Roa,
            category: RatioKind::Roa.category(),
            description: "Return on assets: profit generated per unit of assets",
            formula: "net_profit / total_assets x 100",
            aliases: &["return_on_assets"],
        },
        RatioInfo {
            name: RatioKind::Roe.name(),
            kind: RatioKind::Roe,
            category: RatioKind::Roe.category(),
            description: "Return on equity: profit generated per unit of shareholder capital",
            formula: "net_profit / equity x 100",
            aliases: &["return_on_equity"],
        },
        RatioInfo {
            name: RatioKind::Ros.name(),
            kind: RatioKind::Ros,
            category: RatioKind::Ros.category(),
            description: "Return on sales: net profit retained from each unit of revenue",
            formula: "net_profit / revenue x 100",
            aliases: &["return_on_sales", "net_margin"],
        },
        RatioInfo {
            name: RatioKind::GrossProfitMargin.name(),
            kind: RatioKind::GrossProfitMargin,
            category: RatioKind::GrossProfitMargin.category(),
            description: "Gross profit retained from each unit of revenue",
            formula: "gross_profit / revenue x 100",
            aliases: &["gpm", "gross_margin"],
        },
        RatioInfo {
            name: RatioKind::CurrentRatio.name(),
            kind: RatioKind::CurrentRatio,
            category: RatioKind::CurrentRatio.category(),
            description: "Current assets available per unit of current liabilities",
            formula: "current_assets / current_liabilities",
            aliases: &["cr", "liquidity"],
        },
        RatioInfo {
            name: RatioKind::DebtToEquity.name(),
            kind: RatioKind::DebtToEquity,
            category: RatioKind::DebtToEquity.category(),
            description: "Total liabilities relative to shareholder equity",
            formula: "total_liabilities / equity x 100",
            aliases: &["de", "d/e", "leverage"],
        },
    ]
}

/// Get all ratios in a specific category.
#[must_use]
pub fn ratios_by_category(category: &InsightCategory) -> Vec<RatioInfo> {
    available_ratios()
        .into_iter()
        .filter(|info| &info.category == category)
        .collect()
}

/// Get information about a ratio by name or alias, ignoring ASCII case.
#[must_use]
pub fn ratio_info(name: &str) -> Option<RatioInfo> {
    available_ratios()
        .into_iter()
        .find(|info| info.matches(name.trim()))
}
