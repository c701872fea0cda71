//! Per-period ratio computation.
//!
//! Each ratio is a quotient of two statement lines, optionally scaled to a
//! percentage. A ratio whose inputs cannot produce a finite value is carried
//! as [`RatioValue::Undefined`] instead of failing or yielding infinity, and
//! each ratio in a [`RatioSet`] degrades independently of the others.

use crate::insight::InsightCategory;
use ronda_traits::{PeriodKey, StatementField, StatementPeriod};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// The standard ratio set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RatioKind {
    /// Return on assets: net profit / total assets (%).
    Roa,
    /// Return on equity: net profit / equity (%).
    Roe,
    /// Return on sales: net profit / revenue (%).
    Ros,
    /// Gross profit margin: gross profit / revenue (%).
    GrossProfitMargin,
    /// Current ratio: current assets / current liabilities (times).
    CurrentRatio,
    /// Debt to equity: total liabilities / equity (%).
    DebtToEquity,
}

impl RatioKind {
    /// Every ratio, in reporting order.
    pub const ALL: [Self; 6] = [
        Self::Roa,
        Self::Roe,
        Self::Ros,
        Self::GrossProfitMargin,
        Self::CurrentRatio,
        Self::DebtToEquity,
    ];

    /// Statement line divided.
    #[must_use]
    pub const fn numerator(&self) -> StatementField {
        match self {
            Self::Roa | Self::Roe | Self::Ros => StatementField::NetProfit,
            Self::GrossProfitMargin => StatementField::GrossProfit,
            Self::CurrentRatio => StatementField::CurrentAssets,
            Self::DebtToEquity => StatementField::TotalLiabilities,
        }
    }

    /// Statement line divided by.
    #[must_use]
    pub const fn denominator(&self) -> StatementField {
        match self {
            Self::Roa => StatementField::TotalAssets,
            Self::Roe | Self::DebtToEquity => StatementField::Equity,
            Self::Ros | Self::GrossProfitMargin => StatementField::Revenue,
            Self::CurrentRatio => StatementField::CurrentLiabilities,
        }
    }

    /// Whether the quotient is expressed as a percentage.
    #[must_use]
    pub const fn is_percentage(&self) -> bool {
        !matches!(self, Self::CurrentRatio)
    }

    /// Multiplier applied to the raw quotient.
    #[must_use]
    pub const fn scale(&self) -> f64 {
        if self.is_percentage() { 100.0 } else { 1.0 }
    }

    /// Machine name, matching the serialized form.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Roa => "roa",
            Self::Roe => "roe",
            Self::Ros => "ros",
            Self::GrossProfitMargin => "gross_profit_margin",
            Self::CurrentRatio => "current_ratio",
            Self::DebtToEquity => "debt_to_equity",
        }
    }

    /// Short display label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Roa => "ROA",
            Self::Roe => "ROE",
            Self::Ros => "ROS",
            Self::GrossProfitMargin => "Gross profit margin",
            Self::CurrentRatio => "Current ratio",
            Self::DebtToEquity => "Debt-to-equity",
        }
    }

    /// The insight category this ratio informs.
    #[must_use]
    pub const fn category(&self) -> InsightCategory {
        match self {
            Self::Roa | Self::Roe | Self::Ros => InsightCategory::Profitability,
            Self::GrossProfitMargin => InsightCategory::Efficiency,
            Self::CurrentRatio => InsightCategory::Liquidity,
            Self::DebtToEquity => InsightCategory::Leverage,
        }
    }

    /// Computes this ratio for one period.
    #[must_use]
    pub fn compute(&self, period: &StatementPeriod) -> RatioValue {
        let numerator = self.numerator();
        let denominator = self.denominator();

        let Some(num) = period.value(numerator) else {
            return RatioValue::Undefined(UndefinedRatio::MissingNumerator(numerator));
        };
        let Some(den) = period.value(denominator) else {
            return RatioValue::Undefined(UndefinedRatio::MissingDenominator(denominator));
        };
        if den == 0.0 {
            return RatioValue::Undefined(UndefinedRatio::ZeroDenominator(denominator));
        }

        let value = num / den * self.scale();
        if value.is_finite() {
            RatioValue::Defined(value)
        } else {
            RatioValue::Undefined(UndefinedRatio::NonFinite)
        }
    }

    /// Formats a defined value with its unit.
    #[must_use]
    pub fn format_value(&self, value: f64) -> String {
        if self.is_percentage() {
            format!("{value:.2}%")
        } else {
            format!("{value:.2}x")
        }
    }
}

impl fmt::Display for RatioKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Why a ratio could not be computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "reason", content = "field", rename_all = "snake_case")]
pub enum UndefinedRatio {
    /// The numerator line is missing.
    #[error("{0} is missing")]
    MissingNumerator(StatementField),
    /// The denominator line is missing.
    #[error("{0} is missing")]
    MissingDenominator(StatementField),
    /// The denominator line is zero.
    #[error("{0} is zero")]
    ZeroDenominator(StatementField),
    /// The quotient overflowed.
    #[error("result is not finite")]
    NonFinite,
}

/// A ratio value: a finite number, or the reason none exists.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RatioValue {
    /// A finite computed value.
    Defined(f64),
    /// The ratio could not be computed.
    Undefined(UndefinedRatio),
}

impl RatioValue {
    /// The numeric value, if defined.
    #[must_use]
    pub const fn value(&self) -> Option<f64> {
        match self {
            Self::Defined(v) => Some(*v),
            Self::Undefined(_) => None,
        }
    }

    /// Whether the ratio was computed.
    #[must_use]
    pub const fn is_defined(&self) -> bool {
        matches!(self, Self::Defined(_))
    }

    /// The undefined marker, if any.
    #[must_use]
    pub const fn undefined(&self) -> Option<UndefinedRatio> {
        match self {
            Self::Defined(_) => None,
            Self::Undefined(reason) => Some(*reason),
        }
    }
}

impl fmt::Display for RatioValue {
    /// Defined values print with two decimals unless a precision is given;
    /// undefined values print as `N/A`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Defined(v) => {
                let precision = f.precision().unwrap_or(2);
                write!(f, "{v:.precision$}")
            }
            Self::Undefined(_) => f.write_str("N/A"),
        }
    }
}

/// The ratio set of one reporting period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatioSet {
    /// Period the ratios were computed for.
    pub period: PeriodKey,
    /// Return on assets (%).
    pub roa: RatioValue,
    /// Return on equity (%).
    pub roe: RatioValue,
    /// Return on sales (%).
    pub ros: RatioValue,
    /// Gross profit margin (%).
    pub gross_profit_margin: RatioValue,
    /// Current ratio (times).
    pub current_ratio: RatioValue,
    /// Debt to equity (%).
    pub debt_to_equity: RatioValue,
}

impl RatioSet {
    /// Computes every ratio for one period.
    #[must_use]
    pub fn compute(period: &StatementPeriod) -> Self {
        Self {
            period: period.period(),
            roa: RatioKind::Roa.compute(period),
            roe: RatioKind::Roe.compute(period),
            ros: RatioKind::Ros.compute(period),
            gross_profit_margin: RatioKind::GrossProfitMargin.compute(period),
            current_ratio: RatioKind::CurrentRatio.compute(period),
            debt_to_equity: RatioKind::DebtToEquity.compute(period),
        }
    }

    /// Value of one ratio.
    #[must_use]
    pub const fn get(&self, kind: RatioKind) -> RatioValue {
        match kind {
            RatioKind::Roa => self.roa,
            RatioKind::Roe => self.roe,
            RatioKind::Ros => self.ros,
            RatioKind::GrossProfitMargin => self.gross_profit_margin,
            RatioKind::CurrentRatio => self.current_ratio,
            RatioKind::DebtToEquity => self.debt_to_equity,
        }
    }

    /// Iterates over `(kind, value)` pairs in reporting order.
    pub fn iter(&self) -> impl Iterator<Item = (RatioKind, RatioValue)> + '_ {
        RatioKind::ALL.into_iter().map(|kind| (kind, self.get(kind)))
    }

    /// Number of ratios that could not be computed.
    #[must_use]
    pub fn undefined_count(&self) -> usize {
        self.iter().filter(|(_, v)| !v.is_defined()).count()
    }
}

/// Computes the ratio set for one period.
#[must_use]
pub fn compute_ratios(period: &StatementPeriod) -> RatioSet {
    RatioSet::compute(period)
}
