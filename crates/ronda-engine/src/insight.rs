//! Rule-based commentary over a ratio series.
//!
//! Four fixed categories are assessed from a series of [`RatioSet`]s ordered
//! oldest to newest:
//! - Profitability: latest ROE against the first period's ROE
//! - Liquidity: every trailing current ratio against a threshold
//! - Leverage: latest debt-to-equity against a threshold
//! - Efficiency: latest gross margin against the first period's
//!
//! An [`InsightSet`] always holds all four. When a rule cannot be evaluated
//! the category reports [`Assessment::InsufficientData`] rather than being
//! left out.

use crate::config::{InsightConfig, UndefinedPolicy};
use crate::ratio::{RatioKind, RatioSet, RatioValue};
use ronda_traits::PeriodKey;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Insight category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightCategory {
    /// Returns generated on equity
    Profitability,
    /// Ability to meet short-term obligations
    Liquidity,
    /// Reliance on debt financing
    Leverage,
    /// Operating efficiency
    Efficiency,
}

impl InsightCategory {
    /// Every category, in reporting order.
    pub const ALL: [Self; 4] = [
        Self::Profitability,
        Self::Liquidity,
        Self::Leverage,
        Self::Efficiency,
    ];

    /// Machine name, matching the serialized form.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Profitability => "profitability",
            Self::Liquidity => "liquidity",
            Self::Leverage => "leverage",
            Self::Efficiency => "efficiency",
        }
    }

    /// Get a human-readable description of the category.
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::Profitability => "Returns on assets, equity and sales",
            Self::Liquidity => "Short-term solvency from current assets and liabilities",
            Self::Leverage => "Capital structure and reliance on liabilities",
            Self::Efficiency => "Gross margin as a measure of operating efficiency",
        }
    }
}

impl fmt::Display for InsightCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The rule outcome selected for a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Assessment {
    /// Latest value is above the first period's.
    Improving,
    /// Latest value is at or below the first period's.
    Declining,
    /// Every trailing current ratio exceeds the threshold.
    GoodLiquidity,
    /// At least one trailing current ratio is at or below the threshold.
    NeedsMonitoring,
    /// Debt-to-equity exceeds the threshold.
    HighRisk,
    /// Debt-to-equity is at or below the threshold.
    SafeStructure,
    /// A required ratio was undefined or there were no periods.
    InsufficientData,
}

impl Assessment {
    /// `Some(true)` for favourable outcomes, `Some(false)` for unfavourable,
    /// `None` when nothing could be assessed.
    #[must_use]
    pub const fn is_favorable(&self) -> Option<bool> {
        match self {
            Self::Improving | Self::GoodLiquidity | Self::SafeStructure => Some(true),
            Self::Declining | Self::NeedsMonitoring | Self::HighRisk => Some(false),
            Self::InsufficientData => None,
        }
    }
}

/// One qualitative sentence for one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insight {
    /// Category assessed.
    pub category: InsightCategory,
    /// Rule branch selected.
    pub assessment: Assessment,
    /// Human-readable commentary.
    pub message: String,
}

impl Insight {
    fn new(category: InsightCategory, assessment: Assessment, message: String) -> Self {
        Self {
            category,
            assessment,
            message,
        }
    }

    fn insufficient(category: InsightCategory, detail: &str) -> Self {
        Self::new(
            category,
            Assessment::InsufficientData,
            format!("Insufficient data to assess {category}: {detail}."),
        )
    }
}

impl fmt::Display for Insight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// The four category insights for a ratio series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightSet {
    /// Profitability insight.
    pub profitability: Insight,
    /// Liquidity insight.
    pub liquidity: Insight,
    /// Leverage insight.
    pub leverage: Insight,
    /// Efficiency insight.
    pub efficiency: Insight,
}

impl InsightSet {
    fn insufficient(detail: &str) -> Self {
        Self {
            profitability: Insight::insufficient(InsightCategory::Profitability, detail),
            liquidity: Insight::insufficient(InsightCategory::Liquidity, detail),
            leverage: Insight::insufficient(InsightCategory::Leverage, detail),
            efficiency: Insight::insufficient(InsightCategory::Efficiency, detail),
        }
    }

    /// The insight for a category.
    #[must_use]
    pub const fn get(&self, category: InsightCategory) -> &Insight {
        match category {
            InsightCategory::Profitability => &self.profitability,
            InsightCategory::Liquidity => &self.liquidity,
            InsightCategory::Leverage => &self.leverage,
            InsightCategory::Efficiency => &self.efficiency,
        }
    }

    /// Iterates over the insights in category order.
    pub fn iter(&self) -> impl Iterator<Item = &Insight> {
        InsightCategory::ALL.into_iter().map(|c| self.get(c))
    }
}

/// Derives the four category insights from a series ordered oldest to newest.
///
/// Never fails. An empty series yields [`Assessment::InsufficientData`] for
/// every category.
#[must_use]
pub fn derive_insights(series: &[RatioSet], config: &InsightConfig) -> InsightSet {
    if series.is_empty() {
        debug!("no ratio sets supplied, every insight is insufficient");
        return InsightSet::insufficient("no reporting periods");
    }

    let insights = InsightSet {
        profitability: profitability(series, config.undefined_policy),
        liquidity: liquidity(series, config),
        leverage: leverage(series, config),
        efficiency: efficiency(series, config.undefined_policy),
    };

    for insight in insights.iter() {
        if insight.assessment == Assessment::InsufficientData {
            debug!(category = %insight.category, message = %insight.message, "insight lacks data");
        }
    }

    insights
}

fn resolve(value: RatioValue, policy: UndefinedPolicy) -> Option<f64> {
    match policy {
        UndefinedPolicy::InsufficientData => value.value(),
        UndefinedPolicy::TreatAsZero => Some(value.value().unwrap_or(0.0)),
    }
}

fn undefined_detail(kind: RatioKind, set: &RatioSet) -> String {
    match set.get(kind).undefined() {
        Some(reason) => format!("{kind} is undefined for {} ({reason})", set.period),
        None => format!("{kind} is undefined for {}", set.period),
    }
}

/// First-to-last movement of one ratio.
struct Trend {
    kind: RatioKind,
    start: f64,
    end: f64,
    from: PeriodKey,
    to: PeriodKey,
}

impl Trend {
    fn measure(series: &[RatioSet], kind: RatioKind, policy: UndefinedPolicy) -> Result<Self, String> {
        let (Some(first), Some(last)) = (series.first(), series.last()) else {
            return Err("no reporting periods".to_string());
        };
        let start = resolve(first.get(kind), policy).ok_or_else(|| undefined_detail(kind, first))?;
        let end = resolve(last.get(kind), policy).ok_or_else(|| undefined_detail(kind, last))?;
        Ok(Self {
            kind,
            start,
            end,
            from: first.period,
            to: last.period,
        })
    }

    fn is_rising(&self) -> bool {
        self.end > self.start
    }

    fn describe(&self) -> String {
        format!(
            "{} went from {} in {} to {} in {} ({:+.2} pts)",
            self.kind,
            self.kind.format_value(self.start),
            self.from,
            self.kind.format_value(self.end),
            self.to,
            self.end - self.start
        )
    }
}

fn profitability(series: &[RatioSet], policy: UndefinedPolicy) -> Insight {
    let category = InsightCategory::Profitability;
    match Trend::measure(series, RatioKind::Roe, policy) {
        Ok(trend) if trend.is_rising() => Insight::new(
            category,
            Assessment::Improving,
            format!("Profitability is improving: {}.", trend.describe()),
        ),
        Ok(trend) => Insight::new(
            category,
            Assessment::Declining,
            format!("Profitability has slipped or stalled: {}.", trend.describe()),
        ),
        Err(detail) => Insight::insufficient(category, &detail),
    }
}

fn efficiency(series: &[RatioSet], policy: UndefinedPolicy) -> Insight {
    let category = InsightCategory::Efficiency;
    match Trend::measure(series, RatioKind::GrossProfitMargin, policy) {
        Ok(trend) if trend.is_rising() => Insight::new(
            category,
            Assessment::Improving,
            format!(
                "Gross margin is widening, pointing to better efficiency: {}.",
                trend.describe()
            ),
        ),
        Ok(trend) => Insight::new(
            category,
            Assessment::Declining,
            format!(
                "Operating efficiency has not clearly improved: {}.",
                trend.describe()
            ),
        ),
        Err(detail) => Insight::insufficient(category, &detail),
    }
}

fn liquidity(series: &[RatioSet], config: &InsightConfig) -> Insight {
    let category = InsightCategory::Liquidity;
    let kind = RatioKind::CurrentRatio;
    let window = config.effective_window().min(series.len());
    let trailing = &series[series.len() - window..];

    let mut values = Vec::with_capacity(trailing.len());
    for set in trailing {
        match resolve(set.get(kind), config.undefined_policy) {
            Some(value) => values.push((set.period, value)),
            None => return Insight::insufficient(category, &undefined_detail(kind, set)),
        }
    }

    let threshold = config.liquidity_threshold;
    let weakest = values.iter().min_by(|a, b| a.1.total_cmp(&b.1));
    let Some(&(weakest_period, weakest_value)) = weakest else {
        return Insight::insufficient(category, "no reporting periods");
    };

    if values.iter().all(|(_, v)| *v > threshold) {
        Insight::new(
            category,
            Assessment::GoodLiquidity,
            format!(
                "Liquidity is healthy: the current ratio stayed above {} over the last {} period(s), with a low of {} in {}.",
                kind.format_value(threshold),
                values.len(),
                kind.format_value(weakest_value),
                weakest_period
            ),
        )
    } else {
        Insight::new(
            category,
            Assessment::NeedsMonitoring,
            format!(
                "Liquidity needs monitoring: the current ratio dropped to {} in {}, not above {}.",
                kind.format_value(weakest_value),
                weakest_period,
                kind.format_value(threshold)
            ),
        )
    }
}

fn leverage(series: &[RatioSet], config: &InsightConfig) -> Insight {
    let category = InsightCategory::Leverage;
    let kind = RatioKind::DebtToEquity;
    let Some(last) = series.last() else {
        return Insight::insufficient(category, "no reporting periods");
    };

    let threshold = config.leverage_threshold;
    match resolve(last.get(kind), config.undefined_policy) {
        Some(value) if value > threshold => Insight::new(
            category,
            Assessment::HighRisk,
            format!(
                "Leverage is high: debt-to-equity of {} in {} exceeds {}, which may signal financial risk.",
                kind.format_value(value),
                last.period,
                kind.format_value(threshold)
            ),
        ),
        Some(value) => Insight::new(
            category,
            Assessment::SafeStructure,
            format!(
                "Capital structure is sound: debt-to-equity of {} in {} is within {}.",
                kind.format_value(value),
                last.period,
                kind.format_value(threshold)
            ),
        ),
        None => Insight::insufficient(category, &undefined_detail(kind, last)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ratio::UndefinedRatio;
    use ronda_traits::StatementField;

    const UNDEFINED: RatioValue =
        RatioValue::Undefined(UndefinedRatio::MissingDenominator(StatementField::Equity));

    fn set(year: i32, roe: f64, current: f64, debt: f64, margin: f64) -> RatioSet {
        RatioSet {
            period: PeriodKey::annual(year),
            roa: RatioValue::Defined(roe / 2.0),
            roe: RatioValue::Defined(roe),
            ros: RatioValue::Defined(roe / 3.0),
            gross_profit_margin: RatioValue::Defined(margin),
            current_ratio: RatioValue::Defined(current),
            debt_to_equity: RatioValue::Defined(debt),
        }
    }

    fn undefined_set(year: i32) -> RatioSet {
        RatioSet {
            period: PeriodKey::annual(year),
            roa: UNDEFINED,
            roe: UNDEFINED,
            ros: UNDEFINED,
            gross_profit_margin: UNDEFINED,
            current_ratio: UNDEFINED,
            debt_to_equity: UNDEFINED,
        }
    }

    fn with_current_ratios(ratios: &[f64]) -> Vec<RatioSet> {
        ratios
            .iter()
            .enumerate()
            .map(|(i, cr)| set(2019 + i as i32, 10.0, *cr, 50.0, 20.0))
            .collect()
    }

    fn with_debt(debt: f64) -> Vec<RatioSet> {
        vec![set(2022, 10.0, 2.0, 40.0, 20.0), set(2023, 10.0, 2.0, debt, 20.0)]
    }

    fn defaults() -> InsightConfig {
        InsightConfig::default()
    }

    #[test]
    fn test_single_period_is_not_improving() {
        let insights = derive_insights(&[set(2023, 15.0, 2.0, 50.0, 30.0)], &defaults());
        assert_eq!(insights.profitability.assessment, Assessment::Declining);
        assert_eq!(insights.efficiency.assessment, Assessment::Declining);
        assert_eq!(insights.liquidity.assessment, Assessment::GoodLiquidity);
        assert_eq!(insights.leverage.assessment, Assessment::SafeStructure);
    }

    #[test]
    fn test_rising_roe_is_improving() {
        let series: Vec<_> = [10.0, 11.0, 12.0, 13.0, 14.0]
            .into_iter()
            .enumerate()
            .map(|(i, roe)| set(2019 + i as i32, roe, 2.0, 50.0, 20.0))
            .collect();
        let insights = derive_insights(&series, &defaults());

        assert_eq!(insights.profitability.assessment, Assessment::Improving);
        assert!(insights.profitability.message.contains("+4.00 pts"));
        assert!(insights.profitability.message.contains("2019"));
        assert!(insights.profitability.message.contains("2023"));
    }

    #[test]
    fn test_falling_roe_is_declining() {
        let series = vec![set(2020, 14.0, 2.0, 50.0, 20.0), set(2021, 9.0, 2.0, 50.0, 20.0)];
        let insights = derive_insights(&series, &defaults());
        assert_eq!(insights.profitability.assessment, Assessment::Declining);
        assert!(insights.profitability.message.contains("-5.00 pts"));
    }

    #[test]
    fn test_only_endpoints_matter_for_trends() {
        let series = vec![
            set(2020, 10.0, 2.0, 50.0, 20.0),
            set(2021, 30.0, 2.0, 50.0, 45.0),
            set(2022, 10.5, 2.0, 50.0, 19.0),
        ];
        let insights = derive_insights(&series, &defaults());
        assert_eq!(insights.profitability.assessment, Assessment::Improving);
        assert_eq!(insights.efficiency.assessment, Assessment::Declining);
    }

    #[test]
    fn test_rising_margin_is_improving() {
        let series = vec![set(2020, 10.0, 2.0, 50.0, 20.0), set(2021, 10.0, 2.0, 50.0, 22.5)];
        let insights = derive_insights(&series, &defaults());
        assert_eq!(insights.efficiency.assessment, Assessment::Improving);
        assert!(insights.efficiency.message.contains("22.50%"));
    }

    #[test]
    fn test_trailing_liquidity_window() {
        let insights = derive_insights(&with_current_ratios(&[0.5, 0.8, 1.3, 1.4, 1.5]), &defaults());
        assert_eq!(insights.liquidity.assessment, Assessment::GoodLiquidity);

        for replaced in 2..5 {
            let mut ratios = [0.5, 0.8, 1.3, 1.4, 1.5];
            ratios[replaced] = 1.0;
            let insights = derive_insights(&with_current_ratios(&ratios), &defaults());
            assert_eq!(
                insights.liquidity.assessment,
                Assessment::NeedsMonitoring,
                "replacing index {replaced}"
            );
            assert!(insights.liquidity.message.contains("1.00x"));
        }
    }

    #[test]
    fn test_liquidity_threshold_is_strict() {
        let insights = derive_insights(&with_current_ratios(&[1.5, 1.2, 1.5]), &defaults());
        assert_eq!(insights.liquidity.assessment, Assessment::NeedsMonitoring);
    }

    #[test]
    fn test_short_series_uses_every_period() {
        let insights = derive_insights(&with_current_ratios(&[1.3, 1.25]), &defaults());
        assert_eq!(insights.liquidity.assessment, Assessment::GoodLiquidity);

        let insights = derive_insights(&with_current_ratios(&[1.1, 1.25]), &defaults());
        assert_eq!(insights.liquidity.assessment, Assessment::NeedsMonitoring);
    }

    #[test]
    fn test_custom_liquidity_window() {
        let config = InsightConfig {
            liquidity_window: 1,
            ..Default::default()
        };
        let insights = derive_insights(&with_current_ratios(&[0.5, 0.6, 1.3]), &config);
        assert_eq!(insights.liquidity.assessment, Assessment::GoodLiquidity);
    }

    #[test]
    fn test_zero_liquidity_window_checks_latest_period() {
        let config = InsightConfig {
            liquidity_window: 0,
            ..Default::default()
        };
        let insights = derive_insights(&with_current_ratios(&[0.5, 0.6, 1.3]), &config);
        assert_eq!(insights.liquidity.assessment, Assessment::GoodLiquidity);

        let insights = derive_insights(&with_current_ratios(&[1.5, 1.6, 1.1]), &config);
        assert_eq!(insights.liquidity.assessment, Assessment::NeedsMonitoring);
    }

    #[test]
    fn test_leverage_boundaries() {
        let cases = [
            (150.0, Assessment::HighRisk),
            (100.1, Assessment::HighRisk),
            (100.0, Assessment::SafeStructure),
            (99.9, Assessment::SafeStructure),
        ];
        for (debt, expected) in cases {
            let insights = derive_insights(&with_debt(debt), &defaults());
            assert_eq!(insights.leverage.assessment, expected, "debt-to-equity {debt}");
        }
    }

    #[test]
    fn test_leverage_uses_latest_only() {
        let series = vec![set(2022, 10.0, 2.0, 300.0, 20.0), set(2023, 10.0, 2.0, 80.0, 20.0)];
        let insights = derive_insights(&series, &defaults());
        assert_eq!(insights.leverage.assessment, Assessment::SafeStructure);
    }

    #[test]
    fn test_all_undefined_still_has_four_categories() {
        let series = vec![undefined_set(2021), undefined_set(2022)];
        let insights = derive_insights(&series, &defaults());

        let categories: Vec<_> = insights.iter().map(|i| i.category).collect();
        assert_eq!(categories, InsightCategory::ALL.to_vec());
        for insight in insights.iter() {
            assert_eq!(insight.assessment, Assessment::InsufficientData);
            assert!(insight.message.contains("undefined"));
        }
    }

    #[test]
    fn test_empty_series_is_insufficient() {
        let insights = derive_insights(&[], &defaults());
        for category in InsightCategory::ALL {
            let insight = insights.get(category);
            assert_eq!(insight.category, category);
            assert_eq!(insight.assessment, Assessment::InsufficientData);
        }
    }

    #[test]
    fn test_undefined_start_reports_insufficient_data() {
        let mut first = set(2020, 0.0, 2.0, 50.0, 20.0);
        first.roe = UNDEFINED;
        let series = vec![first, set(2021, 12.0, 2.0, 50.0, 25.0)];
        let insights = derive_insights(&series, &defaults());

        assert_eq!(insights.profitability.assessment, Assessment::InsufficientData);
        assert!(insights.profitability.message.contains("2020"));
        assert!(insights.profitability.message.contains("equity is missing"));
        assert_eq!(insights.efficiency.assessment, Assessment::Improving);
    }

    #[test]
    fn test_treat_as_zero_policy() {
        let config = InsightConfig {
            undefined_policy: UndefinedPolicy::TreatAsZero,
            ..Default::default()
        };

        let mut first = set(2020, 0.0, 2.0, 50.0, 20.0);
        first.roe = UNDEFINED;
        let series = vec![first, set(2021, 12.0, 2.0, 50.0, 25.0)];
        let insights = derive_insights(&series, &config);
        assert_eq!(insights.profitability.assessment, Assessment::Improving);

        let series = vec![undefined_set(2021), undefined_set(2022)];
        let insights = derive_insights(&series, &config);
        assert_eq!(insights.profitability.assessment, Assessment::Declining);
        assert_eq!(insights.liquidity.assessment, Assessment::NeedsMonitoring);
        assert_eq!(insights.leverage.assessment, Assessment::SafeStructure);
        assert_eq!(insights.efficiency.assessment, Assessment::Declining);
    }

    #[test]
    fn test_undefined_in_liquidity_window() {
        let mut series = with_current_ratios(&[1.5, 1.5, 1.5]);
        series[1].current_ratio = UNDEFINED;
        let insights = derive_insights(&series, &defaults());
        assert_eq!(insights.liquidity.assessment, Assessment::InsufficientData);

        // Outside the window, an undefined value does not matter.
        let mut series = with_current_ratios(&[1.5, 1.5, 1.5, 1.5]);
        series[0].current_ratio = UNDEFINED;
        let insights = derive_insights(&series, &defaults());
        assert_eq!(insights.liquidity.assessment, Assessment::GoodLiquidity);
    }

    #[test]
    fn test_assessment_favorability() {
        assert_eq!(Assessment::Improving.is_favorable(), Some(true));
        assert_eq!(Assessment::HighRisk.is_favorable(), Some(false));
        assert_eq!(Assessment::InsufficientData.is_favorable(), None);
    }

    #[test]
    fn test_serialized_categories() {
        let insights = derive_insights(&[set(2023, 15.0, 2.0, 50.0, 30.0)], &defaults());
        let json = serde_json::to_value(&insights).unwrap();
        for category in InsightCategory::ALL {
            assert!(json.get(category.name()).is_some());
        }
        assert_eq!(json["leverage"]["assessment"], "safe_structure");
    }
}
