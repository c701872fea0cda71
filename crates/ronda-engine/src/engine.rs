//! The ratio engine: per-period ratios plus insights over the series.

use crate::config::InsightConfig;
use crate::insight::{InsightSet, derive_insights};
use crate::ratio::RatioSet;
use ronda_traits::{EntityId, StatementPeriod};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Ratios and insights for one entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityAnalysis {
    /// Entity analysed, taken from the statement periods.
    pub entity: Option<EntityId>,
    /// One ratio set per period, oldest first.
    pub ratios: Vec<RatioSet>,
    /// Insights over the full series.
    pub insights: InsightSet,
}

impl EntityAnalysis {
    /// The most recent ratio set.
    #[must_use]
    pub fn latest(&self) -> Option<&RatioSet> {
        self.ratios.last()
    }
}

/// Computes ratio sets and derives insights.
///
/// The engine holds only its configuration; every call is independent, so a
/// single engine can be shared freely between threads.
///
/// # Example
///
/// ```
/// use ronda_engine::{Assessment, RatioEngine};
/// use ronda_traits::{PeriodKey, StatementField, StatementPeriod, StatementValues};
///
/// let periods: Vec<_> = [(2022, 10.0), (2023, 14.0)]
///     .into_iter()
///     .map(|(year, profit)| {
///         let values = StatementValues::default()
///             .with(StatementField::NetProfit, profit)
///             .with(StatementField::Equity, 100.0);
///         StatementPeriod::new("VNM", PeriodKey::annual(year), values)
///     })
///     .collect();
///
/// let analysis = RatioEngine::default().analyze(&periods);
/// assert_eq!(analysis.ratios.len(), 2);
/// assert_eq!(analysis.insights.profitability.assessment, Assessment::Improving);
/// ```
#[derive(Debug, Clone, Default)]
pub struct RatioEngine {
    config: InsightConfig,
}

impl RatioEngine {
    /// Create a new engine with the given insight configuration.
    #[must_use]
    pub const fn new(config: InsightConfig) -> Self {
        Self { config }
    }

    /// Get the insight configuration.
    #[must_use]
    pub const fn config(&self) -> &InsightConfig {
        &self.config
    }

    /// Computes the ratio set for one period.
    #[must_use]
    pub fn compute_ratios(&self, period: &StatementPeriod) -> RatioSet {
        RatioSet::compute(period)
    }

    /// Computes ratio sets for every period, ordered oldest to newest
    /// regardless of input order.
    #[must_use]
    pub fn ratio_series(&self, periods: &[StatementPeriod]) -> Vec<RatioSet> {
        let mut ordered: Vec<&StatementPeriod> = periods.iter().collect();
        ordered.sort_by_key(|p| p.period());
        ordered.into_iter().map(|p| self.compute_ratios(p)).collect()
    }

    /// Derives insights from a ratio series ordered oldest to newest.
    #[must_use]
    pub fn derive_insights(&self, series: &[RatioSet]) -> InsightSet {
        derive_insights(series, &self.config)
    }

    /// Computes the ratio series and insights for one entity's periods.
    #[must_use]
    pub fn analyze(&self, periods: &[StatementPeriod]) -> EntityAnalysis {
        let entity = periods.first().map(|p| p.entity().clone());
        if let Some(ref id) = entity
            && periods.iter().any(|p| p.entity() != id)
        {
            warn!(entity = %id, "statement periods span several entities");
        }

        let ratios = self.ratio_series(periods);
        let undefined: usize = ratios.iter().map(RatioSet::undefined_count).sum();
        debug!(
            entity = ?entity.as_ref().map(EntityId::as_str),
            periods = ratios.len(),
            undefined,
            "computed ratio series"
        );

        let insights = self.derive_insights(&ratios);
        EntityAnalysis {
            entity,
            ratios,
            insights,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::UndefinedPolicy;
    use crate::insight::Assessment;
    use approx::assert_relative_eq;
    use ronda_traits::{PeriodKey, StatementField, StatementValues};

    fn period(year: i32, profit: f64, equity: Option<f64>) -> StatementPeriod {
        let values = StatementValues::default()
            .with(StatementField::NetProfit, profit)
            .with(StatementField::Equity, equity)
            .with(StatementField::TotalLiabilities, 50.0)
            .with(StatementField::CurrentAssets, 30.0)
            .with(StatementField::CurrentLiabilities, 20.0);
        StatementPeriod::new("FPT", PeriodKey::annual(year), values)
    }

    #[test]
    fn test_default_engine() {
        let engine = RatioEngine::default();
        assert_eq!(engine.config(), &InsightConfig::default());
    }

    #[test]
    fn test_ratio_series_is_sorted() {
        let engine = RatioEngine::default();
        let periods = vec![
            period(2023, 14.0, Some(100.0)),
            period(2021, 10.0, Some(100.0)),
            period(2022, 12.0, Some(100.0)),
        ];
        let series = engine.ratio_series(&periods);
        let years: Vec<i32> = series.iter().map(|s| s.period.year).collect();
        assert_eq!(years, vec![2021, 2022, 2023]);
        assert_relative_eq!(series[0].roe.value().unwrap(), 10.0);
    }

    #[test]
    fn test_mixed_series_ends_on_full_year() {
        let engine = RatioEngine::default();
        let q1_values = period(2023, 3.0, Some(100.0)).values().clone();
        let q1 = StatementPeriod::new("FPT", PeriodKey::quarterly(2023, 1).unwrap(), q1_values);
        let periods = vec![period(2023, 14.0, Some(100.0)), q1, period(2022, 12.0, Some(100.0))];

        let analysis = engine.analyze(&periods);
        let keys: Vec<String> = analysis.ratios.iter().map(|s| s.period.to_string()).collect();
        assert_eq!(keys, vec!["2022", "2023Q1", "2023"]);
        assert_eq!(analysis.latest().unwrap().period, PeriodKey::annual(2023));
        // First-vs-last runs from full year 2022 (12%) to full year 2023 (14%).
        assert_eq!(analysis.insights.profitability.assessment, Assessment::Improving);
    }

    #[test]
    fn test_analyze() {
        let engine = RatioEngine::default();
        let periods = vec![period(2022, 14.0, Some(100.0)), period(2021, 10.0, Some(100.0))];
        let analysis = engine.analyze(&periods);

        assert_eq!(analysis.entity, Some(EntityId::new("FPT")));
        assert_eq!(analysis.latest().unwrap().period, PeriodKey::annual(2022));
        assert_eq!(analysis.insights.profitability.assessment, Assessment::Improving);
        assert_eq!(analysis.insights.liquidity.assessment, Assessment::GoodLiquidity);
        assert_eq!(analysis.insights.leverage.assessment, Assessment::SafeStructure);
        assert_eq!(
            analysis.insights.efficiency.assessment,
            Assessment::InsufficientData
        );
    }

    #[test]
    fn test_analyze_empty() {
        let analysis = RatioEngine::default().analyze(&[]);
        assert!(analysis.entity.is_none());
        assert!(analysis.ratios.is_empty());
        assert_eq!(analysis.insights.iter().count(), 4);
    }

    #[test]
    fn test_engine_applies_config() {
        let periods = vec![period(2021, 10.0, None), period(2022, 12.0, Some(100.0))];

        let strict = RatioEngine::default().analyze(&periods);
        assert_eq!(
            strict.insights.profitability.assessment,
            Assessment::InsufficientData
        );

        let lenient = RatioEngine::new(InsightConfig {
            undefined_policy: UndefinedPolicy::TreatAsZero,
            ..Default::default()
        })
        .analyze(&periods);
        assert_eq!(lenient.insights.profitability.assessment, Assessment::Improving);
    }

    #[test]
    fn test_engine_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<RatioEngine>();
    }
}
