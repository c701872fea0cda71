//! Insights command implementation.

use super::banner;
use crate::{OutputFormat, data};
use anyhow::Result;
use ronda::traits::EntityId;
use ronda::{Insight, InsightSet, analyze_entity};
use std::path::Path;

/// Derive the four category insights for one entity.
pub(crate) fn show_insights(
    input: &Path,
    entity: &str,
    config: Option<&Path>,
    format: OutputFormat,
) -> Result<()> {
    let store = data::load_store(input)?;
    let engine = data::load_engine(config)?;
    let entity = EntityId::new(entity);
    let analysis = analyze_entity(&engine, &store, &entity)?;

    data::emit(&analysis.insights, format, |insights| {
        banner("Financial Insights");
        println!("Entity:  {}", entity);
        if let (Some(first), Some(last)) = (analysis.ratios.first(), analysis.ratios.last()) {
            println!("Periods: {} to {} ({})", first.period, last.period, analysis.ratios.len());
        }
        println!();
        println!("{}", insight_lines(insights));
    })
}

fn marker(insight: &Insight) -> &'static str {
    match insight.assessment.is_favorable() {
        Some(true) => "+",
        Some(false) => "-",
        None => "?",
    }
}

/// One line per category, marked favourable, unfavourable or unassessed.
pub(crate) fn insight_lines(insights: &InsightSet) -> String {
    insights
        .iter()
        .map(|insight| {
            format!(
                "[{}] {:<14} {}",
                marker(insight),
                insight.category.name(),
                insight.message
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::tests::{SAMPLE, temp_file};
    use ronda::{Assessment, RatioEngine};

    #[test]
    fn test_insight_lines() {
        let path = temp_file("insights.json", SAMPLE);
        let store = data::load_store(&path).unwrap();
        let analysis =
            analyze_entity(&RatioEngine::default(), &store, &EntityId::new("VNM")).unwrap();
        assert_eq!(analysis.insights.profitability.assessment, Assessment::Improving);

        let text = insight_lines(&analysis.insights);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("[+] profitability"));
        assert!(lines[1].contains("liquidity"));
        assert!(lines[2].contains("leverage"));
        assert!(lines[3].contains("efficiency"));
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_insufficient_marker() {
        let path = temp_file("insights-hpg.json", SAMPLE);
        let store = data::load_store(&path).unwrap();
        let analysis =
            analyze_entity(&RatioEngine::default(), &store, &EntityId::new("HPG")).unwrap();
        // HPG reports no current assets or liabilities.
        assert_eq!(marker(&analysis.insights.liquidity), "?");
        std::fs::remove_file(path).ok();
    }
}
