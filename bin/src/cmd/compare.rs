//! Compare command implementation.

use super::banner;
use crate::{OutputFormat, data};
use anyhow::Result;
use ronda::traits::PeriodKey;
use ronda::{Comparison, RatioEngine, RatioKind, compare_entities, format_ratio};
use std::path::Path;

/// Compare entities on one period, or on each entity's latest period.
pub(crate) fn compare(
    input: &Path,
    entities: &[String],
    period: Option<PeriodKey>,
    format: OutputFormat,
) -> Result<()> {
    let store = data::load_store(input)?;
    let ids = data::entity_ids(entities);
    let comparison = compare_entities(&RatioEngine::default(), &store, &ids, period)?;

    data::emit(&comparison, format, |comparison| {
        banner("Ratio Comparison");
        match comparison.period {
            Some(p) => println!("Period: {}", p),
            None => println!("Period: latest available per entity"),
        }
        println!();
        println!("{}", comparison_table(comparison));
        println!();

        for kind in [RatioKind::Roe, RatioKind::DebtToEquity] {
            let ranked = comparison.ranked(kind);
            if ranked.len() > 1 {
                let order: Vec<String> = ranked
                    .iter()
                    .map(|(entity, value)| format!("{} ({})", entity, kind.format_value(*value)))
                    .collect();
                println!("{} ranking: {}", kind.label(), order.join(" > "));
            }
        }
    })
}

/// One row per entity, one column per ratio.
pub(crate) fn comparison_table(comparison: &Comparison) -> String {
    let mut lines = Vec::with_capacity(comparison.rows.len() + 2);

    let mut header = format!("{:<10}{:<8}", "Entity", "Period");
    for kind in RatioKind::ALL {
        header.push_str(&format!("{:>21}", kind.label()));
    }
    lines.push(header);
    lines.push("─".repeat(18 + 21 * RatioKind::ALL.len()));

    for row in &comparison.rows {
        match &row.ratios {
            Some(set) => {
                let mut line = format!("{:<10}{:<8}", row.entity.as_str(), set.period.to_string());
                for (kind, value) in set.iter() {
                    line.push_str(&format!("{:>21}", format_ratio(kind, value)));
                }
                lines.push(line);
            }
            None => {
                lines.push(format!(
                    "{:<10}{:<8}no statement for this period",
                    row.entity.as_str(),
                    "-"
                ));
            }
        }
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::tests::{SAMPLE, temp_file};
    use ronda::traits::EntityId;

    #[test]
    fn test_comparison_table() {
        let path = temp_file("compare.json", SAMPLE);
        let store = data::load_store(&path).unwrap();
        let ids = [EntityId::new("VNM"), EntityId::new("HPG")];
        let comparison = compare_entities(
            &RatioEngine::default(),
            &store,
            &ids,
            Some(PeriodKey::annual(2022)),
        )
        .unwrap();
        let table = comparison_table(&comparison);

        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[2].starts_with("VNM"));
        assert!(lines[2].contains("10.00%"));
        assert!(lines[3].starts_with("HPG"));
        assert!(lines[3].contains("no statement for this period"));
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_compare_unknown_entity() {
        let path = temp_file("compare-unknown.json", SAMPLE);
        let entities = ["VNM".to_string(), "ZZZ".to_string()];
        assert!(compare(&path, &entities, None, OutputFormat::Json).is_err());
        std::fs::remove_file(path).ok();
    }
}
