//! Ratios command implementation.

use super::banner;
use crate::{OutputFormat, data};
use anyhow::Result;
use ronda::traits::{EntityId, StatementPeriod, StatementProvider};
use ronda::{RatioEngine, RatioKind, RatioSet, format_ratio};
use std::path::Path;

/// Show the ratio set for every period of one entity.
pub(crate) fn show_ratios(input: &Path, entity: &str, format: OutputFormat) -> Result<()> {
    let store = data::load_store(input)?;
    let entity = EntityId::new(entity);
    let periods = store.periods(&entity)?;
    let series = RatioEngine::default().ratio_series(periods);

    data::emit(&series, format, |series| {
        banner("Financial Ratios");
        println!("Entity: {}", entity);
        if let Some(sector) = store.sector(&entity) {
            println!("Sector: {}", sector);
        }
        println!();
        println!("{}", ratio_table(series));

        let undefined: usize = series.iter().map(RatioSet::undefined_count).sum();
        if undefined > 0 {
            println!("\n{} ratio(s) could not be computed and are shown as N/A.", undefined);
            println!("{}", missing_lines(periods));
        }
    })
}

/// One row per period, one column per ratio.
pub(crate) fn ratio_table(series: &[RatioSet]) -> String {
    let mut lines = Vec::with_capacity(series.len() + 2);

    let mut header = format!("{:<8}{:<12}", "Period", "Ends");
    for kind in RatioKind::ALL {
        header.push_str(&format!("{:>21}", kind.label()));
    }
    lines.push(header);
    lines.push("─".repeat(20 + 21 * RatioKind::ALL.len()));

    for set in series {
        let end = set
            .period
            .period_end()
            .map_or_else(|| "-".to_string(), |d| d.to_string());
        let mut row = format!("{:<8}{:<12}", set.period.to_string(), end);
        for (kind, value) in set.iter() {
            row.push_str(&format!("{:>21}", format_ratio(kind, value)));
        }
        lines.push(row);
    }

    lines.join("\n")
}

/// Statement lines absent per period, one line per incomplete period.
pub(crate) fn missing_lines(periods: &[StatementPeriod]) -> String {
    periods
        .iter()
        .filter_map(|p| {
            let missing = p.missing_fields();
            if missing.is_empty() {
                return None;
            }
            let names: Vec<&str> = missing.iter().map(|f| f.label()).collect();
            Some(format!("  {}: missing {}", p.period(), names.join(", ")))
        })
        .collect::<Vec<_>>()
        .join("\n")
}
