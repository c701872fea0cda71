//! Sector command implementation.

use super::banner;
use crate::{OutputFormat, data};
use anyhow::Result;
use ronda::{RatioEngine, SectorSummary, sector_summary};
use std::path::Path;

/// Average each ratio across a sector's members.
pub(crate) fn show_sector(input: &Path, sector: &str, format: OutputFormat) -> Result<()> {
    let store = data::load_store(input)?;
    let summary = sector_summary(&RatioEngine::default(), &store, sector)
        .map_err(|e| anyhow::anyhow!("{}. Known sectors: {}", e, store.sectors().join(", ")))?;

    data::emit(&summary, format, |summary| {
        banner("Sector Averages");
        println!("{}", summary_table(summary));
    })
}

/// Members, then one line per ratio with its mean and contributor count.
pub(crate) fn summary_table(summary: &SectorSummary) -> String {
    let members: Vec<&str> = summary.entities.iter().map(|e| e.as_str()).collect();
    let mut lines = vec![
        format!("Sector:  {}", summary.sector),
        format!("Members: {}", members.join(", ")),
        String::new(),
        format!("{:<22}{:>12}{:>14}", "Ratio", "Mean", "Contributors"),
        "─".repeat(48),
    ];

    for average in &summary.averages {
        let mean = average
            .mean
            .map_or_else(|| "N/A".to_string(), |m| average.kind.format_value(m));
        lines.push(format!(
            "{:<22}{:>12}{:>14}",
            average.kind.label(),
            mean,
            format!("{}/{}", average.contributors, summary.entities.len())
        ));
    }

    lines.join("\n")
}
