//! Plain-text rendering of an entity analysis.

use ronda_engine::{EntityAnalysis, RatioKind, RatioValue};

const LABEL_WIDTH: usize = 22;
const CELL_WIDTH: usize = 12;

/// Formats a ratio with its unit, or `N/A` when undefined.
#[must_use]
pub fn format_ratio(kind: RatioKind, value: RatioValue) -> String {
    value
        .value()
        .map_or_else(|| value.to_string(), |v| kind.format_value(v))
}

/// Renders ratios per period followed by the four insights.
///
/// # Example
///
/// ```
/// use ronda::{RatioEngine, render_report};
/// use ronda::traits::{PeriodKey, StatementField, StatementPeriod, StatementValues};
///
/// let values = StatementValues::default()
///     .with(StatementField::NetProfit, 5.0)
///     .with(StatementField::TotalAssets, 100.0);
/// let periods = [StatementPeriod::new("ACB", PeriodKey::annual(2023), values)];
///
/// let report = render_report(&RatioEngine::default().analyze(&periods));
/// assert!(report.contains("5.00%"));
/// assert!(report.contains("N/A"));
/// ```
#[must_use]
pub fn render_report(analysis: &EntityAnalysis) -> String {
    let mut lines = Vec::new();

    let title = analysis
        .entity
        .as_ref()
        .map_or_else(|| "Financial analysis".to_string(), |e| format!("Financial analysis: {e}"));
    lines.push(title.clone());
    lines.push("=".repeat(title.len()));
    lines.push(String::new());

    if analysis.ratios.is_empty() {
        lines.push("No reporting periods.".to_string());
    } else {
        let mut header = format!("{:LABEL_WIDTH$}", "Ratio");
        for set in &analysis.ratios {
            header.push_str(&format!("{:>CELL_WIDTH$}", set.period.to_string()));
        }
        lines.push(header);
        lines.push("-".repeat(LABEL_WIDTH + CELL_WIDTH * analysis.ratios.len()));

        for kind in RatioKind::ALL {
            let mut row = format!("{:LABEL_WIDTH$}", kind.label());
            for set in &analysis.ratios {
                row.push_str(&format!("{:>CELL_WIDTH$}", format_ratio(kind, set.get(kind))));
            }
            lines.push(row);
        }
    }

    lines.push(String::new());
    lines.push("Insights".to_string());
    lines.push("--------".to_string());
    for insight in analysis.insights.iter() {
        let category = insight.category.name();
        lines.push(format!("{category:>14}: {}", insight.message));
    }

    lines.join("\n")
}
