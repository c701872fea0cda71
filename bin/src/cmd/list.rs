//! List command implementation.

use super::banner;
use anyhow::Result;
use ronda::InsightCategory;
use ronda::engine::registry::{RatioInfo, ratio_info, ratios_by_category};

/// Print the ratio registry, optionally filtered by category.
pub(crate) fn list_ratios(category: Option<&str>, verbose: bool) -> Result<()> {
    banner("Available Ratios");

    let groups = grouped(category);
    if groups.is_empty() {
        anyhow::bail!(
            "Unknown category '{}'. Valid categories: profitability, liquidity, leverage, efficiency",
            category.unwrap_or_default()
        );
    }

    for (cat, ratios) in &groups {
        println!("{} ({}):", capitalize(cat.name()), cat.description());
        println!("{}", "-".repeat(60));

        for info in ratios {
            if verbose {
                println!("  {:22} - {}", info.name, info.description);
                println!("  {:22}   {}", "", info.formula);
                if !info.aliases.is_empty() {
                    println!("  {:22}   aliases: {}", "", info.aliases.join(", "));
                }
            } else {
                println!("  {}", info.name);
            }
        }
        println!();
    }

    if !verbose {
        println!("Use --verbose for formulas and aliases.\n");
    }

    Ok(())
}

/// Print one ratio's metadata, looked up by name or alias.
pub(crate) fn describe_ratio(name: &str) -> Result<()> {
    let info = resolve(name)?;
    banner("Ratio Details");
    println!("{}", describe(&info));
    println!();
    Ok(())
}

fn resolve(name: &str) -> Result<RatioInfo> {
    ratio_info(name).ok_or_else(|| {
        anyhow::anyhow!("Unknown ratio '{}'. Use `ronda list` to see available ratios", name)
    })
}

fn describe(info: &RatioInfo) -> String {
    let unit = if info.is_percentage() { "percent" } else { "times" };
    let mut lines = vec![
        format!("Name:        {}", info.name),
        format!("Label:       {}", info.kind.label()),
        format!("Category:    {}", info.category),
        format!("Formula:     {}", info.formula),
        format!("Unit:        {}", unit),
        format!("Description: {}", info.description),
    ];
    if !info.aliases.is_empty() {
        lines.push(format!("Aliases:     {}", info.aliases.join(", ")));
    }
    lines.join("\n")
}

/// Categories matching the filter, each with its ratios.
fn grouped(filter: Option<&str>) -> Vec<(InsightCategory, Vec<RatioInfo>)> {
    InsightCategory::ALL
        .into_iter()
        .filter(|cat| {
            filter.is_none_or(|f| cat.name().contains(f.trim().to_lowercase().as_str()))
        })
        .map(|cat| (cat, ratios_by_category(&cat)))
        .filter(|(_, ratios)| !ratios.is_empty())
        .collect()
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    chars
        .next()
        .map(|c| c.to_uppercase().chain(chars).collect())
        .unwrap_or_default()
}
