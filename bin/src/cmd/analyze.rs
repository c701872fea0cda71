//! Analyze command implementation.

use crate::{OutputFormat, data};
use anyhow::Result;
use ronda::traits::EntityId;
use ronda::{analyze_entity, render_report};
use std::path::Path;

/// Print the full report for one entity.
pub(crate) fn analyze(
    input: &Path,
    entity: &str,
    config: Option<&Path>,
    format: OutputFormat,
) -> Result<()> {
    let store = data::load_store(input)?;
    let engine = data::load_engine(config)?;
    let analysis = analyze_entity(&engine, &store, &EntityId::new(entity))?;

    data::emit(&analysis, format, |analysis| {
        println!();
        println!("{}", render_report(analysis));
        println!();
    })
}
