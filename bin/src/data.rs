//! Input loading for the ronda CLI.

use ronda::traits::{EntityId, PeriodKey};
use ronda::{InsightConfig, RatioEngine, RondaError, StatementStore};
use serde::Serialize;
use std::fs;
use std::path::Path;
use tracing::info;

use crate::OutputFormat;

fn read_file(path: &Path) -> Result<String, RondaError> {
    fs::read_to_string(path)
        .map_err(|e| RondaError::Other(format!("Failed to read {}: {}", path.display(), e)))
}

/// Load a statement store from a JSON array of records.
pub(crate) fn load_store(path: &Path) -> Result<StatementStore, RondaError> {
    let store = StatementStore::from_json_records(&read_file(path)?)?;
    info!(
        path = %path.display(),
        entities = store.len(),
        periods = store.period_count(),
        "loaded statements"
    );
    Ok(store)
}

/// Load insight thresholds, falling back to the defaults.
pub(crate) fn load_config(path: Option<&Path>) -> Result<InsightConfig, RondaError> {
    match path {
        Some(p) => InsightConfig::from_json(&read_file(p)?),
        None => Ok(InsightConfig::default()),
    }
}

/// Engine configured from an optional thresholds file.
pub(crate) fn load_engine(config: Option<&Path>) -> Result<RatioEngine, RondaError> {
    Ok(RatioEngine::new(load_config(config)?))
}

/// Build the compared period from `--year` and `--quarter`.
pub(crate) fn period_key(
    year: Option<i32>,
    quarter: Option<u8>,
) -> Result<Option<PeriodKey>, RondaError> {
    match (year, quarter) {
        (Some(y), Some(q)) => PeriodKey::quarterly(y, q).map(Some),
        (Some(y), None) => Ok(Some(PeriodKey::annual(y))),
        (None, Some(_)) => Err(RondaError::InvalidData(
            "--quarter requires --year".to_string(),
        )),
        (None, None) => Ok(None),
    }
}

/// Parse entity identifiers given on the command line.
pub(crate) fn entity_ids(entities: &[String]) -> Vec<EntityId> {
    entities
        .iter()
        .filter(|e| !e.trim().is_empty())
        .map(|e| EntityId::new(e.as_str()))
        .collect()
}

/// Print a value as pretty JSON.
pub(crate) fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Print as JSON, or run the text renderer.
pub(crate) fn emit<T: Serialize>(
    value: &T,
    format: OutputFormat,
    text: impl FnOnce(&T),
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => print_json(value),
        OutputFormat::Text => {
            text(value);
            Ok(())
        }
    }
}
