//! Company analysis, comparison and sector summaries over a provider.

use ronda_engine::{EntityAnalysis, RatioEngine, RatioKind, RatioSet};
use ronda_traits::{EntityId, PeriodKey, Result, RondaError, StatementProvider};
use serde::Serialize;
use tracing::debug;

/// Ratios and insights for one entity in the provider.
///
/// # Errors
///
/// Returns [`RondaError::EntityNotFound`] for an unknown entity and
/// [`RondaError::InsufficientData`] if it has no periods.
pub fn analyze_entity<P>(
    engine: &RatioEngine,
    provider: &P,
    entity: &EntityId,
) -> Result<EntityAnalysis>
where
    P: StatementProvider + ?Sized,
{
    let periods = provider.periods(entity)?;
    if periods.is_empty() {
        return Err(RondaError::InsufficientData(format!(
            "No statement periods for {entity}"
        )));
    }
    Ok(engine.analyze(periods))
}

/// One entity's row in a comparison.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonRow {
    /// Entity compared.
    pub entity: EntityId,
    /// Sector, if known.
    pub sector: Option<String>,
    /// Ratios for the compared period, `None` if the entity did not report it.
    pub ratios: Option<RatioSet>,
}

/// Side-by-side ratios for several entities.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comparison {
    /// Requested period, `None` meaning each entity's latest.
    pub period: Option<PeriodKey>,
    /// One row per requested entity, in request order.
    pub rows: Vec<ComparisonRow>,
}

impl Comparison {
    /// Entities with a defined value for `kind`, highest first.
    #[must_use]
    pub fn ranked(&self, kind: RatioKind) -> Vec<(&EntityId, f64)> {
        let mut ranked: Vec<(&EntityId, f64)> = self
            .rows
            .iter()
            .filter_map(|row| {
                let value = row.ratios.as_ref()?.get(kind).value()?;
                Some((&row.entity, value))
            })
            .collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
        ranked
    }
}

/// Compares entities on one period, or on each entity's latest period.
///
/// # Errors
///
/// Returns [`RondaError::InsufficientData`] if no entities are given and
/// [`RondaError::EntityNotFound`] for an unknown entity.
pub fn compare_entities<P>(
    engine: &RatioEngine,
    provider: &P,
    entities: &[EntityId],
    period: Option<PeriodKey>,
) -> Result<Comparison>
where
    P: StatementProvider + ?Sized,
{
    if entities.is_empty() {
        return Err(RondaError::InsufficientData(
            "No entities to compare".to_string(),
        ));
    }

    let mut rows = Vec::with_capacity(entities.len());
    for entity in entities {
        let periods = provider.periods(entity)?;
        let selected = match period {
            Some(key) => periods.iter().find(|p| p.period() == key),
            None => periods.last(),
        };
        if selected.is_none() {
            debug!(entity = %entity, period = ?period, "no statement for compared period");
        }
        rows.push(ComparisonRow {
            entity: entity.clone(),
            sector: provider.sector(entity).map(str::to_string),
            ratios: selected.map(|p| engine.compute_ratios(p)),
        });
    }

    Ok(Comparison { period, rows })
}

/// Sector mean of one ratio.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectorAverage {
    /// Ratio averaged.
    pub kind: RatioKind,
    /// Mean of the defined values, `None` if no member had one.
    pub mean: Option<f64>,
    /// Number of members with a defined value.
    pub contributors: usize,
}

/// Ratio averages across a sector's members, from each member's latest period.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectorSummary {
    /// Sector label as requested.
    pub sector: String,
    /// Members with at least one period.
    pub entities: Vec<EntityId>,
    /// One entry per ratio kind, in reporting order.
    pub averages: Vec<SectorAverage>,
}

impl SectorSummary {
    /// Mean of one ratio, if any member had it defined.
    #[must_use]
    pub fn average(&self, kind: RatioKind) -> Option<f64> {
        self.averages
            .iter()
            .find(|a| a.kind == kind)
            .and_then(|a| a.mean)
    }
}

/// Averages each ratio across a sector, ignoring undefined values.
///
/// # Errors
///
/// Returns [`RondaError::InsufficientData`] if no entity in the sector has
/// statement data.
pub fn sector_summary<P>(engine: &RatioEngine, provider: &P, sector: &str) -> Result<SectorSummary>
where
    P: StatementProvider + ?Sized,
{
    let mut entities = Vec::new();
    let mut latest = Vec::new();
    for entity in provider.entities_in_sector(sector) {
        if let Some(period) = provider.periods(&entity)?.last() {
            latest.push(engine.compute_ratios(period));
            entities.push(entity);
        }
    }

    if entities.is_empty() {
        return Err(RondaError::InsufficientData(format!(
            "No statement data for sector '{sector}'"
        )));
    }

    let averages = RatioKind::ALL
        .into_iter()
        .map(|kind| {
            let values: Vec<f64> = latest.iter().filter_map(|s| s.get(kind).value()).collect();
            let mean = (!values.is_empty()).then(|| values.iter().sum::<f64>() / values.len() as f64);
            SectorAverage {
                kind,
                mean,
                contributors: values.len(),
            }
        })
        .collect();

    debug!(sector, members = entities.len(), "computed sector summary");
    Ok(SectorSummary {
        sector: sector.to_string(),
        entities,
        averages,
    })
}
