//! In-memory statement store.

use crate::record::StatementRecord;
use ronda_traits::{EntityId, Result, RondaError, StatementPeriod, StatementProvider};
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use tracing::{info, warn};

/// Read-only statement data for a set of entities.
///
/// Built once, typically at startup, and shared by reference afterwards.
/// Each entity's periods are kept sorted oldest to newest.
///
/// # Example
///
/// ```
/// use ronda_data::StatementStore;
/// use ronda_traits::{EntityId, StatementProvider};
///
/// let store = StatementStore::from_json_records(
///     r#"[{"entity": "VNM", "year": 2023, "net_profit": 9.0},
///         {"entity": "VNM", "year": 2022, "net_profit": 8.0}]"#,
/// )?;
///
/// let periods = store.periods(&EntityId::new("VNM"))?;
/// assert_eq!(periods[0].period().year, 2022);
/// # Ok::<(), ronda_traits::RondaError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct StatementStore {
    periods: BTreeMap<EntityId, Vec<StatementPeriod>>,
    sectors: BTreeMap<EntityId, String>,
}

impl StatementStore {
    /// Builds a store from statement periods and sector assignments.
    ///
    /// # Errors
    ///
    /// Returns [`RondaError::InvalidData`] for an invalid quarter, a repeated
    /// (entity, period) pair, or an entity assigned to two sectors.
    pub fn from_periods(
        periods: impl IntoIterator<Item = StatementPeriod>,
        sectors: impl IntoIterator<Item = (EntityId, String)>,
    ) -> Result<Self> {
        let mut by_entity: BTreeMap<EntityId, Vec<StatementPeriod>> = BTreeMap::new();
        for period in periods {
            if !period.period().is_valid() {
                return Err(RondaError::InvalidData(format!(
                    "{}: invalid quarter in period {:?}",
                    period.entity(),
                    period.period()
                )));
            }
            by_entity
                .entry(period.entity().clone())
                .or_default()
                .push(period);
        }

        for (entity, series) in &mut by_entity {
            series.sort_by_key(StatementPeriod::period);
            if let Some(pair) = series.windows(2).find(|w| w[0].period() == w[1].period()) {
                return Err(RondaError::InvalidData(format!(
                    "{entity}: duplicate period {}",
                    pair[0].period()
                )));
            }
            let annual = series.iter().filter(|p| p.period().is_annual()).count();
            if annual > 0 && annual < series.len() {
                warn!(
                    entity = %entity,
                    annual,
                    quarterly = series.len() - annual,
                    "series mixes annual and quarterly periods"
                );
            }
        }

        let mut sector_map = BTreeMap::new();
        for (entity, sector) in sectors {
            let sector = sector.trim().to_string();
            if sector.is_empty() {
                continue;
            }
            match sector_map.entry(entity) {
                Entry::Vacant(slot) => {
                    slot.insert(sector);
                }
                Entry::Occupied(slot) if slot.get() != &sector => {
                    return Err(RondaError::InvalidData(format!(
                        "{}: assigned to both '{}' and '{}'",
                        slot.key(),
                        slot.get(),
                        sector
                    )));
                }
                Entry::Occupied(_) => {}
            }
        }

        let store = Self {
            periods: by_entity,
            sectors: sector_map,
        };
        info!(
            entities = store.len(),
            periods = store.period_count(),
            sectors = store.sectors().len(),
            "statement store loaded"
        );
        Ok(store)
    }

    /// Builds a store from flat statement records.
    ///
    /// # Errors
    ///
    /// See [`StatementStore::from_periods`].
    pub fn from_records(records: impl IntoIterator<Item = StatementRecord>) -> Result<Self> {
        let mut periods = Vec::new();
        let mut sectors = Vec::new();
        for mut record in records {
            if let Some(sector) = record.sector.take() {
                sectors.push((record.entity.clone(), sector));
            }
            periods.push(record.into_period());
        }
        Self::from_periods(periods, sectors)
    }

    /// Builds a store from a JSON array of [`StatementRecord`]s.
    ///
    /// # Errors
    ///
    /// Returns [`RondaError::Json`] if the JSON does not match the record
    /// shape, otherwise see [`StatementStore::from_periods`].
    pub fn from_json_records(json: &str) -> Result<Self> {
        let records: Vec<StatementRecord> = serde_json::from_str(json)?;
        Self::from_records(records)
    }

    /// Number of entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.periods.len()
    }

    /// Whether the store holds no entities.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.periods.is_empty()
    }

    /// Total number of statement periods across entities.
    #[must_use]
    pub fn period_count(&self) -> usize {
        self.periods.values().map(Vec::len).sum()
    }

    /// Distinct sector labels, sorted.
    #[must_use]
    pub fn sectors(&self) -> Vec<&str> {
        let mut sectors: Vec<&str> = self.sectors.values().map(String::as_str).collect();
        sectors.sort_unstable();
        sectors.dedup();
        sectors
    }
}

impl StatementProvider for StatementStore {
    fn entities(&self) -> Vec<EntityId> {
        self.periods.keys().cloned().collect()
    }

    fn periods(&self, entity: &EntityId) -> Result<&[StatementPeriod]> {
        self.periods
            .get(entity)
            .map(Vec::as_slice)
            .ok_or_else(|| RondaError::EntityNotFound(entity.to_string()))
    }

    fn sector(&self, entity: &EntityId) -> Option<&str> {
        self.sectors.get(entity).map(String::as_str)
    }
}
