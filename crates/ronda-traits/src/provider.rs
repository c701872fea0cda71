//! Read-only access to statement series.
//!
//! A [`StatementProvider`] is built once at process start, never mutated, and
//! passed by reference to whatever needs statement data. Because it is
//! immutable, concurrent readers need no synchronization.

use crate::{EntityId, RondaError, Result, StatementPeriod};

/// A read-only source of per-entity statement series.
///
/// # Example
///
/// ```no_run
/// use ronda_traits::{EntityId, Result, StatementPeriod, StatementProvider};
///
/// struct Single(Vec<StatementPeriod>);
///
/// impl StatementProvider for Single {
///     fn entities(&self) -> Vec<EntityId> {
///         self.0.first().map(|p| p.entity().clone()).into_iter().collect()
///     }
///
///     fn periods(&self, _entity: &EntityId) -> Result<&[StatementPeriod]> {
///         Ok(&self.0)
///     }
///
///     fn sector(&self, _entity: &EntityId) -> Option<&str> {
///         None
///     }
/// }
/// ```
pub trait StatementProvider: Send + Sync {
    /// All entities with at least one period, sorted.
    fn entities(&self) -> Vec<EntityId>;

    /// Statement periods for an entity, ordered oldest to newest.
    ///
    /// # Errors
    ///
    /// Returns [`RondaError::EntityNotFound`] if the entity is unknown.
    fn periods(&self, entity: &EntityId) -> Result<&[StatementPeriod]>;

    /// Sector the entity belongs to, if known.
    fn sector(&self, entity: &EntityId) -> Option<&str>;

    /// Entities whose sector matches `sector`, ignoring ASCII case.
    fn entities_in_sector(&self, sector: &str) -> Vec<EntityId> {
        self.entities()
            .into_iter()
            .filter(|e| {
                self.sector(e)
                    .is_some_and(|s| s.eq_ignore_ascii_case(sector))
            })
            .collect()
    }

    /// The most recent period for an entity.
    ///
    /// # Errors
    ///
    /// Returns [`RondaError::EntityNotFound`] if the entity is unknown and
    /// [`RondaError::InsufficientData`] if it has no periods.
    fn latest(&self, entity: &EntityId) -> Result<&StatementPeriod> {
        self.periods(entity)?.last().ok_or_else(|| {
            RondaError::InsufficientData(format!("No statement periods for {entity}"))
        })
    }
}
