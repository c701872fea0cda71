//! Flat statement records as produced by loaders.

use ronda_traits::{EntityId, PeriodKey, StatementPeriod, StatementValues};
use serde::{Deserialize, Serialize};

/// One row of statement data: identity columns plus statement lines.
///
/// This is the serialized shape of the store's input, e.g.
///
/// ```json
/// {"entity": "VNM", "year": 2023, "sector": "Food", "net_profit": 9.0, "equity": 50.0}
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatementRecord {
    /// Reporting entity.
    pub entity: EntityId,
    /// Fiscal year.
    pub year: i32,
    /// Fiscal quarter (1-4), absent for annual rows.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quarter: Option<u8>,
    /// Sector label, if the loader provides one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sector: Option<String>,
    /// Statement line values.
    #[serde(flatten)]
    pub values: StatementValues,
}

impl StatementRecord {
    /// The record's period key.
    #[must_use]
    pub const fn period(&self) -> PeriodKey {
        PeriodKey {
            year: self.year,
            quarter: self.quarter,
        }
    }

    /// Converts into an immutable statement period, dropping the sector.
    #[must_use]
    pub fn into_period(self) -> StatementPeriod {
        let period = self.period();
        StatementPeriod::new(self.entity, period, self.values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ronda_traits::StatementField;

    #[test]
    fn test_deserialize_record() {
        let record: StatementRecord = serde_json::from_str(
            r#"{"entity": "vnm", "year": 2023, "quarter": 2, "sector": "Food",
                "net_profit": 9, "equity": 50.5, "revenue": null, "note": "ignored"}"#,
        )
        .unwrap();

        assert_eq!(record.entity, EntityId::new("VNM"));
        assert_eq!(record.period(), PeriodKey::quarterly(2023, 2).unwrap());
        assert_eq!(record.sector.as_deref(), Some("Food"));
        assert_eq!(record.values.net_profit, Some(9.0));
        assert_eq!(record.values.equity, Some(50.5));
        assert_eq!(record.values.revenue, None);
    }

    #[test]
    fn test_into_period() {
        let record = StatementRecord {
            entity: EntityId::new("HPG"),
            year: 2022,
            quarter: None,
            sector: Some("Steel".to_string()),
            values: StatementValues::default().with(StatementField::Revenue, 10.0),
        };
        let period = record.into_period();
        assert_eq!(period.entity().as_str(), "HPG");
        assert_eq!(period.period(), PeriodKey::annual(2022));
        assert_eq!(period.value(StatementField::Revenue), Some(10.0));
    }
}
