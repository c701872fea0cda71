//! Common types used throughout ronda.
//!
//! Every ratio computation starts from a [`StatementPeriod`]: one entity, one
//! reporting period, and the statement lines reported for it. Each line is an
//! explicit `Option<f64>` so "the column was absent", "the cell was empty" and
//! "the exporter wrote NaN" all collapse into a single `None`.

use crate::{RondaError, Result};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

// Re-export date type from chrono
pub use chrono::NaiveDate as Date;

/// Identifier of a reporting entity, typically an exchange ticker.
///
/// Identifiers are trimmed and uppercased on creation so lookups are not
/// sensitive to how the loader spelled them.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct EntityId(String);

impl EntityId {
    /// Creates a new identifier, normalizing case and surrounding whitespace.
    #[must_use]
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into().trim().to_uppercase())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for EntityId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

impl From<&str> for EntityId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for EntityId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<EntityId> for String {
    fn from(id: EntityId) -> Self {
        id.0
    }
}

/// A reporting period: a fiscal year, optionally narrowed to a quarter.
///
/// Keys order chronologically by the month the period ends in. An annual key
/// ends with the fourth quarter and sorts right after it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PeriodKey {
    /// Fiscal year.
    pub year: i32,
    /// Fiscal quarter (1-4), `None` for annual figures.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quarter: Option<u8>,
}

impl PeriodKey {
    /// Creates a key for full-year figures.
    #[must_use]
    pub const fn annual(year: i32) -> Self {
        Self {
            year,
            quarter: None,
        }
    }

    /// Creates a key for a single quarter.
    ///
    /// # Errors
    ///
    /// Returns [`RondaError::InvalidData`] if `quarter` is not in 1..=4.
    pub fn quarterly(year: i32, quarter: u8) -> Result<Self> {
        let key = Self {
            year,
            quarter: Some(quarter),
        };
        if key.is_valid() {
            Ok(key)
        } else {
            Err(RondaError::InvalidData(format!(
                "quarter must be between 1 and 4, got {quarter}"
            )))
        }
    }

    /// Whether the quarter, if any, is in 1..=4.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        matches!(self.quarter, None | Some(1..=4))
    }

    /// Whether this key covers a full year.
    #[must_use]
    pub const fn is_annual(&self) -> bool {
        self.quarter.is_none()
    }

    /// Calendar month the period ends in, assuming calendar fiscal years.
    #[must_use]
    pub fn end_month(&self) -> u32 {
        self.quarter.map_or(12, |q| u32::from(q) * 3)
    }

    /// Last calendar day covered by the period, assuming calendar fiscal years.
    ///
    /// `None` for an invalid quarter or a year outside the calendar range.
    #[must_use]
    pub fn period_end(&self) -> Option<Date> {
        if !self.is_valid() {
            return None;
        }
        let month = self.end_month();
        let (year, next_month) = if month >= 12 {
            (self.year.checked_add(1)?, 1)
        } else {
            (self.year, month + 1)
        };
        Date::from_ymd_opt(year, next_month, 1)?.pred_opt()
    }

    fn sort_key(&self) -> (i32, u32, bool) {
        (self.year, self.end_month(), self.is_annual())
    }
}

impl Ord for PeriodKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.sort_key().cmp(&other.sort_key())
    }
}

impl PartialOrd for PeriodKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for PeriodKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.quarter {
            Some(q) => write!(f, "{}Q{}", self.year, q),
            None => write!(f, "{}", self.year),
        }
    }
}

impl FromStr for PeriodKey {
    type Err = RondaError;

    /// Parses `2023`, `2023Q2` or `2023-Q2`.
    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_uppercase();
        let invalid = || RondaError::InvalidData(format!("Invalid period: '{s}'"));

        match normalized.split_once('Q') {
            Some((year, quarter)) => {
                let year = year.trim_end_matches('-').parse().map_err(|_| invalid())?;
                let quarter = quarter.parse().map_err(|_| invalid())?;
                Self::quarterly(year, quarter)
            }
            None => normalized.parse().map(Self::annual).map_err(|_| invalid()),
        }
    }
}

/// A named statement line consumed by ratio computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatementField {
    /// Total assets (balance sheet).
    TotalAssets,
    /// Shareholders' equity (balance sheet).
    Equity,
    /// Net profit after tax (income statement).
    NetProfit,
    /// Net revenue (income statement).
    Revenue,
    /// Gross profit (income statement).
    GrossProfit,
    /// Current assets (balance sheet).
    CurrentAssets,
    /// Current liabilities (balance sheet).
    CurrentLiabilities,
    /// Total liabilities (balance sheet).
    TotalLiabilities,
}

impl StatementField {
    /// Every statement field, in balance-sheet then income-statement order.
    pub const ALL: [Self; 8] = [
        Self::TotalAssets,
        Self::CurrentAssets,
        Self::TotalLiabilities,
        Self::CurrentLiabilities,
        Self::Equity,
        Self::Revenue,
        Self::GrossProfit,
        Self::NetProfit,
    ];

    /// Column name used for this field in tabular statement data.
    #[must_use]
    pub const fn column_name(&self) -> &'static str {
        match self {
            Self::TotalAssets => "total_assets",
            Self::Equity => "equity",
            Self::NetProfit => "net_profit",
            Self::Revenue => "revenue",
            Self::GrossProfit => "gross_profit",
            Self::CurrentAssets => "current_assets",
            Self::CurrentLiabilities => "current_liabilities",
            Self::TotalLiabilities => "total_liabilities",
        }
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::TotalAssets => "Total assets",
            Self::Equity => "Equity",
            Self::NetProfit => "Net profit",
            Self::Revenue => "Revenue",
            Self::GrossProfit => "Gross profit",
            Self::CurrentAssets => "Current assets",
            Self::CurrentLiabilities => "Current liabilities",
            Self::TotalLiabilities => "Total liabilities",
        }
    }
}

impl fmt::Display for StatementField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column_name())
    }
}

/// Statement line values for one period. Absent lines are `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatementValues {
    /// Total assets.
    pub total_assets: Option<f64>,
    /// Shareholders' equity.
    pub equity: Option<f64>,
    /// Net profit after tax.
    pub net_profit: Option<f64>,
    /// Net revenue.
    pub revenue: Option<f64>,
    /// Gross profit.
    pub gross_profit: Option<f64>,
    /// Current assets.
    pub current_assets: Option<f64>,
    /// Current liabilities.
    pub current_liabilities: Option<f64>,
    /// Total liabilities.
    pub total_liabilities: Option<f64>,
}

impl StatementValues {
    /// Returns the value of a field.
    #[must_use]
    pub const fn get(&self, field: StatementField) -> Option<f64> {
        match field {
            StatementField::TotalAssets => self.total_assets,
            StatementField::Equity => self.equity,
            StatementField::NetProfit => self.net_profit,
            StatementField::Revenue => self.revenue,
            StatementField::GrossProfit => self.gross_profit,
            StatementField::CurrentAssets => self.current_assets,
            StatementField::CurrentLiabilities => self.current_liabilities,
            StatementField::TotalLiabilities => self.total_liabilities,
        }
    }

    /// Sets a field, returning the updated values.
    #[must_use]
    pub fn with(mut self, field: StatementField, value: impl Into<Option<f64>>) -> Self {
        *self.slot(field) = value.into();
        self
    }

    const fn slot(&mut self, field: StatementField) -> &mut Option<f64> {
        match field {
            StatementField::TotalAssets => &mut self.total_assets,
            StatementField::Equity => &mut self.equity,
            StatementField::NetProfit => &mut self.net_profit,
            StatementField::Revenue => &mut self.revenue,
            StatementField::GrossProfit => &mut self.gross_profit,
            StatementField::CurrentAssets => &mut self.current_assets,
            StatementField::CurrentLiabilities => &mut self.current_liabilities,
            StatementField::TotalLiabilities => &mut self.total_liabilities,
        }
    }

    /// Replaces NaN and infinite values with `None`.
    fn normalized(mut self) -> Self {
        for field in StatementField::ALL {
            let slot = self.slot(field);
            if slot.is_some_and(|v| !v.is_finite()) {
                *slot = None;
            }
        }
        self
    }
}

/// One reporting period for one entity.
///
/// Immutable once constructed. Non-finite inputs are stored as missing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatementPeriod {
    entity: EntityId,
    period: PeriodKey,
    values: StatementValues,
}

impl StatementPeriod {
    /// Creates a statement period.
    ///
    /// # Example
    ///
    /// ```
    /// use ronda_traits::{PeriodKey, StatementField, StatementPeriod, StatementValues};
    ///
    /// let values = StatementValues::default()
    ///     .with(StatementField::NetProfit, 12.0)
    ///     .with(StatementField::TotalAssets, f64::NAN);
    /// let period = StatementPeriod::new("vnm", PeriodKey::annual(2023), values);
    ///
    /// assert_eq!(period.entity().as_str(), "VNM");
    /// assert_eq!(period.value(StatementField::NetProfit), Some(12.0));
    /// assert_eq!(period.value(StatementField::TotalAssets), None);
    /// ```
    #[must_use]
    pub fn new(entity: impl Into<EntityId>, period: PeriodKey, values: StatementValues) -> Self {
        Self {
            entity: entity.into(),
            period,
            values: values.normalized(),
        }
    }

    /// The reporting entity.
    #[must_use]
    pub const fn entity(&self) -> &EntityId {
        &self.entity
    }

    /// The reporting period.
    #[must_use]
    pub const fn period(&self) -> PeriodKey {
        self.period
    }

    /// All statement values.
    #[must_use]
    pub const fn values(&self) -> &StatementValues {
        &self.values
    }

    /// The value of one statement line, `None` when missing.
    #[must_use]
    pub const fn value(&self, field: StatementField) -> Option<f64> {
        self.values.get(field)
    }

    /// Fields with no value in this period.
    #[must_use]
    pub fn missing_fields(&self) -> Vec<StatementField> {
        StatementField::ALL
            .into_iter()
            .filter(|f| self.value(*f).is_none())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_id_normalized() {
        let id = EntityId::new("  vnm ");
        assert_eq!(id.as_str(), "VNM");
        assert_eq!(id, EntityId::from("VNM"));
        assert_eq!(id.to_string(), "VNM");
    }

    #[test]
    fn test_period_ordering() {
        let mut keys = vec![
            PeriodKey::quarterly(2023, 2).unwrap(),
            PeriodKey::annual(2024),
            PeriodKey::annual(2023),
            PeriodKey::quarterly(2023, 1).unwrap(),
        ];
        keys.sort();
        assert_eq!(
            keys,
            vec![
                PeriodKey::quarterly(2023, 1).unwrap(),
                PeriodKey::quarterly(2023, 2).unwrap(),
                PeriodKey::annual(2023),
                PeriodKey::annual(2024),
            ]
        );
    }

    #[test]
    fn test_ordering_follows_period_end() {
        let mut keys = vec![PeriodKey::annual(2023)];
        for q in (1..=4).rev() {
            keys.push(PeriodKey::quarterly(2023, q).unwrap());
        }
        keys.push(PeriodKey::quarterly(2022, 4).unwrap());
        keys.sort();

        let ends: Vec<Date> = keys.iter().map(|k| k.period_end().unwrap()).collect();
        assert!(ends.windows(2).all(|w| w[0] <= w[1]));

        // Q4 and the full year end on the same day; the full year comes last.
        let q4 = PeriodKey::quarterly(2023, 4).unwrap();
        assert_eq!(q4.period_end(), PeriodKey::annual(2023).period_end());
        assert!(q4 < PeriodKey::annual(2023));
        assert_eq!(keys.last(), Some(&PeriodKey::annual(2023)));
        assert!(PeriodKey::annual(2022) < PeriodKey::quarterly(2023, 1).unwrap());
    }

    #[test]
    fn test_quarter_validation() {
        assert!(PeriodKey::quarterly(2023, 0).is_err());
        assert!(PeriodKey::quarterly(2023, 5).is_err());
        assert!(PeriodKey::quarterly(2023, 4).is_ok());
    }

    #[test]
    fn test_period_parse_and_display() {
        assert_eq!("2023".parse::<PeriodKey>().unwrap(), PeriodKey::annual(2023));
        assert_eq!(
            "2023q3".parse::<PeriodKey>().unwrap(),
            PeriodKey::quarterly(2023, 3).unwrap()
        );
        assert_eq!(
            "2023-Q4".parse::<PeriodKey>().unwrap(),
            PeriodKey::quarterly(2023, 4).unwrap()
        );
        assert!("2023Q9".parse::<PeriodKey>().is_err());
        assert!("FY23".parse::<PeriodKey>().is_err());

        assert_eq!(PeriodKey::annual(2022).to_string(), "2022");
        assert_eq!(PeriodKey::quarterly(2022, 1).unwrap().to_string(), "2022Q1");
    }

    #[test]
    fn test_period_end() {
        let invalid = PeriodKey {
            year: 2023,
            quarter: Some(6),
        };
        assert_eq!(invalid.period_end(), None);
        assert_eq!(
            PeriodKey::annual(2023).period_end(),
            Date::from_ymd_opt(2023, 12, 31)
        );
        assert_eq!(
            PeriodKey::quarterly(2024, 1).unwrap().period_end(),
            Date::from_ymd_opt(2024, 3, 31)
        );
        assert_eq!(
            PeriodKey::quarterly(2024, 2).unwrap().period_end(),
            Date::from_ymd_opt(2024, 6, 30)
        );
        assert_eq!(
            PeriodKey::quarterly(2024, 4).unwrap().period_end(),
            Date::from_ymd_opt(2024, 12, 31)
        );
    }

    #[test]
    fn test_non_finite_values_are_missing() {
        let values = StatementValues::default()
            .with(StatementField::Revenue, f64::INFINITY)
            .with(StatementField::Equity, f64::NAN)
            .with(StatementField::NetProfit, -3.5);
        let period = StatementPeriod::new("ABC", PeriodKey::annual(2020), values);

        assert_eq!(period.value(StatementField::Revenue), None);
        assert_eq!(period.value(StatementField::Equity), None);
        assert_eq!(period.value(StatementField::NetProfit), Some(-3.5));
        assert_eq!(period.missing_fields().len(), 7);
    }

    #[test]
    fn test_values_get_matches_with() {
        for field in StatementField::ALL {
            let values = StatementValues::default().with(field, 1.0);
            assert_eq!(values.get(field), Some(1.0));
            let populated = StatementField::ALL
                .iter()
                .filter(|f| values.get(**f).is_some())
                .count();
            assert_eq!(populated, 1);
        }
    }

    #[test]
    fn test_values_deserialize_partial() {
        let values: StatementValues =
            serde_json::from_str(r#"{"revenue": 100.0, "net_profit": null}"#).unwrap();
        assert_eq!(values.revenue, Some(100.0));
        assert_eq!(values.net_profit, None);
        assert_eq!(values.total_assets, None);
    }
}
