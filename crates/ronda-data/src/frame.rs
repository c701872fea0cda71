//! Conversion from tabular statement data.
//!
//! Loaders hand over a polars `DataFrame` with one row per entity and period.
//! The identity columns `entity` and `year` are required; `quarter`, `sector`
//! and every statement column are optional. An absent column, a null cell and
//! a NaN cell all become a missing value.

use crate::record::StatementRecord;
use crate::store::StatementStore;
use polars::prelude::*;
use ronda_traits::{EntityId, Result, RondaError, StatementField, StatementValues};
use tracing::debug;

/// Columns that must be present in a statement table.
pub const REQUIRED_COLUMNS: [&str; 2] = ["entity", "year"];

fn optional_column(df: &DataFrame, name: &str, dtype: &DataType) -> Result<Option<Series>> {
    match df.column(name) {
        Ok(column) => Ok(Some(column.as_materialized_series().cast(dtype)?)),
        Err(_) => {
            debug!(column = name, "statement column absent, treating as missing");
            Ok(None)
        }
    }
}

/// Converts a statement table into flat records.
///
/// # Errors
///
/// Returns [`RondaError::MissingColumn`] if `entity` or `year` is absent and
/// [`RondaError::InvalidData`] for rows with a null identity or an
/// out-of-range quarter.
pub fn records_from_frame(df: &DataFrame) -> Result<Vec<StatementRecord>> {
    for col in REQUIRED_COLUMNS {
        if df.column(col).is_err() {
            return Err(RondaError::MissingColumn(col.to_string()));
        }
    }

    let entities = df.column("entity")?.as_materialized_series().cast(&DataType::String)?;
    let entities = entities.str()?;
    let years = df.column("year")?.as_materialized_series().cast(&DataType::Int32)?;
    let years = years.i32()?;

    let quarters = optional_column(df, "quarter", &DataType::Int32)?;
    let quarters = quarters.as_ref().map(Series::i32).transpose()?;
    let sectors = optional_column(df, "sector", &DataType::String)?;
    let sectors = sectors.as_ref().map(Series::str).transpose()?;

    let mut owned = Vec::with_capacity(StatementField::ALL.len());
    for field in StatementField::ALL {
        if let Some(series) = optional_column(df, field.column_name(), &DataType::Float64)? {
            owned.push((field, series));
        }
    }
    let mut columns = Vec::with_capacity(owned.len());
    for (field, series) in &owned {
        columns.push((*field, series.f64()?));
    }

    let mut records = Vec::with_capacity(df.height());
    for row in 0..df.height() {
        let entity = entities
            .get(row)
            .ok_or_else(|| RondaError::InvalidData(format!("row {row}: entity is null")))?;
        let year = years
            .get(row)
            .ok_or_else(|| RondaError::InvalidData(format!("row {row}: year is null")))?;
        let quarter = match quarters.and_then(|q| q.get(row)) {
            Some(q) => Some(u8::try_from(q).map_err(|_| {
                RondaError::InvalidData(format!("row {row}: quarter {q} out of range"))
            })?),
            None => None,
        };
        let sector = sectors
            .and_then(|s| s.get(row))
            .map(str::to_string);

        let mut values = StatementValues::default();
        for (field, column) in &columns {
            values = values.with(*field, column.get(row));
        }

        records.push(StatementRecord {
            entity: EntityId::new(entity),
            year,
            quarter,
            sector,
            values,
        });
    }

    Ok(records)
}

impl StatementStore {
    /// Builds a store from a statement table.
    ///
    /// # Errors
    ///
    /// See [`records_from_frame`] and [`StatementStore::from_periods`].
    pub fn from_frame(df: &DataFrame) -> Result<Self> {
        Self::from_records(records_from_frame(df)?)
    }
}
