//! Read-only statement store for ronda.
//!
//! The store is the provider side of the ratio engine: it is built once from
//! already-typed statement data and then only read. Three inputs are
//! supported:
//!
//! - [`StatementPeriod`](ronda_traits::StatementPeriod) values built in code
//! - a polars `DataFrame` with one row per entity and period
//! - a JSON array of [`StatementRecord`]s
//!
//! # Usage
//!
//! ```rust,ignore
//! use ronda_data::StatementStore;
//! use ronda_traits::StatementProvider;
//!
//! let store = StatementStore::from_frame(&statements)?;
//!
//! for entity in store.entities() {
//!     let periods = store.periods(&entity)?;
//!     println!("{entity}: {} periods", periods.len());
//! }
//! ```

mod frame;
mod record;
mod store;

pub use frame::{REQUIRED_COLUMNS, records_from_frame};
pub use record::StatementRecord;
pub use store::StatementStore;
