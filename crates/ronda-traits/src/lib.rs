#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/ronda/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Core definitions for the ronda financial ratio engine.
//!
//! This crate provides the statement record types consumed by ratio
//! computation, the shared error type, and the read-only provider abstraction
//! used to hand statement series to the engine.

/// The version of the ronda-traits crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Module declarations
pub mod error;
pub mod provider;
pub mod types;

// Re-exports
pub use error::{RondaError, Result};
pub use provider::StatementProvider;
pub use types::{Date, EntityId, PeriodKey, StatementField, StatementPeriod, StatementValues};
