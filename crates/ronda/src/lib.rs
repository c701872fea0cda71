#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/ronda/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! # ronda
//!
//! Financial ratio and commentary engine.
//!
//! ronda is an umbrella crate that re-exports the ronda sub-crates and adds
//! the analyses a reporting front end needs on top of the ratio engine.
//!
//! ## Quick Start
//!
//! ```
//! use ronda::{RatioEngine, StatementStore, analyze_entity};
//! use ronda::traits::EntityId;
//!
//! # fn main() -> ronda::Result<()> {
//! let store = StatementStore::from_json_records(
//!     r#"[{"entity": "VNM", "year": 2022, "net_profit": 8.0, "equity": 80.0},
//!         {"entity": "VNM", "year": 2023, "net_profit": 10.0, "equity": 80.0}]"#,
//! )?;
//!
//! let engine = RatioEngine::default();
//! let analysis = analyze_entity(&engine, &store, &EntityId::new("VNM"))?;
//! println!("{}", analysis.insights.profitability);
//! # Ok(())
//! # }
//! ```
//!
//! ## Crate Organization
//!
//! - [`traits`] - Statement types, errors and the [`StatementProvider`] trait
//! - [`engine`] - Ratio computation and insight derivation
//! - [`data`] - The read-only [`StatementStore`]
//!
//! ## Architecture
//!
//! 1. A **provider** is built once from already-typed statement data
//! 2. The **engine** computes a ratio set per period, marking ratios it
//!    cannot compute as undefined
//! 3. **Insights** compare ratios across the period series
//! 4. **Analyses** (company, comparison, sector) and the text **report** sit
//!    on top for presentation

/// Version information for the ronda crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

mod analysis;
mod report;

// ============================================================================
// Sub-crates
// ============================================================================

/// Statement types, errors and the provider trait.
pub mod traits {
    pub use ronda_traits::*;
}

/// Ratio computation and insight derivation.
pub mod engine {
    pub use ronda_engine::*;
}

/// Statement storage.
pub mod data {
    pub use ronda_data::*;
}

// Re-export core types at top level for convenience
pub use ronda_data::StatementStore;
pub use ronda_engine::{
    Assessment, EntityAnalysis, Insight, InsightCategory, InsightConfig, InsightSet, RatioEngine,
    RatioKind, RatioSet, RatioValue, UndefinedPolicy, UndefinedRatio,
};
pub use ronda_traits::{Result, RondaError, StatementProvider};

// ============================================================================
// Analyses
// ============================================================================

pub use analysis::{
    Comparison, ComparisonRow, SectorAverage, SectorSummary, analyze_entity, compare_entities,
    sector_summary,
};
pub use report::{format_ratio, render_report};
