//! Financial ratio derivation and insight generation.
//!
//! This crate turns per-period statement records into the standard ratio set
//! and layers a small rule-based commentary generator on top:
//! - Ratios: ROA, ROE, ROS, gross profit margin, current ratio, debt-to-equity
//! - Insights: profitability, liquidity, leverage and efficiency
//!
//! Ratios that cannot be computed are values ([`UndefinedRatio`]), never
//! errors, and insight derivation always yields all four categories.
//!
//! # Example
//!
//! ```
//! use ronda_engine::{RatioEngine, RatioKind};
//! use ronda_traits::{PeriodKey, StatementField, StatementPeriod, StatementValues};
//!
//! let values = StatementValues::default()
//!     .with(StatementField::NetProfit, 50.0)
//!     .with(StatementField::TotalAssets, 1_000.0);
//! let period = StatementPeriod::new("HPG", PeriodKey::annual(2023), values);
//!
//! let ratios = RatioEngine::default().compute_ratios(&period);
//! assert_eq!(ratios.get(RatioKind::Roa).value(), Some(5.0));
//! assert!(!ratios.get(RatioKind::Roe).is_defined());
//! ```

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

mod config;
mod engine;
mod insight;
mod ratio;
pub mod registry;

// Re-export key types
pub use config::{InsightConfig, UndefinedPolicy};
pub use engine::{EntityAnalysis, RatioEngine};
pub use insight::{Assessment, Insight, InsightCategory, InsightSet, derive_insights};
pub use ratio::{RatioKind, RatioSet, RatioValue, UndefinedRatio, compute_ratios};
pub use registry::RatioInfo;
