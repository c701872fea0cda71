//! Insight thresholds and policies.

use ronda_traits::{RondaError, Result};
use serde::{Deserialize, Serialize};

/// How insight rules treat ratios that could not be computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UndefinedPolicy {
    /// A rule that needs an undefined ratio reports insufficient data.
    #[default]
    InsufficientData,
    /// Undefined ratios compare as 0.
    TreatAsZero,
}

/// Configuration for insight derivation.
///
/// # Example
///
/// ```
/// use ronda_engine::{InsightConfig, UndefinedPolicy};
///
/// let config = InsightConfig {
///     undefined_policy: UndefinedPolicy::TreatAsZero,
///     ..Default::default()
/// };
/// assert_eq!(config.liquidity_window, 3);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InsightConfig {
    /// Current ratio every trailing period must exceed for good liquidity (default: 1.2)
    pub liquidity_threshold: f64,

    /// Number of trailing periods checked for liquidity (default: 3)
    pub liquidity_window: usize,

    /// Debt-to-equity percentage above which leverage is high risk (default: 100.0)
    pub leverage_threshold: f64,

    /// Treatment of undefined ratios (default: InsufficientData)
    pub undefined_policy: UndefinedPolicy,
}

impl Default for InsightConfig {
    fn default() -> Self {
        Self {
            liquidity_threshold: 1.2,
            liquidity_window: 3,
            leverage_threshold: 100.0,
            undefined_policy: UndefinedPolicy::InsufficientData,
        }
    }
}

impl InsightConfig {
    /// Parses a configuration from JSON. Absent keys keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or a threshold is not finite.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that thresholds are usable.
    ///
    /// # Errors
    ///
    /// Returns [`RondaError::InvalidData`] if a threshold is NaN or infinite.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("liquidity_threshold", self.liquidity_threshold),
            ("leverage_threshold", self.leverage_threshold),
        ] {
            if !value.is_finite() {
                return Err(RondaError::InvalidData(format!(
                    "{name} must be finite, got {value}"
                )));
            }
        }
        Ok(())
    }

    /// Liquidity window, never less than one period.
    #[must_use]
    pub fn effective_window(&self) -> usize {
        self.liquidity_window.max(1)
    }
}
