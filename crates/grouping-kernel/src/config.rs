//! Configuration types for the engine.

use std::path::Path;

use serde::Deserialize;

use crate::cost::CostWeights;
use crate::error::{GroupingError, Result};

/// Top-level engine configuration.
///
/// Every field has a default, so an empty TOML document is valid.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Search budget
    pub search: SearchConfig,

    /// Cost term weights
    pub weights: CostWeights,

    /// Seed for the search engine's random source (None for entropy)
    pub seed: Option<u64>,
}

/// Budget for one round's search.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Maximum candidate partitions sampled per round
    pub max_iterations: usize,

    /// Optional wall-clock budget per round (milliseconds)
    pub time_budget_ms: Option<u64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_iterations: 1000,
            time_budget_ms: None,
        }
    }
}

impl EngineConfig {
    /// Parse a TOML document.
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_toml_str(&raw)
    }

    pub fn validate(&self) -> Result<()> {
        if self.search.max_iterations == 0 {
            return Err(GroupingError::invalid(
                "search.max_iterations must be at least 1",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = EngineConfig::from_toml_str("").unwrap();
        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.search.max_iterations, 1000);
        assert_eq!(config.weights.repeat, 1);
        assert_eq!(config.weights.balance, 2);
        assert!(config.seed.is_none());
    }

    #[test]
    fn test_partial_override() {
        let config = EngineConfig::from_toml_str(
            r#"
            seed = 7

            [search]
            time_budget_ms = 250

            [weights]
            balance = 5
            "#,
        )
        .unwrap();

        assert_eq!(config.seed, Some(7));
        assert_eq!(config.search.max_iterations, 1000);
        assert_eq!(config.search.time_budget_ms, Some(250));
        assert_eq!(config.weights.repeat, 1);
        assert_eq!(config.weights.balance, 5);
    }

    #[test]
    fn test_zero_iterations_rejected() {
        let err = EngineConfig::from_toml_str("[search]\nmax_iterations = 0").unwrap_err();
        assert!(matches!(err, GroupingError::InvalidConfiguration { .. }));
    }

    #[test]
    fn test_malformed_document() {
        let err = EngineConfig::from_toml_str("[search\n").unwrap_err();
        assert!(matches!(err, GroupingError::Config(_)));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("engine.toml");
        std::fs::write(&path, "[search]\nmax_iterations = 42\n").unwrap();

        let config = EngineConfig::load(&path).unwrap();
        assert_eq!(config.search.max_iterations, 42);
    }
}
