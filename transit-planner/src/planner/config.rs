//! Planner configuration.

use serde::Deserialize;

/// Default bound on vehicle boardings per journey.
pub const DEFAULT_MAX_ROUNDS: usize = 5;

/// Configuration parameters for journey planning.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// Maximum number of rounds, i.e. vehicle boardings, considered.
    /// A journey needing more boardings than this is reported unreachable.
    pub max_rounds: usize,
}

impl PlannerConfig {
    /// Create a new configuration with the given round bound.
    pub fn new(max_rounds: usize) -> Self {
        Self { max_rounds }
    }

    /// Parse a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            max_rounds: DEFAULT_MAX_ROUNDS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = PlannerConfig::default();
        assert_eq!(config.max_rounds, 5);
    }

    #[test]
    fn custom_config() {
        let config = PlannerConfig::new(2);
        assert_eq!(config.max_rounds, 2);
    }

    #[test]
    fn from_json() {
        let config = PlannerConfig::from_json(r#"{"max_rounds": 3}"#).unwrap();
        assert_eq!(config.max_rounds, 3);

        let config = PlannerConfig::from_json("{}").unwrap();
        assert_eq!(config, PlannerConfig::default());

        assert!(PlannerConfig::from_json(r#"{"max_rounds": -1}"#).is_err());
    }
}
