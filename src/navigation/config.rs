// src/navigation/config.rs
// Planner configuration: cost constants plus search policies, loadable from
// YAML.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

use super::cost::CostConfig;
use super::heuristic::HeuristicMode;

/// How the planner treats a state key it has seen before.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// Push every successor whose key is not closed yet. Duplicates with a
    /// worse g stay in the frontier and are dropped when popped.
    #[default]
    SkipClosed,
    /// Also remember the cheapest g pushed per key and drop successors that
    /// do not improve on it.
    KeepCheapest,
}

/// How the payload flag evolves during one search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayloadPolicy {
    /// Stepping onto the search target sets the flag (the target is the ball
    /// on the first leg).
    #[default]
    AcquireAtGoal,
    /// The flag passed in holds for the whole search.
    Carried,
}

/// Everything the planner can be tuned with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// Edge cost constants
    pub costs: CostConfig,
    /// Remaining-cost estimate
    pub heuristic: HeuristicMode,
    /// Multiplier on the estimate; 0 gives Dijkstra
    pub heuristic_weight: f64,
    /// Expansions allowed per call before giving up; `None` for no limit
    pub max_expansions: Option<usize>,
    /// Duplicate state handling
    pub duplicate_policy: DuplicatePolicy,
    /// Payload flag handling
    pub payload_policy: PayloadPolicy,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        PlannerConfig {
            costs: CostConfig::default(),
            heuristic: HeuristicMode::Octile,
            heuristic_weight: 1.0,
            max_expansions: Some(100_000),
            duplicate_policy: DuplicatePolicy::SkipClosed,
            payload_policy: PayloadPolicy::AcquireAtGoal,
        }
    }
}

impl PlannerConfig {
    /// Loads and validates a configuration from a YAML file.
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let file = std::fs::File::open(path)?;
        let config: PlannerConfig = serde_yaml::from_reader(file)?;
        config.validate()?;
        Ok(config)
    }

    /// Parses and validates a configuration from YAML text.
    pub fn from_yaml_str(text: &str) -> Result<Self, ConfigError> {
        let config: PlannerConfig = serde_yaml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects values the search cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.costs.validate().map_err(ConfigError::Invalid)?;
        if !self.heuristic_weight.is_finite() || self.heuristic_weight < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "heuristic_weight must be finite and non-negative, got {}",
                self.heuristic_weight
            )));
        }
        if self.max_expansions == Some(0) {
            return Err(ConfigError::Invalid(
                "max_expansions must be positive when set".to_string(),
            ));
        }
        Ok(())
    }
}

/// Configuration loading errors
#[derive(Debug)]
pub enum ConfigError {
    /// File could not be read
    Io(std::io::Error),
    /// YAML could not be parsed
    Yaml(serde_yaml::Error),
    /// A value is out of range
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "Config I/O error: {}", e),
            ConfigError::Yaml(e) => write!(f, "Config parse error: {}", e),
            ConfigError::Invalid(msg) => write!(f, "Invalid config: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Yaml(e) => Some(e),
            ConfigError::Invalid(_) => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(e: serde_yaml::Error) -> Self {
        ConfigError::Yaml(e)
    }
}
