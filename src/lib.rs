//! Striker - route planning for a ball-carrying soccer robot
//!
//! This library plans least-cost routes on a discrete pitch where straight
//! and diagonal steps cost differently, turning has a price that depends on
//! the heading change, carrying the ball scales both, and opponents radiate
//! a penalty onto the cells around them.

#![warn(missing_docs)]
#![warn(unused_extern_crates)]

pub mod core;
pub mod navigation;

// Re-export commonly used items for easier access
pub use crate::core::{Direction, GridBounds, ObstacleSet, Position};
pub use navigation::{
    FieldConfig, InvalidInput, MatchController, NavigationError, PlanRequest, Planner,
    PlannerConfig, Route, SearchObserver, SearchOutcome,
};

use navigation::ConfigError;
use std::path::Path;

/// Top-level configuration: planner tuning plus the pitch layout the demo
/// binary plays on.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct StrikerConfig {
    /// Planner parameters
    pub planner: PlannerConfig,
    /// Pitch layout
    pub field: FieldConfig,
}

impl StrikerConfig {
    /// Loads and validates a configuration from a YAML file.
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let file = std::fs::File::open(path)?;
        let config: StrikerConfig = serde_yaml::from_reader(file)?;
        config.planner.validate()?;
        Ok(config)
    }

    /// Parses and validates a configuration from YAML text.
    pub fn from_yaml_str(text: &str) -> Result<Self, ConfigError> {
        let config: StrikerConfig = serde_yaml::from_str(text)?;
        config.planner.validate()?;
        Ok(config)
    }
}

/// Plans a route with the default configuration.
///
/// Returns the cells from the one after `start` through `goal`, or an empty
/// list when the goal is unreachable, the search budget runs out or the input
/// is invalid (logged as a warning). An empty list is also the answer when
/// `start == goal`.
pub fn find_path(
    start: Position,
    goal: Position,
    obstacles: &ObstacleSet,
    width: i32,
    height: i32,
    has_payload: bool,
) -> Vec<Position> {
    Planner::default().find_path(start, goal, obstacles, width, height, has_payload)
}

/// Striker error types
#[derive(Debug)]
pub enum StrikerError {
    /// Planning or controller error
    Navigation(NavigationError),
    /// Configuration error
    Config(ConfigError),
}

impl std::fmt::Display for StrikerError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            StrikerError::Navigation(e) => write!(f, "Navigation error: {}", e),
            StrikerError::Config(e) => write!(f, "Configuration error: {}", e),
        }
    }
}

impl std::error::Error for StrikerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StrikerError::Navigation(e) => Some(e),
            StrikerError::Config(e) => Some(e),
        }
    }
}

impl From<NavigationError> for StrikerError {
    fn from(e: NavigationError) -> Self {
        StrikerError::Navigation(e)
    }
}

impl From<ConfigError> for StrikerError {
    fn from(e: ConfigError) -> Self {
        StrikerError::Config(e)
    }
}
