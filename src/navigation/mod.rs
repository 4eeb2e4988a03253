//! Navigation system for Striker
//!
//! Route planning for a robot that must reach the ball and then carry it to
//! the goal. The planner is a weighted A* whose states combine the cell, the
//! heading of the last move and whether the ball is carried, because moving
//! and turning cost more with the ball and turning depends on the heading.

pub mod config;
pub mod controller;
pub mod cost;
pub mod heuristic;
pub mod node;
pub mod observer;
pub mod planner;

pub use config::{ConfigError, DuplicatePolicy, PayloadPolicy, PlannerConfig};
pub use controller::{FieldConfig, MatchController, MatchEvent, MatchSummary};
pub use cost::{CostConfig, CostModel};
pub use heuristic::{Heuristic, HeuristicMode};
pub use node::{SearchNode, StateKey};
pub use observer::{
    LogObserver, NullObserver, SearchEvent, SearchFailure, SearchObserver, TraceObserver,
};
pub use planner::{PlanRequest, Planner, Route, SearchOutcome};

use crate::core::Position;

/// Preconditions a planning request failed. The caller should log it and
/// skip this planning cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidInput {
    /// Width or height is not positive
    EmptyGrid {
        /// Requested width
        width: i32,
        /// Requested height
        height: i32,
    },
    /// Start lies off the pitch
    StartOutOfBounds(Position),
    /// Goal lies off the pitch
    GoalOutOfBounds(Position),
    /// Start is occupied by an obstacle
    StartBlocked(Position),
    /// Goal is occupied by an obstacle
    GoalBlocked(Position),
}

impl std::fmt::Display for InvalidInput {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            InvalidInput::EmptyGrid { width, height } => {
                write!(f, "grid {}x{} has no cells", width, height)
            }
            InvalidInput::StartOutOfBounds(p) => write!(f, "start {} is off the grid", p),
            InvalidInput::GoalOutOfBounds(p) => write!(f, "goal {} is off the grid", p),
            InvalidInput::StartBlocked(p) => write!(f, "start {} is an obstacle", p),
            InvalidInput::GoalBlocked(p) => write!(f, "goal {} is an obstacle", p),
        }
    }
}

/// Navigation error types
#[derive(Debug)]
pub enum NavigationError {
    /// Request violates a precondition
    InvalidInput(InvalidInput),
    /// Planner configuration is unusable
    Config(ConfigError),
}

impl std::fmt::Display for NavigationError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            NavigationError::InvalidInput(e) => write!(f, "Invalid input: {}", e),
            NavigationError::Config(e) => write!(f, "Planner configuration: {}", e),
        }
    }
}

impl std::error::Error for NavigationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            NavigationError::InvalidInput(_) => None,
            NavigationError::Config(e) => Some(e),
        }
    }
}

impl From<InvalidInput> for NavigationError {
    fn from(e: InvalidInput) -> Self {
        NavigationError::InvalidInput(e)
    }
}

impl From<ConfigError> for NavigationError {
    fn from(e: ConfigError) -> Self {
        NavigationError::Config(e)
    }
}
