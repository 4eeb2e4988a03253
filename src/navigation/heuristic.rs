// src/navigation/heuristic.rs
// Remaining-cost estimates from a cell to the search target.

use serde::{Deserialize, Serialize};

use crate::core::Position;

use super::cost::CostConfig;

/// Which estimate the planner uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeuristicMode {
    /// `min(dx, dy) * diagonal + |dx - dy| * straight`. Close both axes with
    /// diagonal steps, finish with straight ones. Overestimates when a zigzag
    /// of cheap diagonals beats a straight run, so the search is best-effort.
    #[default]
    Octile,
    /// `max(dx, dy) * min(straight, diagonal)`. Never overestimates, since each
    /// step closes at most one cell of Chebyshev distance.
    Chebyshev,
}

/// Heuristic evaluator, blind to heading and payload.
#[derive(Debug, Clone, Copy)]
pub struct Heuristic {
    mode: HeuristicMode,
    straight: f64,
    diagonal: f64,
    weight: f64,
}

impl Heuristic {
    /// Builds an estimator priced with the step costs of `costs`, scaled by
    /// `weight` (0 turns the search into Dijkstra).
    pub fn new(mode: HeuristicMode, costs: &CostConfig, weight: f64) -> Self {
        Heuristic {
            mode,
            straight: costs.straight,
            diagonal: costs.diagonal,
            weight,
        }
    }

    /// Estimated cost from `position` to `goal`.
    pub fn estimate(&self, position: Position, goal: Position) -> f64 {
        let dx = (position.x - goal.x).abs();
        let dy = (position.y - goal.y).abs();
        let raw = match self.mode {
            HeuristicMode::Octile => octile(dx, dy, self.straight, self.diagonal),
            HeuristicMode::Chebyshev => dx.max(dy) as f64 * self.straight.min(self.diagonal),
        };
        raw * self.weight
    }
}

/// Octile distance with independent straight and diagonal rates.
fn octile(dx: i32, dy: i32, straight: f64, diagonal: f64) -> f64 {
    let diag = dx.min(dy);
    let orth = (dx - dy).abs();
    diag as f64 * diagonal + orth as f64 * straight
}
