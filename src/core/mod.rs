// core/mod.rs

// Grid primitives shared by every Striker component: cells, headings, pitch
// bounds and the static obstacle set. Nothing in here knows about costs or
// search; see `navigation` for that.

pub mod direction;
pub mod grid;

pub use direction::{Direction, MoveKind, TurnKind};
pub use grid::{GridBounds, ObstacleSet, Position};
