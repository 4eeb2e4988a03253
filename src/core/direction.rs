// core/direction.rs

// Compass headings on the grid and the classification of moves and turns
// the cost model prices.

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the 8 compass headings, as a unit step `(dx, dy)`.
///
/// The zero vector is not a direction; the start of a search has no heading
/// and is represented as `Option::<Direction>::None`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Direction {
    dx: i8,
    dy: i8,
}

/// Straight or diagonal step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MoveKind {
    /// Exactly one axis changes
    Straight,
    /// Both axes change
    Diagonal,
}

/// Turn tiers priced by the cost model.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TurnKind {
    /// First move of a search, or same heading as before
    None,
    /// Straight heading into a diagonal one
    StraightToDiagonal,
    /// Diagonal heading into a straight one
    DiagonalToStraight,
    /// Straight to straight or diagonal to diagonal: a right angle or a reversal
    Brusque,
}

impl Direction {
    /// `+x`
    pub const EAST: Direction = Direction { dx: 1, dy: 0 };
    /// `-x`
    pub const WEST: Direction = Direction { dx: -1, dy: 0 };
    /// `+y`
    pub const SOUTH: Direction = Direction { dx: 0, dy: 1 };
    /// `-y`
    pub const NORTH: Direction = Direction { dx: 0, dy: -1 };
    /// `+x +y`
    pub const SOUTH_EAST: Direction = Direction { dx: 1, dy: 1 };
    /// `+x -y`
    pub const NORTH_EAST: Direction = Direction { dx: 1, dy: -1 };
    /// `-x +y`
    pub const SOUTH_WEST: Direction = Direction { dx: -1, dy: 1 };
    /// `-x -y`
    pub const NORTH_WEST: Direction = Direction { dx: -1, dy: -1 };

    /// Expansion order of the planner: the four straight headings, then the
    /// four diagonals. Cost ties between successors resolve in this order.
    pub const ALL: [Direction; 8] = [
        Direction::EAST,
        Direction::WEST,
        Direction::SOUTH,
        Direction::NORTH,
        Direction::SOUTH_EAST,
        Direction::NORTH_EAST,
        Direction::SOUTH_WEST,
        Direction::NORTH_WEST,
    ];

    /// Builds a heading from a step. Returns `None` unless both components
    /// are in `{-1, 0, 1}` and not both zero.
    pub fn new(dx: i32, dy: i32) -> Option<Self> {
        let unit = (-1..=1).contains(&dx) && (-1..=1).contains(&dy);
        if !unit || (dx == 0 && dy == 0) {
            return None;
        }
        Some(Direction {
            dx: dx as i8,
            dy: dy as i8,
        })
    }

    /// Column delta
    pub fn dx(self) -> i32 {
        self.dx as i32
    }

    /// Row delta
    pub fn dy(self) -> i32 {
        self.dy as i32
    }

    /// Step as an integer vector.
    pub fn to_vector(self) -> Vector2<i32> {
        Vector2::new(self.dx(), self.dy())
    }

    /// Straight when the Manhattan norm of the step is 1.
    pub fn kind(self) -> MoveKind {
        if self.to_vector().abs().sum() == 1 {
            MoveKind::Straight
        } else {
            MoveKind::Diagonal
        }
    }

    /// Exactly one axis changes.
    pub fn is_straight(self) -> bool {
        self.kind() == MoveKind::Straight
    }

    /// Both axes change.
    pub fn is_diagonal(self) -> bool {
        self.kind() == MoveKind::Diagonal
    }

    /// Dot product of the two step vectors. Zero for a right angle,
    /// negative for a reversal.
    pub fn dot(self, other: Direction) -> i32 {
        self.to_vector().dot(&other.to_vector())
    }

    /// Classifies the turn from `previous` (None at the start) into `self`.
    pub fn turn_from(self, previous: Option<Direction>) -> TurnKind {
        let previous = match previous {
            Some(previous) if previous != self => previous,
            _ => return TurnKind::None,
        };
        match (previous.kind(), self.kind()) {
            (MoveKind::Straight, MoveKind::Diagonal) => TurnKind::StraightToDiagonal,
            (MoveKind::Diagonal, MoveKind::Straight) => TurnKind::DiagonalToStraight,
            // Same class, different heading: orthogonal (dot == 0) or opposite (dot < 0)
            _ => {
                debug_assert!(previous.dot(self) <= 0);
                TurnKind::Brusque
            }
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match (self.dx, self.dy) {
            (1, 0) => "E",
            (-1, 0) => "W",
            (0, 1) => "S",
            (0, -1) => "N",
            (1, 1) => "SE",
            (1, -1) => "NE",
            (-1, 1) => "SW",
            _ => "NW",
        };
        write!(f, "{}", name)
    }
}
