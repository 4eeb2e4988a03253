// core/grid.rs

// Grid primitives shared by the planner and the match controller: cell
// positions, pitch bounds and the static obstacle set.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use super::direction::Direction;

/// A cell on the pitch, `(column, row)`, 0-indexed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    /// Column index
    pub x: i32,
    /// Row index
    pub y: i32,
}

impl Position {
    /// Creates a position from column and row.
    pub const fn new(x: i32, y: i32) -> Self {
        Position { x, y }
    }

    /// The neighbouring cell one step along `direction`.
    pub fn step(self, direction: Direction) -> Self {
        Position::new(self.x + direction.dx(), self.y + direction.dy())
    }

    /// Chebyshev (king-move) distance to `other`.
    pub fn chebyshev(self, other: Position) -> i32 {
        (self.x - other.x).abs().max((self.y - other.y).abs())
    }

    /// Direction of a single step from `self` to `other`, if the two cells
    /// are 8-adjacent.
    pub fn direction_to(self, other: Position) -> Option<Direction> {
        if self.chebyshev(other) != 1 {
            return None;
        }
        Direction::new(other.x - self.x, other.y - self.y)
    }
}

impl From<(i32, i32)> for Position {
    fn from((x, y): (i32, i32)) -> Self {
        Position::new(x, y)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Pitch dimensions. Valid cells satisfy `0 <= x < width` and `0 <= y < height`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridBounds {
    /// Number of columns
    pub width: i32,
    /// Number of rows
    pub height: i32,
}

impl GridBounds {
    /// Creates bounds for a `width` x `height` pitch.
    pub const fn new(width: i32, height: i32) -> Self {
        GridBounds { width, height }
    }

    /// True when the pitch has no cells at all.
    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// True when `position` lies on the pitch.
    #[inline]
    pub fn contains(&self, position: Position) -> bool {
        position.x >= 0 && position.x < self.width && position.y >= 0 && position.y < self.height
    }
}

/// Cells occupied by opponents. Ordered so that every scan over it is
/// deterministic.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObstacleSet {
    cells: BTreeSet<Position>,
}

impl ObstacleSet {
    /// Creates an empty obstacle set.
    pub fn new() -> Self {
        ObstacleSet::default()
    }

    /// Marks `position` as blocked. Returns false if it already was.
    pub fn insert(&mut self, position: Position) -> bool {
        self.cells.insert(position)
    }

    /// Frees `position`. Returns false if it was not blocked.
    pub fn remove(&mut self, position: Position) -> bool {
        self.cells.remove(&position)
    }

    /// True when `position` is occupied.
    #[inline]
    pub fn is_blocked(&self, position: Position) -> bool {
        self.cells.contains(&position)
    }

    /// Number of blocked cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// True when nothing is blocked.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Blocked cells in ascending `(x, y)` order.
    pub fn iter(&self) -> impl Iterator<Item = &Position> + '_ {
        self.cells.iter()
    }
}

impl FromIterator<Position> for ObstacleSet {
    fn from_iter<I: IntoIterator<Item = Position>>(iter: I) -> Self {
        ObstacleSet {
            cells: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a ObstacleSet {
    type Item = &'a Position;
    type IntoIter = std::collections::btree_set::Iter<'a, Position>;

    fn into_iter(self) -> Self::IntoIter {
        self.cells.iter()
    }
}
