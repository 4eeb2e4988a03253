// src/navigation/node.rs
// Search states and frontier entries.

use std::cmp::Ordering;

use crate::core::{Direction, Position};

/// Identity of a search state. The same cell reached with another heading or
/// payload status is a different state, since its future costs differ.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct StateKey {
    /// Cell
    pub position: Position,
    /// Heading of the move that reached the cell (None for the start)
    pub direction: Option<Direction>,
    /// Whether the ball is carried
    pub has_payload: bool,
}

/// A node of the search tree. Never modified once created; the predecessor
/// is an index into the planner's node arena.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SearchNode {
    /// Cell
    pub position: Position,
    /// Heading of the move that reached the cell (None for the start)
    pub direction: Option<Direction>,
    /// Whether the ball is carried
    pub has_payload: bool,
    /// Accumulated cost from the start
    pub g: f64,
    /// Heuristic estimate to the goal
    pub h: f64,
    /// Arena index of the node this one was expanded from
    pub parent: Option<usize>,
}

impl SearchNode {
    /// The start node: no heading, no predecessor, zero cost.
    pub fn start(position: Position, has_payload: bool, h: f64) -> Self {
        SearchNode {
            position,
            direction: None,
            has_payload,
            g: 0.0,
            h,
            parent: None,
        }
    }

    /// `g + h`
    #[inline]
    pub fn f(&self) -> f64 {
        self.g + self.h
    }

    /// Deduplication key.
    pub fn key(&self) -> StateKey {
        StateKey {
            position: self.position,
            direction: self.direction,
            has_payload: self.has_payload,
        }
    }
}

/// Frontier entry with reverse ordering for `BinaryHeap` (lowest f first).
/// Equal f pops in insertion order.
#[derive(Clone, Copy, Debug)]
pub(crate) struct OpenEntry {
    pub f: f64,
    pub counter: u64,
    pub index: usize,
}

impl PartialEq for OpenEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for OpenEntry {}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .f
            .total_cmp(&self.f)
            .then_with(|| other.counter.cmp(&self.counter))
    }
}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
