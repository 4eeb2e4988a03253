// src/navigation/observer.rs
// Hooks the planner calls at fixed points of a search. Logging, tracing and
// test assertions all hang off this trait instead of the search loop.

use log::{debug, info, trace, warn};

use super::node::SearchNode;
use super::planner::Route;

/// Why a search ended without a route.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchFailure {
    /// The frontier emptied without reaching the goal
    Unreachable,
    /// The expansion budget ran out first
    BudgetExceeded,
}

/// Receives search events. Every method defaults to doing nothing.
pub trait SearchObserver {
    /// A node was created and pushed onto the frontier.
    fn node_created(&mut self, _node: &SearchNode) {}

    /// A node was popped and its successors are about to be generated.
    fn node_expanded(&mut self, _node: &SearchNode) {}

    /// The goal was popped; `route` is what the planner returns.
    fn goal_found(&mut self, _route: &Route) {}

    /// The search ended without a route after `expanded` expansions.
    fn search_failed(&mut self, _failure: SearchFailure, _expanded: usize) {}
}

/// Discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullObserver;

impl SearchObserver for NullObserver {}

/// Forwards events to the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogObserver;

impl SearchObserver for LogObserver {
    fn node_created(&mut self, node: &SearchNode) {
        trace!(
            "Created node {} g={:.1} h={:.1} f={:.1} heading={:?} ball={}",
            node.position,
            node.g,
            node.h,
            node.f(),
            node.direction,
            node.has_payload
        );
    }

    fn node_expanded(&mut self, node: &SearchNode) {
        debug!(
            "Expanding {} f={:.1} (g={:.1}, h={:.1}) ball={}",
            node.position,
            node.f(),
            node.g,
            node.h,
            node.has_payload
        );
    }

    fn goal_found(&mut self, route: &Route) {
        info!(
            "Route found: {} steps, cost {:.1}, {} expansions",
            route.cells.len(),
            route.cost,
            route.expanded
        );
    }

    fn search_failed(&mut self, failure: SearchFailure, expanded: usize) {
        warn!("No route ({:?}) after {} expansions", failure, expanded);
    }
}

/// One recorded event.
#[derive(Clone, Debug, PartialEq)]
pub enum SearchEvent {
    /// See [`SearchObserver::node_created`]
    Created(SearchNode),
    /// See [`SearchObserver::node_expanded`]
    Expanded(SearchNode),
    /// See [`SearchObserver::goal_found`]
    GoalFound(Route),
    /// See [`SearchObserver::search_failed`]
    Failed(SearchFailure, usize),
}

/// Records every event in order, for inspection after the call.
#[derive(Debug, Default, Clone)]
pub struct TraceObserver {
    /// Events in the order they happened
    pub events: Vec<SearchEvent>,
}

impl TraceObserver {
    /// Creates an empty trace.
    pub fn new() -> Self {
        TraceObserver::default()
    }

    /// Nodes expanded, in pop order.
    pub fn expanded(&self) -> impl Iterator<Item = &SearchNode> + '_ {
        self.events.iter().filter_map(|event| match event {
            SearchEvent::Expanded(node) => Some(node),
            _ => None,
        })
    }

    /// Number of nodes created, including the start node.
    pub fn created_count(&self) -> usize {
        self.events
            .iter()
            .filter(|event| matches!(event, SearchEvent::Created(_)))
            .count()
    }
}

impl SearchObserver for TraceObserver {
    fn node_created(&mut self, node: &SearchNode) {
        self.events.push(SearchEvent::Created(*node));
    }

    fn node_expanded(&mut self, node: &SearchNode) {
        self.events.push(SearchEvent::Expanded(*node));
    }

    fn goal_found(&mut self, route: &Route) {
        self.events.push(SearchEvent::GoalFound(route.clone()));
    }

    fn search_failed(&mut self, failure: SearchFailure, expanded: usize) {
        self.events.push(SearchEvent::Failed(failure, expanded));
    }
}
