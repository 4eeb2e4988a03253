// src/navigation/planner.rs
// Weighted A* over (cell, heading, ball) states.
//
// Tie-breaking: the frontier pops the lowest f; equal f values pop in the
// order they were pushed, and successors are pushed in `Direction::ALL`
// order. Given the same inputs the search always returns the same route.

use std::collections::{BinaryHeap, HashMap, HashSet};

use log::warn;

use crate::core::{Direction, GridBounds, ObstacleSet, Position};

use super::config::{ConfigError, DuplicatePolicy, PayloadPolicy, PlannerConfig};
use super::cost::CostModel;
use super::heuristic::Heuristic;
use super::node::{OpenEntry, SearchNode, StateKey};
use super::observer::{LogObserver, SearchFailure, SearchObserver};
use super::{InvalidInput, NavigationError};

/// One planning query.
#[derive(Debug, Clone, Copy)]
pub struct PlanRequest<'a> {
    /// Where the robot stands
    pub start: Position,
    /// Cell to reach
    pub goal: Position,
    /// Opponents; blocked for occupancy, penalised nearby
    pub obstacles: &'a ObstacleSet,
    /// Pitch size
    pub bounds: GridBounds,
    /// Whether the robot carries the ball at `start`
    pub has_payload: bool,
}

/// A route the planner found.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    /// Cells after the start, ending at the goal. Empty when start == goal.
    pub cells: Vec<Position>,
    /// Total edge cost (g of the goal node)
    pub cost: f64,
    /// Nodes expanded by the search
    pub expanded: usize,
    /// Payload flag on arrival
    pub has_payload: bool,
    /// Heading of the final move (None when start == goal)
    pub heading: Option<Direction>,
}

/// Result of a search over valid input.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    /// The goal was reached
    Found(Route),
    /// Every reachable state was expanded without reaching the goal
    Unreachable {
        /// Nodes expanded
        expanded: usize,
    },
    /// The expansion budget ran out
    BudgetExceeded {
        /// Nodes expanded
        expanded: usize,
    },
}

impl SearchOutcome {
    /// The route, if one was found.
    pub fn route(&self) -> Option<&Route> {
        match self {
            SearchOutcome::Found(route) => Some(route),
            _ => None,
        }
    }

    /// Route cells, or an empty list for any failure.
    pub fn into_cells(self) -> Vec<Position> {
        match self {
            SearchOutcome::Found(route) => route.cells,
            _ => Vec::new(),
        }
    }

    /// Nodes expanded, whatever the outcome.
    pub fn expanded(&self) -> usize {
        match self {
            SearchOutcome::Found(route) => route.expanded,
            SearchOutcome::Unreachable { expanded } | SearchOutcome::BudgetExceeded { expanded } => {
                *expanded
            }
        }
    }
}

/// Route planner. Holds configuration only; every call owns its own
/// frontier and closed set, so one planner can serve concurrent callers.
#[derive(Debug, Clone)]
pub struct Planner {
    config: PlannerConfig,
    costs: CostModel,
    heuristic: Heuristic,
}

impl Default for Planner {
    fn default() -> Self {
        let config = PlannerConfig::default();
        Planner {
            costs: CostModel::new(config.costs.clone()),
            heuristic: Heuristic::new(config.heuristic, &config.costs, config.heuristic_weight),
            config,
        }
    }
}

impl Planner {
    /// Creates a planner after validating `config`.
    pub fn new(config: PlannerConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Planner {
            costs: CostModel::new(config.costs.clone()),
            heuristic: Heuristic::new(config.heuristic, &config.costs, config.heuristic_weight),
            config,
        })
    }

    /// Configuration in use
    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Cost model in use
    pub fn cost_model(&self) -> &CostModel {
        &self.costs
    }

    /// Heuristic in use
    pub fn heuristic(&self) -> &Heuristic {
        &self.heuristic
    }

    /// Checks the preconditions of a search.
    pub fn validate(&self, request: &PlanRequest<'_>) -> Result<(), InvalidInput> {
        let bounds = request.bounds;
        if bounds.is_empty() {
            return Err(InvalidInput::EmptyGrid {
                width: bounds.width,
                height: bounds.height,
            });
        }
        if !bounds.contains(request.start) {
            return Err(InvalidInput::StartOutOfBounds(request.start));
        }
        if !bounds.contains(request.goal) {
            return Err(InvalidInput::GoalOutOfBounds(request.goal));
        }
        if request.obstacles.is_blocked(request.start) {
            return Err(InvalidInput::StartBlocked(request.start));
        }
        if request.obstacles.is_blocked(request.goal) {
            return Err(InvalidInput::GoalBlocked(request.goal));
        }
        Ok(())
    }

    /// Plans a route, reporting progress through the `log` facade.
    pub fn plan(&self, request: &PlanRequest<'_>) -> Result<SearchOutcome, NavigationError> {
        self.plan_with_observer(request, &mut LogObserver)
    }

    /// Plans a route, reporting progress to `observer`.
    pub fn plan_with_observer(
        &self,
        request: &PlanRequest<'_>,
        observer: &mut dyn SearchObserver,
    ) -> Result<SearchOutcome, NavigationError> {
        self.validate(request)?;
        Ok(self.search(request, observer))
    }

    /// Cells from the cell after `start` through `goal`, or an empty list
    /// when there is no route, the budget runs out or the input is invalid.
    pub fn find_path(
        &self,
        start: Position,
        goal: Position,
        obstacles: &ObstacleSet,
        width: i32,
        height: i32,
        has_payload: bool,
    ) -> Vec<Position> {
        let request = PlanRequest {
            start,
            goal,
            obstacles,
            bounds: GridBounds::new(width, height),
            has_payload,
        };
        match self.plan(&request) {
            Ok(outcome) => outcome.into_cells(),
            Err(e) => {
                warn!("Skipping planning cycle: {}", e);
                Vec::new()
            }
        }
    }

    fn search(&self, request: &PlanRequest<'_>, observer: &mut dyn SearchObserver) -> SearchOutcome {
        let goal = request.goal;
        let obstacles = request.obstacles;

        let mut nodes: Vec<SearchNode> = Vec::new();
        let mut open_set = BinaryHeap::new();
        let mut closed: HashSet<StateKey> = HashSet::new();
        let mut best_g: HashMap<StateKey, f64> = HashMap::new();
        let mut counter: u64 = 0;

        let start = SearchNode::start(
            request.start,
            request.has_payload,
            self.heuristic.estimate(request.start, goal),
        );
        if self.config.duplicate_policy == DuplicatePolicy::KeepCheapest {
            best_g.insert(start.key(), start.g);
        }
        observer.node_created(&start);
        open_set.push(OpenEntry {
            f: start.f(),
            counter,
            index: 0,
        });
        counter += 1;
        nodes.push(start);

        let mut expanded = 0;

        while let Some(entry) = open_set.pop() {
            let current = nodes[entry.index];
            let current_key = current.key();

            // Stale duplicate of a state already expanded
            if closed.contains(&current_key) {
                continue;
            }

            if current.position == goal {
                let route = self.reconstruct(&nodes, entry.index, expanded);
                observer.goal_found(&route);
                return SearchOutcome::Found(route);
            }

            if let Some(limit) = self.config.max_expansions {
                if expanded >= limit {
                    observer.search_failed(SearchFailure::BudgetExceeded, expanded);
                    return SearchOutcome::BudgetExceeded { expanded };
                }
            }

            closed.insert(current_key);
            expanded += 1;
            observer.node_expanded(&current);

            for direction in Direction::ALL {
                let next = current.position.step(direction);
                if !request.bounds.contains(next) || obstacles.is_blocked(next) {
                    continue;
                }

                let has_payload = match self.config.payload_policy {
                    PayloadPolicy::AcquireAtGoal => current.has_payload || next == goal,
                    PayloadPolicy::Carried => current.has_payload,
                };
                let edge = self.costs.edge_cost(
                    current.direction,
                    direction,
                    next,
                    current.has_payload,
                    obstacles,
                );
                let node = SearchNode {
                    position: next,
                    direction: Some(direction),
                    has_payload,
                    g: current.g + edge,
                    h: self.heuristic.estimate(next, goal),
                    parent: Some(entry.index),
                };
                let key = node.key();

                if closed.contains(&key) {
                    continue;
                }
                if self.config.duplicate_policy == DuplicatePolicy::KeepCheapest {
                    if let Some(&g) = best_g.get(&key) {
                        if node.g >= g {
                            continue;
                        }
                    }
                    best_g.insert(key, node.g);
                }

                observer.node_created(&node);
                open_set.push(OpenEntry {
                    f: node.f(),
                    counter,
                    index: nodes.len(),
                });
                counter += 1;
                nodes.push(node);
            }
        }

        observer.search_failed(SearchFailure::Unreachable, expanded);
        SearchOutcome::Unreachable { expanded }
    }

    /// Walks predecessor indices from `goal_index` back to the start. The
    /// start cell is left out of the returned cells.
    fn reconstruct(&self, nodes: &[SearchNode], goal_index: usize, expanded: usize) -> Route {
        let goal = nodes[goal_index];
        let mut cells = Vec::new();
        let mut index = goal_index;
        while let Some(parent) = nodes[index].parent {
            cells.push(nodes[index].position);
            index = parent;
        }
        cells.reverse();

        Route {
            cells,
            cost: goal.g,
            expanded,
            has_payload: goal.has_payload,
            heading: goal.direction,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request<'a>(
        start: (i32, i32),
        goal: (i32, i32),
        obstacles: &'a ObstacleSet,
        size: (i32, i32),
    ) -> PlanRequest<'a> {
        PlanRequest {
            start: start.into(),
            goal: goal.into(),
            obstacles,
            bounds: GridBounds::new(size.0, size.1),
            has_payload: false,
        }
    }

    #[test]
    fn single_diagonal_step() {
        let obstacles = ObstacleSet::new();
        let outcome = Planner::default()
            .plan(&request((2, 2), (3, 3), &obstacles, (6, 6)))
            .unwrap();
        let route = outcome.route().unwrap();
        assert_eq!(route.cells, vec![Position::new(3, 3)]);
        assert_eq!(route.cost, 100.0);
        assert_eq!(route.heading, Some(Direction::SOUTH_EAST));
    }

    #[test]
    fn start_equal_to_goal_is_an_empty_route() {
        let obstacles = ObstacleSet::new();
        let outcome = Planner::default()
            .plan(&request((0, 0), (0, 0), &obstacles, (1, 1)))
            .unwrap();
        let route = outcome.route().unwrap();
        assert!(route.cells.is_empty());
        assert_eq!(route.cost, 0.0);
        assert_eq!(route.expanded, 0);
    }

    #[test]
    fn walled_in_start_is_unreachable() {
        let start = Position::new(2, 2);
        let obstacles: ObstacleSet = Direction::ALL.iter().map(|&d| start.step(d)).collect();
        let outcome = Planner::default()
            .plan(&request((2, 2), (4, 4), &obstacles, (5, 5)))
            .unwrap();
        assert_eq!(outcome, SearchOutcome::Unreachable { expanded: 1 });
    }

    #[test]
    fn goal_on_obstacle_is_invalid_input() {
        let obstacles: ObstacleSet = std::iter::once(Position::new(3, 0)).collect();
        let err = Planner::default()
            .plan(&request((0, 0), (3, 0), &obstacles, (5, 5)))
            .unwrap_err();
        assert!(matches!(
            err,
            NavigationError::InvalidInput(InvalidInput::GoalBlocked(p)) if p == Position::new(3, 0)
        ));
    }

    #[test]
    fn out_of_bounds_and_empty_grid_are_invalid_input() {
        let obstacles = ObstacleSet::new();
        let planner = Planner::default();
        assert_eq!(
            planner.validate(&request((5, 0), (0, 0), &obstacles, (5, 5))),
            Err(InvalidInput::StartOutOfBounds(Position::new(5, 0)))
        );
        assert_eq!(
            planner.validate(&request((0, 0), (0, -1), &obstacles, (5, 5))),
            Err(InvalidInput::GoalOutOfBounds(Position::new(0, -1)))
        );
        assert_eq!(
            planner.validate(&request((0, 0), (0, 0), &obstacles, (0, 3))),
            Err(InvalidInput::EmptyGrid { width: 0, height: 3 })
        );
    }

    #[test]
    fn budget_exhaustion_is_reported_distinctly() {
        let config = PlannerConfig {
            max_expansions: Some(3),
            ..PlannerConfig::default()
        };
        let planner = Planner::new(config).unwrap();
        let obstacles = ObstacleSet::new();
        let outcome = planner
            .plan(&request((0, 0), (15, 9), &obstacles, (20, 15)))
            .unwrap();
        assert_eq!(outcome, SearchOutcome::BudgetExceeded { expanded: 3 });
        assert!(outcome.into_cells().is_empty());
    }

    #[test]
    fn payload_is_acquired_on_reaching_the_target() {
        let obstacles = ObstacleSet::new();
        let planner = Planner::default();
        let route = planner
            .plan(&request((0, 0), (2, 2), &obstacles, (4, 4)))
            .unwrap()
            .route()
            .cloned()
            .unwrap();
        assert!(route.has_payload);

        let carried = Planner::new(PlannerConfig {
            payload_policy: PayloadPolicy::Carried,
            ..PlannerConfig::default()
        })
        .unwrap();
        let route = carried
            .plan(&request((0, 0), (2, 2), &obstacles, (4, 4)))
            .unwrap()
            .route()
            .cloned()
            .unwrap();
        assert!(!route.has_payload);
    }

    #[test]
    fn route_cost_matches_repricing() {
        let obstacles: ObstacleSet = [(3, 2), (4, 4), (6, 1)]
            .into_iter()
            .map(Position::from)
            .collect();
        let planner = Planner::default();
        let req = request((0, 3), (8, 2), &obstacles, (10, 6));
        let route = planner.plan(&req).unwrap().route().cloned().unwrap();
        let repriced = planner
            .cost_model()
            .path_cost(req.start, &route.cells, false, &obstacles)
            .unwrap();
        assert_eq!(route.cost, repriced);
    }
}
