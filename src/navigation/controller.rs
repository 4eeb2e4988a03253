// src/navigation/controller.rs
// Drives the robot through a two-leg attack: reach the ball, then carry it
// into the goal. Each leg is a fresh planner call; the controller then
// advances the robot one cell per tick along the planned route.

use std::collections::VecDeque;

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::core::{GridBounds, ObstacleSet, Position};

use super::NavigationError;
use super::planner::{PlanRequest, Planner, SearchOutcome};

/// Pitch layout for one attack.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    /// Columns
    pub width: i32,
    /// Rows
    pub height: i32,
    /// Robot start cell
    pub robot: Position,
    /// Ball cell
    pub ball: Position,
    /// Goal cell
    pub goal: Position,
    /// Opponent cells
    pub obstacles: ObstacleSet,
}

impl Default for FieldConfig {
    /// Kickoff layout: a 20x15 pitch, robot on the left, goal centred on the
    /// right edge, a fixed set of opponents in between.
    fn default() -> Self {
        let obstacles = [
            (6, 6),
            (6, 7),
            (6, 8),
            (9, 2),
            (9, 3),
            (10, 10),
            (11, 5),
            (12, 12),
            (14, 6),
            (15, 2),
            (16, 9),
            (17, 4),
            (17, 11),
        ]
        .into_iter()
        .map(Position::from)
        .collect();
        FieldConfig {
            width: 20,
            height: 15,
            robot: Position::new(2, 7),
            ball: Position::new(13, 3),
            goal: Position::new(19, 7),
            obstacles,
        }
    }
}

impl FieldConfig {
    /// Pitch bounds
    pub fn bounds(&self) -> GridBounds {
        GridBounds::new(self.width, self.height)
    }
}

/// What happened during one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchEvent {
    /// The robot advanced one cell
    Moved(Position),
    /// The robot reached the ball and now carries it
    BallCaptured(Position),
    /// The robot carried the ball into the goal
    GoalScored(Position),
    /// No route to the current target; the robot stays put
    Stalled {
        /// Where the robot stands
        at: Position,
        /// Target it could not reach
        target: Position,
    },
    /// The attack is over; nothing left to do
    Finished,
}

/// Outcome of [`MatchController::run`].
#[derive(Debug, Clone, PartialEq)]
pub struct MatchSummary {
    /// Ticks consumed
    pub ticks: usize,
    /// Whether the goal was scored
    pub scored: bool,
    /// Whether the robot got stuck
    pub stalled: bool,
    /// Cells the robot occupied, start included
    pub trail: Vec<Position>,
}

/// Two-leg attack controller.
pub struct MatchController {
    planner: Planner,
    bounds: GridBounds,
    obstacles: ObstacleSet,
    robot: Position,
    ball: Position,
    goal: Position,
    has_ball: bool,
    scored: bool,
    path: VecDeque<Position>,
}

impl MatchController {
    /// Creates a controller for `field`. Robot, ball and goal must be free
    /// cells on the pitch.
    pub fn new(planner: Planner, field: &FieldConfig) -> Result<Self, NavigationError> {
        let bounds = field.bounds();
        for target in [field.ball, field.goal] {
            planner.validate(&PlanRequest {
                start: field.robot,
                goal: target,
                obstacles: &field.obstacles,
                bounds,
                has_payload: false,
            })?;
        }
        Ok(MatchController {
            planner,
            bounds,
            obstacles: field.obstacles.clone(),
            robot: field.robot,
            ball: field.ball,
            goal: field.goal,
            has_ball: field.robot == field.ball,
            scored: false,
            path: VecDeque::new(),
        })
    }

    /// Current robot cell
    pub fn robot(&self) -> Position {
        self.robot
    }

    /// Whether the robot carries the ball
    pub fn has_ball(&self) -> bool {
        self.has_ball
    }

    /// Whether the goal has been scored
    pub fn scored(&self) -> bool {
        self.scored
    }

    /// Cells still to travel on the current leg
    pub fn pending_path(&self) -> impl Iterator<Item = &Position> + '_ {
        self.path.iter()
    }

    /// The ball until it is captured, then the goal.
    pub fn target(&self) -> Position {
        if self.has_ball { self.goal } else { self.ball }
    }

    /// Advances the attack by one tick, planning a new leg when the current
    /// one is exhausted.
    pub fn step(&mut self) -> Result<MatchEvent, NavigationError> {
        if self.scored {
            return Ok(MatchEvent::Finished);
        }

        if self.path.is_empty() {
            let target = self.target();
            let request = PlanRequest {
                start: self.robot,
                goal: target,
                obstacles: &self.obstacles,
                bounds: self.bounds,
                has_payload: self.has_ball,
            };
            match self.planner.plan(&request)? {
                SearchOutcome::Found(route) => {
                    info!(
                        "Planned leg to {} ({} cells, cost {:.1})",
                        target,
                        route.cells.len(),
                        route.cost
                    );
                    self.path = route.cells.into();
                }
                outcome => {
                    warn!("No route to {} ({:?})", target, outcome);
                    return Ok(MatchEvent::Stalled {
                        at: self.robot,
                        target,
                    });
                }
            }
        }

        if let Some(next) = self.path.pop_front() {
            self.robot = next;
        }

        if !self.has_ball && self.robot == self.ball {
            self.has_ball = true;
            self.path.clear();
            info!("Ball captured at {}", self.robot);
            return Ok(MatchEvent::BallCaptured(self.robot));
        }
        if self.has_ball && self.robot == self.goal {
            self.scored = true;
            info!("Goal scored at {}", self.robot);
            return Ok(MatchEvent::GoalScored(self.robot));
        }
        Ok(MatchEvent::Moved(self.robot))
    }

    /// Steps until the goal is scored, the robot stalls or `max_ticks` run
    /// out.
    pub fn run(&mut self, max_ticks: usize) -> Result<MatchSummary, NavigationError> {
        let mut trail = vec![self.robot];
        let mut stalled = false;
        let mut ticks = 0;
        while ticks < max_ticks {
            let event = self.step()?;
            ticks += 1;
            match event {
                MatchEvent::Moved(cell) | MatchEvent::BallCaptured(cell) => {
                    if trail.last() != Some(&cell) {
                        trail.push(cell);
                    }
                }
                MatchEvent::GoalScored(cell) => {
                    if trail.last() != Some(&cell) {
                        trail.push(cell);
                    }
                    break;
                }
                MatchEvent::Stalled { .. } => {
                    stalled = true;
                    break;
                }
                MatchEvent::Finished => break,
            }
        }
        Ok(MatchSummary {
            ticks,
            scored: self.scored,
            stalled,
            trail,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_field() -> FieldConfig {
        FieldConfig {
            width: 8,
            height: 5,
            robot: Position::new(0, 2),
            ball: Position::new(4, 2),
            goal: Position::new(7, 2),
            obstacles: ObstacleSet::new(),
        }
    }

    #[test]
    fn captures_ball_then_scores() {
        let mut controller = MatchController::new(Planner::default(), &open_field()).unwrap();
        assert_eq!(controller.target(), Position::new(4, 2));
        let summary = controller.run(100).unwrap();
        assert!(summary.scored);
        assert!(!summary.stalled);
        assert!(summary.trail.contains(&Position::new(4, 2)));
        assert_eq!(summary.trail.last(), Some(&Position::new(7, 2)));
        for pair in summary.trail.windows(2) {
            assert_eq!(pair[0].chebyshev(pair[1]), 1);
        }
        assert_eq!(controller.step().unwrap(), MatchEvent::Finished);
    }

    #[test]
    fn robot_starting_on_ball_heads_for_goal() {
        let field = FieldConfig {
            robot: Position::new(4, 2),
            ..open_field()
        };
        let controller = MatchController::new(Planner::default(), &field).unwrap();
        assert!(controller.has_ball());
        assert_eq!(controller.target(), Position::new(7, 2));
    }

    #[test]
    fn fenced_ball_stalls() {
        let ball = Position::new(4, 2);
        let mut field = open_field();
        for dy in -1..=1 {
            for dx in -1..=1 {
                if dx != 0 || dy != 0 {
                    field.obstacles.insert(Position::new(ball.x + dx, ball.y + dy));
                }
            }
        }
        let mut controller = MatchController::new(Planner::default(), &field).unwrap();
        assert_eq!(
            controller.step().unwrap(),
            MatchEvent::Stalled {
                at: Position::new(0, 2),
                target: ball
            }
        );
    }

    #[test]
    fn ball_on_obstacle_is_rejected() {
        let mut field = open_field();
        field.obstacles.insert(field.ball);
        assert!(MatchController::new(Planner::default(), &field).is_err());
    }
}
