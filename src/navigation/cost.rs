// src/navigation/cost.rs
// Edge weights for the planner: movement, rotation and opponent proximity.

use serde::{Deserialize, Serialize};

use crate::core::{Direction, MoveKind, ObstacleSet, Position, TurnKind};

/// Tunable cost constants. Defaults reproduce the competition rules: straight
/// steps are dearer than diagonal ones, and carrying the ball makes both
/// moving and turning more expensive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CostConfig {
    /// Cost of a straight step
    pub straight: f64,
    /// Cost of a diagonal step
    pub diagonal: f64,
    /// Movement multiplier while carrying the ball
    pub payload_move_factor: f64,
    /// Turning from a straight heading into a diagonal one
    pub turn_straight_to_diagonal: f64,
    /// Turning from a diagonal heading into a straight one
    pub turn_diagonal_to_straight: f64,
    /// Right-angle turn or reversal
    pub turn_brusque: f64,
    /// Rotation multiplier while carrying the ball
    pub payload_turn_factor: f64,
    /// Chebyshev radius (in cells) over which opponents are penalised
    pub proximity_radius: f64,
    /// Numerator of the `weight / (distance + epsilon)` proximity penalty
    pub proximity_weight: f64,
    /// Keeps the proximity penalty finite at distance zero
    pub proximity_epsilon: f64,
}

impl Default for CostConfig {
    fn default() -> Self {
        CostConfig {
            straight: 300.0,
            diagonal: 100.0,
            payload_move_factor: 1.5,
            turn_straight_to_diagonal: 100.0,
            turn_diagonal_to_straight: 50.0,
            turn_brusque: 200.0,
            payload_turn_factor: 2.0,
            proximity_radius: 1.5,
            proximity_weight: 300.0,
            proximity_epsilon: 0.1,
        }
    }
}

impl CostConfig {
    /// Checks that every constant is usable. Returns a description of the
    /// first offending field.
    pub fn validate(&self) -> Result<(), String> {
        let positive = [
            ("straight", self.straight),
            ("diagonal", self.diagonal),
            ("proximity_epsilon", self.proximity_epsilon),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(format!("{} must be finite and positive, got {}", name, value));
            }
        }
        let non_negative = [
            ("turn_straight_to_diagonal", self.turn_straight_to_diagonal),
            ("turn_diagonal_to_straight", self.turn_diagonal_to_straight),
            ("turn_brusque", self.turn_brusque),
            ("proximity_radius", self.proximity_radius),
            ("proximity_weight", self.proximity_weight),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(format!("{} must be finite and non-negative, got {}", name, value));
            }
        }
        let factors = [
            ("payload_move_factor", self.payload_move_factor),
            ("payload_turn_factor", self.payload_turn_factor),
        ];
        for (name, value) in factors {
            if !value.is_finite() || value < 1.0 {
                return Err(format!("{} must be at least 1, got {}", name, value));
            }
        }
        Ok(())
    }
}

/// Prices individual moves. Pure functions of their arguments.
#[derive(Debug, Clone, Default)]
pub struct CostModel {
    config: CostConfig,
}

impl CostModel {
    /// Creates a model over the given constants.
    pub fn new(config: CostConfig) -> Self {
        CostModel { config }
    }

    /// The constants in use.
    pub fn config(&self) -> &CostConfig {
        &self.config
    }

    /// Base step cost for `direction`, scaled when carrying the ball.
    pub fn movement_cost(&self, direction: Direction, has_payload: bool) -> f64 {
        let base = match direction.kind() {
            MoveKind::Straight => self.config.straight,
            MoveKind::Diagonal => self.config.diagonal,
        };
        if has_payload {
            base * self.config.payload_move_factor
        } else {
            base
        }
    }

    /// Cost of turning from `previous` (None at the start) into `next`.
    pub fn rotation_cost(
        &self,
        previous: Option<Direction>,
        next: Direction,
        has_payload: bool,
    ) -> f64 {
        let base = match next.turn_from(previous) {
            TurnKind::None => return 0.0,
            TurnKind::StraightToDiagonal => self.config.turn_straight_to_diagonal,
            TurnKind::DiagonalToStraight => self.config.turn_diagonal_to_straight,
            TurnKind::Brusque => self.config.turn_brusque,
        };
        if has_payload {
            base * self.config.payload_turn_factor
        } else {
            base
        }
    }

    /// Sum of `weight / (distance + epsilon)` over every obstacle within the
    /// proximity radius of `position`, added in row-major `(y, x)` order so
    /// the sum is reproducible to the last bit. Small radii scan the
    /// surrounding square; once that square holds more cells than there are
    /// obstacles, the obstacles are visited instead.
    pub fn obstacle_penalty(&self, position: Position, obstacles: &ObstacleSet) -> f64 {
        let radius = self.config.proximity_radius;
        if obstacles.is_empty() || radius < 0.0 {
            return 0.0;
        }
        let side = 2.0 * radius.floor() + 1.0;
        if side * side > obstacles.len() as f64 {
            let mut nearby: Vec<(i64, Position)> = obstacles
                .iter()
                .filter_map(|&cell| {
                    let distance = chebyshev_wide(position, cell);
                    (distance as f64 <= radius).then_some((distance, cell))
                })
                .collect();
            nearby.sort_unstable_by_key(|&(_, cell)| (cell.y, cell.x));
            return nearby
                .into_iter()
                .fold(0.0, |penalty, (distance, _)| penalty + self.proximity_term(distance));
        }

        let reach = radius.floor() as i64;
        let mut penalty = 0.0;
        for dy in -reach..=reach {
            for dx in -reach..=reach {
                let (Ok(x), Ok(y)) = (
                    i32::try_from(position.x as i64 + dx),
                    i32::try_from(position.y as i64 + dy),
                ) else {
                    continue;
                };
                let cell = Position::new(x, y);
                if !obstacles.is_blocked(cell) {
                    continue;
                }
                let distance = chebyshev_wide(position, cell);
                if distance as f64 <= radius {
                    penalty += self.proximity_term(distance);
                }
            }
        }
        penalty
    }

    fn proximity_term(&self, distance: i64) -> f64 {
        self.config.proximity_weight / (distance as f64 + self.config.proximity_epsilon)
    }

    /// Weight of the edge entering `to` along `direction`, coming from a
    /// node whose heading was `previous`.
    pub fn edge_cost(
        &self,
        previous: Option<Direction>,
        direction: Direction,
        to: Position,
        has_payload: bool,
        obstacles: &ObstacleSet,
    ) -> f64 {
        self.movement_cost(direction, has_payload)
            + self.rotation_cost(previous, direction, has_payload)
            + self.obstacle_penalty(to, obstacles)
    }

    /// Prices an arbitrary route the way the planner would. `cells` excludes
    /// `start`. The payload flag is held fixed for the whole route. Returns
    /// `None` if two consecutive cells are not 8-adjacent.
    pub fn path_cost(
        &self,
        start: Position,
        cells: &[Position],
        has_payload: bool,
        obstacles: &ObstacleSet,
    ) -> Option<f64> {
        let mut total = 0.0;
        let mut heading = None;
        let mut from = start;
        for &to in cells {
            let direction = from.direction_to(to)?;
            total += self.edge_cost(heading, direction, to, has_payload, obstacles);
            heading = Some(direction);
            from = to;
        }
        Some(total)
    }
}

/// Chebyshev distance without i32 overflow for cells far apart.
fn chebyshev_wide(a: Position, b: Position) -> i64 {
    let dx = (a.x as i64 - b.x as i64).abs();
    let dy = (a.y as i64 - b.y as i64).abs();
    dx.max(dy)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model() -> CostModel {
        CostModel::default()
    }

    #[test]
    fn straight_steps_cost_more_than_diagonal() {
        let m = model();
        assert_eq!(m.movement_cost(Direction::EAST, false), 300.0);
        assert_eq!(m.movement_cost(Direction::NORTH_EAST, false), 100.0);
        assert_eq!(m.movement_cost(Direction::EAST, true), 450.0);
        assert_eq!(m.movement_cost(Direction::SOUTH_WEST, true), 150.0);
    }

    #[test]
    fn rotation_tiers_and_payload_doubling() {
        let m = model();
        assert_eq!(m.rotation_cost(None, Direction::NORTH, true), 0.0);
        assert_eq!(m.rotation_cost(Some(Direction::NORTH), Direction::NORTH, true), 0.0);
        assert_eq!(m.rotation_cost(Some(Direction::EAST), Direction::NORTH_EAST, false), 100.0);
        assert_eq!(m.rotation_cost(Some(Direction::NORTH_EAST), Direction::EAST, false), 50.0);
        assert_eq!(m.rotation_cost(Some(Direction::EAST), Direction::SOUTH, false), 200.0);
        assert_eq!(m.rotation_cost(Some(Direction::EAST), Direction::SOUTH, true), 400.0);
        assert_eq!(m.rotation_cost(Some(Direction::NORTH_EAST), Direction::EAST, true), 100.0);
    }

    #[test]
    fn proximity_penalty_sums_nearby_obstacles() {
        let m = model();
        let obstacles: ObstacleSet = [(1, 0), (2, 2), (5, 5)]
            .into_iter()
            .map(Position::from)
            .collect();
        // (1, 1) touches (1, 0) and (2, 2); (5, 5) is out of range
        let expected = 300.0 / 1.1 + 300.0 / 1.1;
        let got = m.obstacle_penalty(Position::new(1, 1), &obstacles);
        assert!((got - expected).abs() < 1e-9, "got {}", got);
        assert_eq!(m.obstacle_penalty(Position::new(8, 8), &obstacles), 0.0);
    }

    #[test]
    fn huge_radius_visits_obstacles_instead_of_the_square() {
        let m = CostModel::new(CostConfig {
            proximity_radius: 3.0e9,
            ..CostConfig::default()
        });
        assert_eq!(m.config().proximity_radius, 3.0e9);
        let obstacles: ObstacleSet = [(0, 0), (9, 4), (2, 7)]
            .into_iter()
            .map(Position::from)
            .collect();
        // Row-major order: (0, 0) at 3, (9, 4) at 6, (2, 7) at 4
        let expected = 300.0 / 3.1 + 300.0 / 6.1 + 300.0 / 4.1;
        assert_eq!(m.obstacle_penalty(Position::new(3, 3), &obstacles), expected);
        let far = m.obstacle_penalty(Position::new(i32::MAX, i32::MIN), &obstacles);
        assert!(far > 0.0 && far.is_finite());
    }

    #[test]
    fn square_scan_and_obstacle_walk_agree() {
        let layout = [
            (1, 0),
            (4, 0),
            (1, 1),
            (3, 2),
            (5, 2),
            (0, 3),
            (2, 3),
            (2, 4),
            (4, 4),
            (1, 5),
        ];
        let obstacles: ObstacleSet = layout.into_iter().map(Position::from).collect();
        // Ten obstacles: radii up to 1.5 scan the square, larger ones walk
        // the set
        for radius in [0.9, 1.5, 2.5, 10.0] {
            let m = CostModel::new(CostConfig {
                proximity_radius: radius,
                ..CostConfig::default()
            });
            for y in 0..6 {
                for x in 0..6 {
                    let cell = Position::new(x, y);
                    let mut expected = 0.0;
                    for other in layout {
                        let d = cell.chebyshev(Position::from(other)) as f64;
                        if d <= radius {
                            expected += 300.0 / (d + 0.1);
                        }
                    }
                    assert_eq!(m.obstacle_penalty(cell, &obstacles), expected, "{}", cell);
                }
            }
        }
    }

    #[test]
    fn penalty_at_distance_zero_stays_finite() {
        let m = model();
        let obstacles: ObstacleSet = std::iter::once(Position::new(0, 0)).collect();
        let got = m.obstacle_penalty(Position::new(0, 0), &obstacles);
        assert!((got - 3000.0).abs() < 1e-9);
    }

    #[test]
    fn path_cost_matches_edge_sum() {
        let m = model();
        let obstacles = ObstacleSet::new();
        let cells = [Position::new(1, 0), Position::new(2, 1), Position::new(3, 1)];
        // E: 300, E -> SE: 100 turn + 100 move, SE -> E: 50 turn + 300 move
        let cost = m.path_cost(Position::new(0, 0), &cells, false, &obstacles);
        assert_eq!(cost, Some(300.0 + 200.0 + 350.0));
        assert_eq!(
            m.path_cost(Position::new(0, 0), &[Position::new(2, 0)], false, &obstacles),
            None
        );
    }

    #[test]
    fn default_config_is_valid_and_bad_values_are_named() {
        assert!(CostConfig::default().validate().is_ok());
        let bad = CostConfig {
            payload_move_factor: 0.5,
            ..CostConfig::default()
        };
        let err = bad.validate().unwrap_err();
        assert!(err.contains("payload_move_factor"));
    }
}
