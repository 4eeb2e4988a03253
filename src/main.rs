// src/main.rs
// Entry point for the Striker demo: plays one headless attack on a fixed
// pitch, logging every tick.

// - env_logger: Logging backend, level set through RUST_LOG.
// - Striker modules: configuration, planner and match controller.
use log::{error, info};
use std::error::Error;
use striker::navigation::MatchEvent;
use striker::{MatchController, Planner, StrikerConfig, StrikerError};

/// Ticks allowed before the demo gives up.
const MAX_TICKS: usize = 200;

/// Runs the attack described by the optional YAML file given as the first
/// argument, or the built-in kickoff layout.
fn main() -> Result<(), Box<dyn Error>> {
    // Initialize logging for debugging
    env_logger::init();
    info!("Starting Striker...");

    if let Err(e) = run() {
        error!("Striker stopped: {}", e);
        return Err(e.into());
    }
    Ok(())
}

fn run() -> Result<(), StrikerError> {
    let config = match std::env::args().nth(1) {
        Some(path) => {
            info!("Loading configuration from {}", path);
            StrikerConfig::from_yaml_file(&path)?
        }
        None => StrikerConfig::default(),
    };

    let field = &config.field;
    info!(
        "Pitch {}x{}, robot at {}, ball at {}, goal at {}, {} opponents",
        field.width,
        field.height,
        field.robot,
        field.ball,
        field.goal,
        field.obstacles.len()
    );

    let planner = Planner::new(config.planner.clone())?;
    let mut controller = MatchController::new(planner, field)?;

    for tick in 1..=MAX_TICKS {
        match controller.step()? {
            MatchEvent::Moved(cell) => info!("Tick {}: robot at {}", tick, cell),
            MatchEvent::BallCaptured(cell) => info!("Tick {}: ball captured at {}", tick, cell),
            MatchEvent::GoalScored(cell) => {
                info!("Tick {}: GOAL at {}", tick, cell);
                return Ok(());
            }
            MatchEvent::Stalled { at, target } => {
                error!("Tick {}: no route from {} to {}", tick, at, target);
                return Ok(());
            }
            MatchEvent::Finished => return Ok(()),
        }
    }

    info!("Demo ended after {} ticks without a goal", MAX_TICKS);
    Ok(())
}
