//! Tiltboard headless driver.
//!
//! Runs the core simulation without a renderer: loads a board config (JSON
//! path as the first argument, or the built-in classic board), drives the
//! game with a scripted input sequence at the fixed timestep, and logs the
//! readouts and the loss event. Useful for soak-testing the rules and as a
//! reference for wiring a real display layer.

use std::fs;

use anyhow::Context;
use tiltboard_core::{BoardConfig, GamePhase, GameWorld, InputState};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Frames to simulate (10 seconds at 60Hz).
const RUN_FRAMES: u32 = 600;

/// Input script: rock the board left, level out, then rock it right.
fn scripted_input(frame: u32) -> InputState {
    let mut input = InputState::IDLE;
    match frame {
        0..=120 => input.left_up = true,
        121..=240 => input.left_down = true,
        241..=420 => {
            input.right_up = true;
            input.left_down = true;
        }
        _ => input.right_down = true,
    }
    input
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => {
            let json = fs::read_to_string(&path)
                .with_context(|| format!("reading board config {path}"))?;
            BoardConfig::from_json(&json).with_context(|| format!("parsing board config {path}"))?
        }
        None => BoardConfig::default_classic(),
    };

    let mut game = GameWorld::new(config).context("building game world")?;

    for frame in 0..RUN_FRAMES {
        let input = scripted_input(frame);
        if let Some(loss) = game.tick(&input) {
            info!(
                hazard = loss.hazard,
                ball_x = loss.ball_position[0],
                ball_y = loss.ball_position[1],
                "round over"
            );
        }

        if frame % 60 == 0 {
            let readout = game.readout();
            info!(
                frame,
                angle = readout.angle_deg,
                left = readout.left_pin_y,
                right = readout.right_pin_y,
                "readout"
            );
        }
    }

    if game.phase() == GamePhase::Playing {
        info!(frames = game.frame(), "ball survived the script");
    }

    Ok(())
}
