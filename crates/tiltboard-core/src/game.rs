//! Game state machine and the per-tick pipeline.

use rapier2d::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::ball::Ball;
use crate::config::{BoardConfig, ConfigError};
use crate::hazard::{HazardField, LossEvent};
use crate::input::InputState;
use crate::physics::{BALL_GROUP, PhysicsWorld, WALL_GROUP};
use crate::pins::PinPair;
use crate::platform::Platform;

/// Wall dimensions: one at each pin's x position, spanning the board height.
const WALL_HALF_WIDTH: f32 = 10.0;
const WALL_HALF_HEIGHT: f32 = 300.0;

/// Current phase of the round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active play.
    Playing,
    /// The ball was lost; waiting for the restart signal.
    GameOver,
}

/// Per-tick values the display layer renders as readouts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Readout {
    pub angle_deg: f32,
    pub left_pin_y: f32,
    pub right_pin_y: f32,
    pub game_over: bool,
}

/// The whole game: physics world, entities and the phase machine.
///
/// The host owns timing and input; per frame it calls [`GameWorld::tick`]
/// with that frame's input snapshot. Tick order is fixed: pin movement,
/// platform rebuild, physics step, hazard check, ball recovery, restart.
#[derive(Debug)]
pub struct GameWorld {
    config: BoardConfig,
    physics: PhysicsWorld,
    pins: PinPair,
    platform: Platform,
    ball: Ball,
    hazards: HazardField,
    phase: GamePhase,
    loss: Option<LossEvent>,
}

impl GameWorld {
    /// Validates the config and builds the initial scene.
    pub fn new(config: BoardConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut physics = PhysicsWorld::new();
        let (pins, platform, ball, hazards) = Self::build_scene(&mut physics, &config);

        info!(
            hazards = config.hazards.len(),
            loss_fraction = config.loss_fraction,
            "round started"
        );

        Ok(Self {
            config,
            physics,
            pins,
            platform,
            ball,
            hazards,
            phase: GamePhase::Playing,
            loss: None,
        })
    }

    /// Populates an empty physics world with every entity of a fresh round.
    fn build_scene(
        physics: &mut PhysicsWorld,
        config: &BoardConfig,
    ) -> (PinPair, Platform, Ball, HazardField) {
        // Side walls at the pins' x positions keep the ball on the board.
        for &x in &config.pin_x {
            let wall = ColliderBuilder::cuboid(WALL_HALF_WIDTH, WALL_HALF_HEIGHT)
                .translation(Vector::new(x, config.pin_start_y))
                .collision_groups(InteractionGroups::new(WALL_GROUP, BALL_GROUP, InteractionTestMode::And))
                .build();
            physics.add_static_collider(wall);
        }

        let pins = PinPair::new(physics, config);
        let mut platform = Platform::new();
        platform.rebuild(physics, &pins);

        let spawn_y = platform.center().y - config.spawn_clearance;
        let ball = Ball::spawn(physics, config.ball_spawn_x, spawn_y, config.ball_radius);

        let hazards = HazardField::new(physics, config);

        (pins, platform, ball, hazards)
    }

    /// Advances the game by one frame.
    ///
    /// Returns the loss event on the single tick the ball is lost, `None`
    /// otherwise.
    pub fn tick(&mut self, input: &InputState) -> Option<LossEvent> {
        if self.phase == GamePhase::Playing {
            self.pins.apply_input(&mut self.physics, input);
        }

        self.platform.rebuild(&mut self.physics, &self.pins);
        self.physics.step();

        let mut fired = None;
        if self.phase == GamePhase::Playing {
            if let Some(event) = self.hazards.check(&self.physics, &self.ball) {
                info!(
                    hazard = event.hazard,
                    ball_x = event.ball_position[0],
                    ball_y = event.ball_position[1],
                    "ball lost"
                );
                self.ball.freeze(&mut self.physics);
                self.phase = GamePhase::GameOver;
                self.loss = Some(event);
                fired = Some(event);
            }
        }

        // Recovery runs in every phase: a ball that rolled off an end of the
        // platform comes back above its center.
        self.recover_ball();

        if self.phase == GamePhase::GameOver && input.restart {
            self.reset();
        }

        fired
    }

    fn recover_ball(&mut self) {
        let Some(position) = self.ball.position(&self.physics) else {
            return;
        };
        if position.y > self.config.kill_y {
            let target = self.platform.center() - Vector::new(0.0, self.config.spawn_clearance);
            debug!(from_y = position.y, to_x = target.x, to_y = target.y, "ball recovered");
            self.ball.reposition(&mut self.physics, target);
        }
    }

    /// Rebuilds the whole scene from the config: pins back to the start
    /// height, a fresh ball above the platform, phase back to `Playing`.
    pub fn reset(&mut self) {
        info!("round restarted");
        self.physics.reset();
        let (pins, platform, ball, hazards) = Self::build_scene(&mut self.physics, &self.config);
        self.pins = pins;
        self.platform = platform;
        self.ball = ball;
        self.hazards = hazards;
        self.phase = GamePhase::Playing;
        self.loss = None;
    }

    /// Current phase.
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// The loss event of the current round, if it has ended.
    pub fn loss(&self) -> Option<&LossEvent> {
        self.loss.as_ref()
    }

    /// Platform angle in degrees, for the on-screen readout.
    pub fn angle_degrees(&self) -> f32 {
        self.pins.angle_deg()
    }

    /// Pin heights as `(left_y, right_y)`.
    pub fn pin_heights(&self) -> (f32, f32) {
        self.pins.heights()
    }

    /// Ball position, if the ball body exists.
    pub fn ball_position(&self) -> Option<Vector> {
        self.ball.position(&self.physics)
    }

    /// Whether the display layer should draw the physics ball.
    pub fn ball_visible(&self) -> bool {
        self.ball.visible
    }

    /// Everything the display layer shows per tick.
    pub fn readout(&self) -> Readout {
        let (left_pin_y, right_pin_y) = self.pins.heights();
        Readout {
            angle_deg: self.pins.angle_deg(),
            left_pin_y,
            right_pin_y,
            game_over: self.phase == GamePhase::GameOver,
        }
    }

    /// Frames simulated since the current round started.
    pub fn frame(&self) -> u64 {
        self.physics.current_frame()
    }

    /// The board layout this world was built from.
    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    #[cfg(test)]
    pub(crate) fn physics_mut(&mut self) -> &mut PhysicsWorld {
        &mut self.physics
    }

    #[cfg(test)]
    pub(crate) fn ball(&self) -> &Ball {
        &self.ball
    }
}
