//! The two player-controlled pins anchoring the platform ends.

use rapier2d::prelude::*;

use crate::config::BoardConfig;
use crate::input::InputState;
use crate::physics::PhysicsWorld;

/// Which end of the platform a pin anchors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinSide {
    Left,
    Right,
}

/// A single pin: fixed x, player-movable y, backed by a fixed body that the
/// platform joints anchor to. Pins carry no collider.
#[derive(Debug, Clone, Copy)]
pub struct Pin {
    pub side: PinSide,
    pub x: f32,
    pub y: f32,
    pub body_handle: RigidBodyHandle,
}

impl Pin {
    fn spawn(world: &mut PhysicsWorld, side: PinSide, x: f32, y: f32) -> Self {
        let body = RigidBodyBuilder::fixed()
            .translation(Vector::new(x, y))
            .build();
        let body_handle = world.add_rigid_body(body);
        Self {
            side,
            x,
            y,
            body_handle,
        }
    }

    pub fn position(&self) -> Vector {
        Vector::new(self.x, self.y)
    }

    fn shift(&mut self, world: &mut PhysicsWorld, dy: f32) {
        self.y += dy;
        if let Some(body) = world.get_rigid_body_mut(self.body_handle) {
            body.set_translation(Vector::new(self.x, self.y), true);
        }
    }
}

/// The left/right pin pair and its movement policy.
#[derive(Debug)]
pub struct PinPair {
    pub left: Pin,
    pub right: Pin,
    min_y: f32,
    max_y: f32,
    step: f32,
    max_tilt_deg: f32,
}

impl PinPair {
    /// Creates both pin bodies at the configured start height.
    pub fn new(world: &mut PhysicsWorld, config: &BoardConfig) -> Self {
        let [left_x, right_x] = config.pin_x;
        let y = config.pin_start_y;
        Self {
            left: Pin::spawn(world, PinSide::Left, left_x, y),
            right: Pin::spawn(world, PinSide::Right, right_x, y),
            min_y: config.pin_y_range[0],
            max_y: config.pin_y_range[1],
            step: config.pin_step,
            max_tilt_deg: config.max_tilt_deg,
        }
    }

    /// Angle of the left→right segment in radians.
    pub fn angle_rad(&self) -> f32 {
        (self.right.y - self.left.y).atan2(self.right.x - self.left.x)
    }

    /// Angle of the left→right segment in degrees.
    pub fn angle_deg(&self) -> f32 {
        self.angle_rad().to_degrees()
    }

    /// Current heights as `(left_y, right_y)`.
    pub fn heights(&self) -> (f32, f32) {
        (self.left.y, self.right.y)
    }

    /// Applies one tick of movement input.
    ///
    /// All four decisions share the pre-movement angle, so the two pins'
    /// moves are symmetric and order-independent within the tick. A pin only
    /// moves while it stays inside the vertical band, and never in a
    /// direction that would push the tilt further past the limit; correction
    /// back toward level is always allowed.
    pub fn apply_input(&mut self, world: &mut PhysicsWorld, input: &InputState) {
        let angle = self.angle_deg();
        let too_left_angled = angle <= -self.max_tilt_deg;
        let too_right_angled = angle >= self.max_tilt_deg;

        if input.left_up && self.left.y > self.min_y && !too_right_angled {
            self.left.shift(world, -self.step);
        }
        if input.left_down && self.left.y < self.max_y && !too_left_angled {
            self.left.shift(world, self.step);
        }
        if input.right_up && self.right.y > self.min_y && !too_left_angled {
            self.right.shift(world, -self.step);
        }
        if input.right_down && self.right.y < self.max_y && !too_right_angled {
            self.right.shift(world, self.step);
        }
    }
}
