//! Static hazard zones and the overlap-area loss rule.
//!
//! A hazard ends the round when more than `loss_fraction` of the ball's area
//! sits inside it. Overlap area is exact circle-circle intersection, which
//! is stricter than plain contact: the ball can graze a hazard's rim without
//! losing.

use rapier2d::prelude::*;
use serde::{Deserialize, Serialize};
use std::f32::consts::PI;

use crate::ball::Ball;
use crate::config::BoardConfig;
use crate::geometry;
use crate::physics::{BALL_GROUP, HAZARD_GROUP, PhysicsWorld};

/// A fixed circular hazard zone.
#[derive(Debug, Clone, Copy)]
pub struct Hazard {
    pub center: Vector,
    pub radius: f32,
    pub collider_handle: ColliderHandle,
}

/// Emitted exactly once per round, the tick the ball is lost. Carries what
/// the display layer needs for the fade cue.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LossEvent {
    /// Index of the hazard that swallowed the ball.
    pub hazard: usize,
    /// Center of that hazard.
    pub hazard_center: [f32; 2],
    /// Where the ball was when the loss fired.
    pub ball_position: [f32; 2],
}

/// The immutable hazard set for one board.
#[derive(Debug)]
pub struct HazardField {
    hazards: Vec<Hazard>,
    loss_fraction: f32,
}

impl HazardField {
    /// Creates the hazard sensors described by the config.
    pub fn new(world: &mut PhysicsWorld, config: &BoardConfig) -> Self {
        let hazards = config
            .hazards
            .iter()
            .map(|&[x, y]| {
                let collider = ColliderBuilder::ball(config.hazard_radius)
                    .translation(Vector::new(x, y))
                    .sensor(true)
                    .collision_groups(InteractionGroups::new(HAZARD_GROUP, BALL_GROUP, InteractionTestMode::And))
                    .build();
                let collider_handle = world.add_static_collider(collider);
                Hazard {
                    center: Vector::new(x, y),
                    radius: config.hazard_radius,
                    collider_handle,
                }
            })
            .collect();

        Self {
            hazards,
            loss_fraction: config.loss_fraction,
        }
    }

    /// All hazards, in check order.
    pub fn hazards(&self) -> &[Hazard] {
        &self.hazards
    }

    /// Checks the ball against every hazard in fixed order; the first hazard
    /// past the threshold wins. Returns `None` while the ball is safe.
    pub fn check(&self, world: &PhysicsWorld, ball: &Ball) -> Option<LossEvent> {
        let ball_pos = ball.position(world)?;
        let ball_area = PI * ball.radius * ball.radius;

        for (index, hazard) in self.hazards.iter().enumerate() {
            let d = (ball_pos - hazard.center).length();
            if d >= hazard.radius + ball.radius {
                continue;
            }

            let overlap = geometry::circle_overlap_area(d, ball.radius, hazard.radius);
            if overlap / ball_area > self.loss_fraction {
                return Some(LossEvent {
                    hazard: index,
                    hazard_center: [hazard.center.x, hazard.center.y],
                    ball_position: [ball_pos.x, ball_pos.y],
                });
            }
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (PhysicsWorld, HazardField, BoardConfig) {
        let config = BoardConfig::default_classic();
        let mut world = PhysicsWorld::new();
        let field = HazardField::new(&mut world, &config);
        (world, field, config)
    }

    fn ball_at(world: &mut PhysicsWorld, x: f32, y: f32, radius: f32) -> Ball {
        Ball::spawn(world, x, y, radius)
    }

    #[test]
    fn test_field_matches_config() {
        let (_, field, config) = setup();
        assert_eq!(field.hazards().len(), 25);
        assert_eq!(field.hazards()[0].radius, config.hazard_radius);
    }

    #[test]
    fn test_ball_centered_on_hazard_loses() {
        let (mut world, field, config) = setup();
        let [x, y] = config.hazards[0];
        // Equal radius at zero distance: overlap fraction is exactly 1.0.
        let ball = ball_at(&mut world, x, y, config.hazard_radius);

        let event = field.check(&world, &ball).expect("loss must fire");
        assert_eq!(event.hazard, 0);
        assert_eq!(event.hazard_center, [x, y]);
        assert_eq!(event.ball_position, [x, y]);
    }

    #[test]
    fn test_ball_out_of_reach_is_safe() {
        let (mut world, field, config) = setup();
        let [x, y] = config.hazards[0];
        let d = config.ball_radius + config.hazard_radius + 1.0;
        let ball = ball_at(&mut world, x + d, y, config.ball_radius);

        assert!(field.check(&world, &ball).is_none());
    }

    #[test]
    fn test_grazing_contact_is_safe() {
        let (mut world, field, config) = setup();
        let [x, y] = config.hazards[0];
        // Rim contact: circles overlap slightly, but well under 80% of the
        // ball's area.
        let d = config.hazard_radius + config.ball_radius * 0.5;
        let ball = ball_at(&mut world, x + d, y, config.ball_radius);

        assert!(field.check(&world, &ball).is_none());
    }

    #[test]
    fn test_first_hazard_in_order_wins() {
        let mut config = BoardConfig::default_classic();
        // Two coincident hazards: index 3 and 4 both fully cover the ball.
        config.hazards[4] = config.hazards[3];
        let mut world = PhysicsWorld::new();
        let field = HazardField::new(&mut world, &config);

        let [x, y] = config.hazards[3];
        let ball = ball_at(&mut world, x, y, config.ball_radius);

        let event = field.check(&world, &ball).unwrap();
        assert_eq!(event.hazard, 3);
    }
}
