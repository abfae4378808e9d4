//! The rolling ball entity.

use rapier2d::prelude::*;

use crate::physics::{BALL_GROUP, PhysicsWorld};

/// The ball rolling on the platform.
#[derive(Debug, Clone, Copy)]
pub struct Ball {
    pub body_handle: RigidBodyHandle,
    pub collider_handle: ColliderHandle,
    pub radius: f32,
    /// Cleared on loss; the display layer swaps the real ball for the fade
    /// marker carried by the loss event.
    pub visible: bool,
}

impl Ball {
    /// Spawns the ball at the given position.
    pub fn spawn(world: &mut PhysicsWorld, x: f32, y: f32, radius: f32) -> Self {
        let body = RigidBodyBuilder::dynamic()
            .translation(Vector::new(x, y))
            .linear_damping(0.03)
            .ccd_enabled(true)
            .build();
        let body_handle = world.add_rigid_body(body);

        let collider = ColliderBuilder::ball(radius)
            .restitution(0.001)
            .friction(0.001)
            .density(0.001)
            .collision_groups(InteractionGroups::new(BALL_GROUP, Group::ALL, InteractionTestMode::And))
            .build();
        let collider_handle = world.add_collider(collider, body_handle);

        Self {
            body_handle,
            collider_handle,
            radius,
            visible: true,
        }
    }

    /// Current position, if the body still exists.
    pub fn position(&self, world: &PhysicsWorld) -> Option<Vector> {
        world
            .get_rigid_body(self.body_handle)
            .map(|body| body.translation())
    }

    /// Current linear velocity, if the body still exists.
    pub fn velocity(&self, world: &PhysicsWorld) -> Option<Vector> {
        world.get_rigid_body(self.body_handle).map(|body| body.linvel())
    }

    /// Teleports the ball and zeroes its motion.
    pub fn reposition(&self, world: &mut PhysicsWorld, position: Vector) {
        if let Some(body) = world.get_rigid_body_mut(self.body_handle) {
            body.set_translation(position, true);
            body.set_linvel(Vector::ZERO, true);
            body.set_angvel(0.0, true);
        }
    }

    /// Freezes the ball in place: no further physics integration.
    pub fn freeze(&mut self, world: &mut PhysicsWorld) {
        self.visible = false;
        if let Some(body) = world.get_rigid_body_mut(self.body_handle) {
            body.set_body_type(RigidBodyType::Fixed, true);
        }
    }
}
