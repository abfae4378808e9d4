//! The tiltable platform bar, rebuilt from the pins every tick.
//!
//! The platform is never mutated in place: each tick the previous body and
//! its two anchor joints are removed and a fresh body is created at the pose
//! derived from the current pin positions. This keeps the bar exactly in sync
//! with the pins with no incremental drift.

use rapier2d::prelude::*;

use crate::geometry::{self, SegmentPose};
use crate::physics::{BALL_GROUP, PLATFORM_GROUP, PhysicsWorld};
use crate::pins::PinPair;

/// Bar thickness.
pub const PLATFORM_THICKNESS: f32 = 10.0;
/// Corner rounding radius; cut inward from the bar's extents.
pub const PLATFORM_CORNER_RADIUS: f32 = 5.0;
/// Near-frictionless surface so the ball rolls freely.
pub const PLATFORM_FRICTION: f32 = 0.001;

/// Live engine resources backing the platform.
#[derive(Debug, Clone, Copy)]
struct PlatformHandles {
    body: RigidBodyHandle,
    left_joint: ImpulseJointHandle,
    right_joint: ImpulseJointHandle,
}

/// The platform bar and its pin linkage.
#[derive(Debug)]
pub struct Platform {
    pose: SegmentPose,
    handles: Option<PlatformHandles>,
}

impl Platform {
    /// Creates an empty platform; call [`Platform::rebuild`] to materialize it.
    pub fn new() -> Self {
        Self {
            pose: SegmentPose {
                length: 0.0,
                angle: 0.0,
                midpoint: Vector::ZERO,
            },
            handles: None,
        }
    }

    /// Pose derived on the last rebuild.
    pub fn pose(&self) -> &SegmentPose {
        &self.pose
    }

    /// Center of the bar.
    pub fn center(&self) -> Vector {
        self.pose.midpoint
    }

    /// Handle of the current platform body, if one has been built.
    pub fn body_handle(&self) -> Option<RigidBodyHandle> {
        self.handles.map(|h| h.body)
    }

    /// Tears down the previous body and joints (if any) and rebuilds the bar
    /// at the pose spanned by the pins.
    ///
    /// Old handles are released before the new ones are installed, so the
    /// stored handles are never dangling. Safe to call on the first tick when
    /// nothing exists yet.
    pub fn rebuild(&mut self, world: &mut PhysicsWorld, pins: &PinPair) {
        if let Some(handles) = self.handles.take() {
            world.remove_impulse_joint(handles.left_joint);
            world.remove_impulse_joint(handles.right_joint);
            world.remove_rigid_body(handles.body);
        }

        let pose = geometry::segment_pose(pins.left.position(), pins.right.position());

        let body = RigidBodyBuilder::fixed()
            .translation(pose.midpoint)
            .rotation(pose.angle)
            .build();
        let body_handle = world.add_rigid_body(body);

        // Corner rounding cuts inward, so the border radius comes off the
        // half extents.
        let half_length = (pose.length / 2.0 - PLATFORM_CORNER_RADIUS).max(0.0);
        let half_thickness = (PLATFORM_THICKNESS / 2.0 - PLATFORM_CORNER_RADIUS).max(0.0);
        let collider = ColliderBuilder::round_cuboid(half_length, half_thickness, PLATFORM_CORNER_RADIUS)
            .friction(PLATFORM_FRICTION)
            .collision_groups(InteractionGroups::new(PLATFORM_GROUP, BALL_GROUP, InteractionTestMode::And))
            .build();
        world.add_collider(collider, body_handle);

        // Anchor each end of the bar to its pin. Both bodies are fixed, so
        // the joints carry the linkage rather than forces; the pose above is
        // authoritative.
        let half = pose.length / 2.0;
        let left_joint = world.add_impulse_joint(
            body_handle,
            pins.left.body_handle,
            RevoluteJointBuilder::new()
                .local_anchor1(Vector::new(-half, 0.0))
                .local_anchor2(Vector::ZERO),
        );
        let right_joint = world.add_impulse_joint(
            body_handle,
            pins.right.body_handle,
            RevoluteJointBuilder::new()
                .local_anchor1(Vector::new(half, 0.0))
                .local_anchor2(Vector::ZERO),
        );

        self.pose = pose;
        self.handles = Some(PlatformHandles {
            body: body_handle,
            left_joint,
            right_joint,
        });
    }
}

impl Default for Platform {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BoardConfig;

    fn setup() -> (PhysicsWorld, PinPair, Platform) {
        let mut world = PhysicsWorld::new();
        let pins = PinPair::new(&mut world, &BoardConfig::default_classic());
        (world, pins, Platform::new())
    }

    #[test]
    fn test_rebuild_level_pose() {
        let (mut world, pins, mut platform) = setup();

        platform.rebuild(&mut world, &pins);

        let pose = platform.pose();
        assert_eq!(pose.length, 400.0);
        assert_eq!(pose.angle, 0.0);
        assert_eq!(pose.midpoint, Vector::new(400.0, 300.0));

        let body = world.get_rigid_body(platform.body_handle().unwrap()).unwrap();
        assert_eq!(body.translation().x, 400.0);
        assert_eq!(body.translation().y, 300.0);
        assert!(body.is_fixed());
    }

    #[test]
    fn test_rebuild_replaces_previous_body() {
        let (mut world, mut pins, mut platform) = setup();

        platform.rebuild(&mut world, &pins);
        let first_body = platform.body_handle().unwrap();

        // Move a pin and rebuild; the old body must be gone.
        let input = crate::input::InputState {
            left_up: true,
            ..Default::default()
        };
        pins.apply_input(&mut world, &input);
        platform.rebuild(&mut world, &pins);

        assert!(world.get_rigid_body(first_body).is_none());
        assert!(world.get_rigid_body(platform.body_handle().unwrap()).is_some());

        // Exactly one platform body, two pin bodies, two joints.
        assert_eq!(world.rigid_body_set.len(), 3);
        assert_eq!(world.impulse_joint_set.len(), 2);
    }

    #[test]
    fn test_rebuild_tracks_tilt() {
        let (mut world, mut pins, mut platform) = setup();

        let input = crate::input::InputState {
            left_up: true,
            right_down: true,
            ..Default::default()
        };
        for _ in 0..50 {
            pins.apply_input(&mut world, &input);
        }
        platform.rebuild(&mut world, &pins);

        let pose = platform.pose();
        assert!((pose.angle - pins.angle_rad()).abs() < 1e-6);
        assert!(pose.length > 400.0);
        assert_eq!(pose.midpoint.x, 400.0);

        let body = world.get_rigid_body(platform.body_handle().unwrap()).unwrap();
        assert!((body.rotation().angle() - pose.angle).abs() < 1e-5);
    }

    #[test]
    fn test_joint_anchors_at_bar_ends() {
        let (mut world, pins, mut platform) = setup();
        platform.rebuild(&mut world, &pins);

        let half = platform.pose().length / 2.0;
        let anchors: Vec<f32> = world
            .impulse_joint_set
            .iter()
            .map(|(_, joint)| joint.data.local_anchor1().x)
            .collect();

        assert_eq!(anchors.len(), 2);
        assert!(anchors.contains(&-half));
        assert!(anchors.contains(&half));
    }
}
