//! Tiltboard Core Library
//!
//! Game logic for a two-pin balance game: the player tilts a platform bar by
//! moving its two anchor pins vertically, keeping a ball out of static
//! circular hazard zones. Physics runs on `Rapier2D` at a fixed 60Hz
//! timestep with deterministic behavior; rendering and input polling belong
//! to the host, which drives [`GameWorld::tick`] once per frame.

#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::module_name_repetitions)]

pub mod ball;
pub mod config;
pub mod game;
pub mod geometry;
pub mod hazard;
pub mod input;
pub mod physics;
pub mod pins;
pub mod platform;

pub use ball::Ball;
pub use config::{BoardConfig, ConfigError};
pub use game::{GamePhase, GameWorld, Readout};
pub use geometry::{SegmentPose, circle_overlap_area, segment_pose};
pub use hazard::{Hazard, HazardField, LossEvent};
pub use input::InputState;
pub use physics::{PHYSICS_DT, PhysicsWorld, default_gravity};
pub use pins::{Pin, PinPair, PinSide};
pub use platform::{PLATFORM_THICKNESS, Platform};
