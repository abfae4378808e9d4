//! Pure 2D helpers: segment poses and circle-circle overlap area.

use rapier2d::prelude::Vector;
use std::f32::consts::PI;

/// Pose of the segment spanning two points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentPose {
    /// Euclidean distance between the endpoints.
    pub length: f32,
    /// Angle of the a→b direction, in radians.
    pub angle: f32,
    /// Midpoint of the segment.
    pub midpoint: Vector,
}

/// Computes length, angle and midpoint of the segment from `a` to `b`.
pub fn segment_pose(a: Vector, b: Vector) -> SegmentPose {
    let delta = b - a;
    SegmentPose {
        length: delta.length(),
        angle: delta.y.atan2(delta.x),
        midpoint: (a + b) * 0.5,
    }
}

/// Area of the intersection of two circles with radii `r1` and `r2` whose
/// centers are `d` apart.
///
/// The `acos` arguments are clamped to `[-1, 1]`; near-tangent distances can
/// overshoot the domain by floating-point error and would otherwise yield NaN.
pub fn circle_overlap_area(d: f32, r1: f32, r2: f32) -> f32 {
    if d <= (r2 - r1).abs() {
        // One circle fully contains the other.
        let r = r1.min(r2);
        return PI * r * r;
    }
    if d >= r1 + r2 {
        return 0.0;
    }

    // Partial overlap: sum of the two circular segments cut off by the chord
    // through the intersection points.
    let alpha = ((r1 * r1 + d * d - r2 * r2) / (2.0 * r1 * d))
        .clamp(-1.0, 1.0)
        .acos();
    let beta = ((r2 * r2 + d * d - r1 * r1) / (2.0 * r2 * d))
        .clamp(-1.0, 1.0)
        .acos();

    r1 * r1 * (alpha - (2.0 * alpha).sin() / 2.0) + r2 * r2 * (beta - (2.0 * beta).sin() / 2.0)
}
