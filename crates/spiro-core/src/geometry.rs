//! Projection and rotation math shared by the arm tree and the editor.
//!
//! All points live in canvas space: origin at the top-left corner, x to the
//! right, y downwards, one unit per logical pixel.

use std::f64::consts::TAU;

use bevy::math::Vec2;

use crate::error::ArmError;

/// Rotates `v` by `angle` radians (counter-clockwise in a y-up frame).
pub fn rotate(v: Vec2, angle: f32) -> Vec2 {
    let (sin, cos) = angle.sin_cos();
    Vec2::new(v.x * cos - v.y * sin, v.x * sin + v.y * cos)
}

/// Angle swept in `dt` seconds at `revolutions_per_second`.
pub fn rotation_angle(revolutions_per_second: f32, dt: f64) -> f32 {
    #[allow(clippy::cast_possible_truncation)]
    let angle = (f64::from(revolutions_per_second) * TAU * dt) as f32;
    angle
}

/// Scale `k` such that `k * direction` is the orthogonal projection of
/// `point - anchor` onto `direction`.
///
/// A zero-length direction projects everything onto the anchor, so the scale is 0.
pub fn projection_scale(point: Vec2, anchor: Vec2, direction: Vec2) -> f32 {
    let len2 = direction.length_squared();
    if len2 == 0.0 {
        return 0.0;
    }
    (point - anchor).dot(direction) / len2
}

/// Vector projection of `point - anchor` onto `direction`.
pub fn orthogonal_projection(point: Vec2, anchor: Vec2, direction: Vec2) -> Vec2 {
    direction * projection_scale(point, anchor, direction)
}

/// Projection onto the segment `anchor .. anchor + direction`.
///
/// Returns the scale clamped to `[0, 1]` together with the matching offset from
/// `anchor`. Beyond either end the projection snaps to that endpoint.
pub fn clamped_projection(point: Vec2, anchor: Vec2, direction: Vec2) -> (f32, Vec2) {
    let scale = projection_scale(point, anchor, direction);
    if scale <= 0.0 {
        (0.0, Vec2::ZERO)
    } else if scale >= 1.0 {
        (1.0, direction)
    } else {
        (scale, direction * scale)
    }
}

/// Ratio of `offset` along `direction` using a single axis.
///
/// Uses the x components when `direction.x` is non-zero and the y components
/// otherwise. This is not a true projection: an offset perpendicular to a
/// near-axis direction reads as 0 along it.
pub fn axis_ratio(offset: Vec2, direction: Vec2) -> Result<f32, ArmError> {
    if direction.x != 0.0 {
        Ok(offset.x / direction.x)
    } else if direction.y != 0.0 {
        Ok(offset.y / direction.y)
    } else {
        Err(ArmError::DegenerateArm)
    }
}

/// Whether `point` lies within `radius` of `center` (boundary inclusive).
pub fn within_radius(point: Vec2, center: Vec2, radius: f32) -> bool {
    point.distance_squared(center) <= radius * radius
}
