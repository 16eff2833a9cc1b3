//! Kinematic clamps and orientation rules
//!
//! Pure functions over glam types, shared by `Agent::integrate`. None of them
//! can fail: degenerate inputs resolve to a fallback instead of NaN.

use glam::{Quat, Vec3};

use crate::{FORWARD, WORLD_UP, normalize_or};

/// Clamp the magnitude of `vel` to `[min_speed, max_speed]`, keeping direction
///
/// A zero velocity has no direction, so it is raised to `min_speed` along
/// `fallback_dir` instead.
pub fn clamp_speed(vel: Vec3, min_speed: f32, max_speed: f32, fallback_dir: Vec3) -> Vec3 {
    let speed = vel.length();
    if speed < min_speed {
        normalize_or(vel, fallback_dir) * min_speed
    } else if speed > max_speed {
        normalize_or(vel, fallback_dir) * max_speed
    } else {
        vel
    }
}

/// Clamp the vertical component of `pos` to `[min_altitude, max_altitude]`
#[inline]
pub fn clamp_altitude(mut pos: Vec3, min_altitude: f32, max_altitude: f32) -> Vec3 {
    if pos.y < min_altitude {
        pos.y = min_altitude;
    } else if pos.y > max_altitude {
        pos.y = max_altitude;
    }
    pos
}

/// Banked orientation: rotate by `acos(cp . vn)` about `cp = -(vn x up)`
///
/// `cp` is perpendicular to `vn`, so the angle is a quarter turn up to rounding
/// and the axis is the horizontal side vector. Vertical flight has no side
/// vector and keeps `current`.
pub fn banked_orientation(vel: Vec3, current: Quat) -> Quat {
    let Some(vn) = vel.try_normalize() else {
        return current;
    };
    let cp = -vn.cross(WORLD_UP);
    // acos is undefined outside [-1, 1]; rounding can push the dot product there
    let dp = cp.dot(vn).clamp(-1.0, 1.0);
    match cp.try_normalize() {
        Some(axis) => Quat::from_axis_angle(axis, dp.acos()),
        None => current,
    }
}

/// Heading orientation: shortest rotation taking the model forward axis onto `vel`
pub fn heading_orientation(vel: Vec3, current: Quat) -> Quat {
    match vel.try_normalize() {
        Some(vn) => Quat::from_rotation_arc(FORWARD, vn),
        None => current,
    }
}
