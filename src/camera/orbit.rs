//! Orbit math for manual camera control: rotation around, dolly toward and pan across
//! the look-at target.
//!
//! Spherical coordinates use a Y-up convention with `theta` measured around Y from +Z
//! and `phi` measured down from +Y.

use std::f32::consts::PI;

use bevy::prelude::*;

use crate::camera::constants::ORBIT_POLAR_MARGIN;
use crate::camera::constants::PAN_DISTANCE_SCALE;
use crate::traits::Vec3Ext;

/// Offsets shorter than this are treated as the camera sitting on its target.
const DEGENERATE_OFFSET: f32 = 1e-6;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Spherical {
    pub radius: f32,
    pub theta:  f32,
    pub phi:    f32,
}

impl Spherical {
    /// Returns `None` for a zero-length or non-finite offset.
    pub fn from_offset(offset: Vec3) -> Option<Self> {
        let radius = offset.length();
        if !radius.is_finite() || radius < DEGENERATE_OFFSET {
            return None;
        }
        Some(Self {
            radius,
            theta: offset.x.atan2(offset.z),
            phi: (offset.y / radius).clamp(-1.0, 1.0).acos(),
        })
    }

    pub fn to_offset(self) -> Vec3 {
        let planar = self.radius * self.phi.sin();
        Vec3::new(
            planar * self.theta.sin(),
            self.radius * self.phi.cos(),
            planar * self.theta.cos(),
        )
    }

    /// Keeps `phi` off the poles so the view basis stays well defined.
    #[must_use]
    pub fn restrict_polar(mut self) -> Self {
        self.phi = self.phi.clamp(ORBIT_POLAR_MARGIN, PI - ORBIT_POLAR_MARGIN);
        self
    }
}

/// Rotates `position` around `target`. Returns `position` unchanged when it sits on the target.
pub fn rotate_about(position: Vec3, target: Vec3, delta_theta: f32, delta_phi: f32) -> Vec3 {
    let Some(mut spherical) = Spherical::from_offset(position - target) else {
        return position;
    };
    spherical.theta += delta_theta;
    spherical.phi += delta_phi;
    target + spherical.restrict_polar().to_offset()
}

/// Scales the camera's distance from `target` by `scale`, clamped to `[min_distance, max_distance]`.
pub fn dolly_about(
    position: Vec3,
    target: Vec3,
    scale: f32,
    min_distance: f32,
    max_distance: f32,
) -> Vec3 {
    let offset = position - target;
    let distance = offset.length();
    if !scale.is_finite() || scale <= 0.0 || distance < DEGENERATE_OFFSET {
        return position;
    }
    let lower = min_distance.min(max_distance);
    let new_distance = (distance * scale).clamp(lower, max_distance.max(lower));
    target + offset / distance * new_distance
}

/// World-space translation for a pan of `delta_right` / `delta_up` input units, scaled by
/// the camera's distance from its target so panning feels the same at every zoom level.
pub fn pan_offset(position: Vec3, target: Vec3, delta_right: f32, delta_up: f32) -> Vec3 {
    let scale = position.distance(target) * PAN_DISTANCE_SCALE;
    let forward = (target - position).direction_or(Vec3::NEG_Z);
    let right = forward.cross(Vec3::Y).direction_or(Vec3::X);
    let up = right.cross(forward).direction_or(Vec3::Y);
    right * (delta_right * scale) + up * (delta_up * scale)
}
