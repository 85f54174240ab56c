pub use glam::{EulerRot, Quat, Vec3};

use serde::{Deserialize, Serialize};

/// Wire form of a three component vector: `{ "x": .., "y": .., "z": .. }`
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec3Record {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3Record {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl From<Vec3> for Vec3Record {
    fn from(value: Vec3) -> Self {
        Self::new(value.x, value.y, value.z)
    }
}

impl From<Vec3Record> for Vec3 {
    fn from(value: Vec3Record) -> Self {
        Vec3::new(value.x, value.y, value.z)
    }
}

/// Builds an orientation from Euler angles in degrees, where `x` is pitch,
/// `y` is yaw and `z` is roll (yaw applied first).
pub fn orientation_from_euler_degrees(euler: Vec3) -> Quat {
    Quat::from_euler(
        EulerRot::YXZ,
        euler.y.to_radians(),
        euler.x.to_radians(),
        euler.z.to_radians(),
    )
}

/// Inverse of [`orientation_from_euler_degrees`].
pub fn orientation_to_euler_degrees(orientation: Quat) -> Vec3 {
    let (yaw, pitch, roll) = orientation.to_euler(EulerRot::YXZ);
    Vec3::new(pitch.to_degrees(), yaw.to_degrees(), roll.to_degrees())
}

/// Smallest rotation angle, in degrees, taking `from` onto `to`.
pub fn angle_between_degrees(from: Quat, to: Quat) -> f32 {
    from.angle_between(to).to_degrees()
}

pub fn clamp01(value: f32) -> f32 {
    value.clamp(0.0, 1.0)
}

/// Fraction of the remaining distance to cover this frame when easing toward
/// a target at `rate_per_sec`, independent of frame length.
pub fn smoothing_factor(rate_per_sec: f32, elapsed_ms: u64) -> f32 {
    if elapsed_ms == 0 {
        return 0.0;
    }
    let elapsed_secs = elapsed_ms as f32 / 1000.0;
    clamp01(1.0 - (-rate_per_sec * elapsed_secs).exp())
}
