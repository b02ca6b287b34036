use bevy::prelude::*;

/// Extension trait for `Vec3` direction handling that never yields non-finite values
pub trait Vec3Ext {
    /// Unit vector in the same direction, or `fallback` when the length is zero or not finite
    fn direction_or(self, fallback: Vec3) -> Vec3;
}

impl Vec3Ext for Vec3 {
    #[inline]
    fn direction_or(self, fallback: Vec3) -> Vec3 { self.try_normalize().unwrap_or(fallback) }
}

/// Extension trait for `f32` millisecond conversions from Bevy's `Time`
pub trait SecondsExt {
    /// Converts seconds to milliseconds
    fn to_millis(self) -> f32;
}

impl SecondsExt for f32 {
    #[inline]
    fn to_millis(self) -> f32 { self * 1000.0 }
}
