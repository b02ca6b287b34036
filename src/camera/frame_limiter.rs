use bevy::prelude::*;

use crate::camera::constants::FRAME_INTERVAL_TOLERANCE_MS;

/// Caps how often the camera controller ticks. Frames arriving sooner than the interval
/// are folded into the next processed one, so no elapsed time is lost.
#[derive(Resource, Reflect, Debug, Clone, Copy, PartialEq)]
#[reflect(Resource)]
pub struct FrameLimiter {
    interval_ms:    f32,
    accumulated_ms: f32,
}

impl Default for FrameLimiter {
    fn default() -> Self { Self::new(60.0) }
}

impl FrameLimiter {
    /// A non-positive rate disables the cap.
    pub fn new(target_fps: f32) -> Self {
        Self {
            interval_ms:    Self::interval_for(target_fps),
            accumulated_ms: 0.0,
        }
    }

    const fn interval_for(target_fps: f32) -> f32 {
        if target_fps.is_finite() && target_fps > 0.0 {
            1000.0 / target_fps
        } else {
            0.0
        }
    }

    pub fn set_target_fps(&mut self, target_fps: f32) {
        self.interval_ms = Self::interval_for(target_fps);
    }

    pub const fn interval_ms(&self) -> f32 { self.interval_ms }

    /// Accumulates `delta_ms`; returns the accumulated interval once it reaches the cap.
    pub fn advance(&mut self, delta_ms: f32) -> Option<f32> {
        if delta_ms.is_finite() {
            self.accumulated_ms += delta_ms.max(0.0);
        }
        if self.accumulated_ms + FRAME_INTERVAL_TOLERANCE_MS < self.interval_ms {
            return None;
        }
        let elapsed = self.accumulated_ms;
        self.accumulated_ms = 0.0;
        Some(elapsed)
    }
}
