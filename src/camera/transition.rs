use bevy::prelude::*;

/// Cubic ease-out: fast start, decelerating into the target. `t` is clamped to `[0, 1]`.
pub fn ease_out_cubic(t: f32) -> f32 {
    let remaining = 1.0 - t.clamp(0.0, 1.0);
    remaining.mul_add(-(remaining * remaining), 1.0)
}

/// A one-shot eased move of the camera position toward `end_position`, looking at
/// `look_at` on every step.
///
/// Time is accumulated from the deltas passed to [`FocusTransition::advance`], so the
/// curve is a pure function of elapsed milliseconds.
#[derive(Clone, Copy, Debug, PartialEq, Reflect)]
pub struct FocusTransition {
    pub start_position: Vec3,
    pub end_position:   Vec3,
    pub look_at:        Vec3,
    /// Controller clock reading when the transition began
    pub started_at_ms:  f64,
    pub duration_ms:    f32,
    elapsed_ms:         f32,
}

impl FocusTransition {
    pub const fn new(
        start_position: Vec3,
        end_position: Vec3,
        look_at: Vec3,
        started_at_ms: f64,
        duration_ms: f32,
    ) -> Self {
        Self {
            start_position,
            end_position,
            look_at,
            started_at_ms,
            duration_ms,
            elapsed_ms: 0.0,
        }
    }

    /// Linear progress in `[0, 1]`; a non-positive duration is already complete.
    pub fn progress(&self) -> f32 {
        if self.duration_ms > 0.0 {
            (self.elapsed_ms / self.duration_ms).min(1.0)
        } else {
            1.0
        }
    }

    pub fn position(&self) -> Vec3 {
        if self.is_complete() {
            return self.end_position;
        }
        self.start_position
            .lerp(self.end_position, ease_out_cubic(self.progress()))
    }

    /// Adds `delta_ms` of elapsed time and returns the eased position.
    pub fn advance(&mut self, delta_ms: f32) -> Vec3 {
        self.elapsed_ms += delta_ms.max(0.0);
        self.position()
    }

    pub fn is_complete(&self) -> bool { self.progress() >= 1.0 }
}
