//! Camera follow state machine.
//!
//! `Auto` drifts the camera toward a daylight-side viewpoint derived from the light
//! direction and always looks at the origin. `Manual` only moves in response to
//! explicit commands. Focus requests ease the camera to a pose over a fixed duration;
//! a new request replaces any transition in flight.

use bevy::ecs::message::Message;
use bevy::prelude::*;

use crate::camera::config::CameraFollowConfig;
use crate::camera::constants::CAMERA_START_POSITION;
use crate::camera::constants::EARTH_VIEW_POSITION;
use crate::camera::constants::FALLBACK_DIRECTION;
use crate::camera::constants::FRAMED_FOCUS_DISTANCE;
use crate::camera::constants::FRAMED_FOCUS_NUDGE;
use crate::camera::constants::OVERVIEW_POSITION;
use crate::camera::orbit;
use crate::camera::transition::FocusTransition;
use crate::traits::Vec3Ext;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Reflect)]
pub enum CameraMode {
    #[default]
    Auto,
    Manual,
}

#[derive(Clone, Copy, Debug, PartialEq, Reflect)]
pub struct CameraPose {
    pub position: Vec3,
    pub target:   Vec3,
}

impl CameraPose {
    pub const fn new(position: Vec3, target: Vec3) -> Self { Self { position, target } }

    pub const fn earth_view() -> Self { Self::new(EARTH_VIEW_POSITION, Vec3::ZERO) }

    pub const fn overview() -> Self { Self::new(OVERVIEW_POSITION, Vec3::ZERO) }

    /// Frames `object` from its far side relative to the origin, nudged off-axis so the
    /// origin stays in view behind it.
    pub fn framing(object: Vec3) -> Self {
        let direction = object.direction_or(FALLBACK_DIRECTION);
        Self::new(
            object - direction * FRAMED_FOCUS_DISTANCE + FRAMED_FOCUS_NUDGE,
            object,
        )
    }

    pub fn is_finite(&self) -> bool { self.position.is_finite() && self.target.is_finite() }
}

#[derive(Clone, Copy, Debug, PartialEq, Reflect)]
pub struct CameraState {
    pub mode:                CameraMode,
    pub position:            Vec3,
    pub target:              Vec3,
    /// Controller clock reading of the last user input
    pub last_interaction_ms: f64,
}

/// The object whose info overlay is open.
#[derive(Clone, Copy, Debug, PartialEq, Reflect)]
pub struct OverlayAnchor {
    pub object_position: Vec3,
}

/// Discrete operations on the controller, written by input adapters and focus routing.
#[derive(Message, Clone, Copy, Debug, PartialEq)]
pub enum CameraCommand {
    Rotate { delta_theta: f32, delta_phi: f32 },
    Dolly(f32),
    Pan { delta_right: f32, delta_up: f32 },
    ToggleMode,
    FocusPose(CameraPose),
    OpenOverlay(Vec3),
    DismissOverlay,
}

#[derive(Resource, Reflect, Debug, Clone)]
#[reflect(Resource)]
pub struct CameraFollowController {
    state:              CameraState,
    /// Mode to restore when the overlay that overrode it closes
    previous_mode:      Option<CameraMode>,
    transition:         Option<FocusTransition>,
    overlay:            Option<OverlayAnchor>,
    config:             CameraFollowConfig,
    clock_ms:           f64,
    last_tick_position: Vec3,
}

impl Default for CameraFollowController {
    fn default() -> Self { Self::new(CameraFollowConfig::default()) }
}

impl CameraFollowController {
    pub fn new(config: CameraFollowConfig) -> Self {
        Self {
            state: CameraState {
                mode:                CameraMode::Auto,
                position:            CAMERA_START_POSITION,
                target:              Vec3::ZERO,
                last_interaction_ms: 0.0,
            },
            previous_mode: None,
            transition: None,
            overlay: None,
            config,
            clock_ms: 0.0,
            last_tick_position: CAMERA_START_POSITION,
        }
    }

    pub const fn state(&self) -> &CameraState { &self.state }

    pub const fn mode(&self) -> CameraMode { self.state.mode }

    pub const fn pose(&self) -> CameraPose {
        CameraPose::new(self.state.position, self.state.target)
    }

    pub const fn transition(&self) -> Option<&FocusTransition> { self.transition.as_ref() }

    pub const fn is_transitioning(&self) -> bool { self.transition.is_some() }

    pub const fn overlay(&self) -> Option<&OverlayAnchor> { self.overlay.as_ref() }

    pub const fn config(&self) -> &CameraFollowConfig { &self.config }

    pub const fn set_config(&mut self, config: CameraFollowConfig) { self.config = config; }

    /// Daylight-side viewpoint for a light shining from `light_direction`.
    pub fn daylight_position(&self, light_direction: Vec3) -> Vec3 {
        light_direction.direction_or(FALLBACK_DIRECTION) * self.config.daylight_distance
            + self.config.daylight_offset()
    }

    /// Advances the controller by `delta_ms` and returns the pose to render.
    pub fn tick(&mut self, delta_ms: f32, light_direction: Vec3) -> CameraPose {
        let delta_ms = if delta_ms.is_finite() {
            delta_ms.max(0.0)
        } else {
            0.0
        };
        self.clock_ms += f64::from(delta_ms);

        if let Some(transition) = self.transition.as_mut() {
            self.state.position = transition.advance(delta_ms);
            self.state.target = transition.look_at;
            if transition.is_complete() {
                debug!(
                    "camera focus settled at {} after {:.0} ms",
                    self.state.position,
                    self.clock_ms - transition.started_at_ms
                );
                self.transition = None;
            }
        } else {
            match self.state.mode {
                CameraMode::Auto => {
                    let goal = self.daylight_position(light_direction);
                    self.state.position = self
                        .state
                        .position
                        .lerp(goal, self.config.follow_lerp_factor);
                    self.state.target = Vec3::ZERO;
                },
                CameraMode::Manual => {
                    self.dismiss_overlay_on_movement();
                    self.return_to_auto_when_idle();
                },
            }
        }

        self.last_tick_position = self.state.position;
        self.pose()
    }

    fn dismiss_overlay_on_movement(&mut self) {
        if self.overlay.is_none() {
            return;
        }
        let moved = self.state.position.distance(self.last_tick_position);
        if moved > self.config.overlay_dismiss_distance {
            debug!("camera moved {moved:.2}, closing object overlay");
            self.dismiss_overlay();
        }
    }

    fn return_to_auto_when_idle(&mut self) {
        let Some(delay_ms) = self.config.auto_return_delay_ms else {
            return;
        };
        if self.state.mode != CameraMode::Manual || self.overlay.is_some() {
            return;
        }
        if self.clock_ms - self.state.last_interaction_ms >= f64::from(delay_ms) {
            info!("camera idle for {delay_ms} ms, returning to auto follow");
            self.enter_auto();
        }
    }

    fn set_mode(&mut self, mode: CameraMode) {
        if self.state.mode != mode {
            info!("camera mode {:?} -> {mode:?}", self.state.mode);
            self.state.mode = mode;
        }
    }

    const fn touch(&mut self) { self.state.last_interaction_ms = self.clock_ms; }

    pub fn enter_manual(&mut self) {
        self.set_mode(CameraMode::Manual);
        self.touch();
    }

    /// Resumes auto follow. Cancels any focus transition and closes the overlay.
    pub fn enter_auto(&mut self) {
        self.transition = None;
        if self.overlay.take().is_some() {
            debug!("object overlay closed by auto follow");
        }
        self.previous_mode = None;
        self.set_mode(CameraMode::Auto);
    }

    pub fn toggle_mode(&mut self) {
        match self.state.mode {
            CameraMode::Auto => self.enter_manual(),
            CameraMode::Manual => self.enter_auto(),
        }
    }

    /// Shared prologue of every manual input: forces Manual and cancels an active focus.
    fn begin_manual_input(&mut self) {
        self.enter_manual();
        if self.transition.take().is_some() {
            debug!("camera focus cancelled by manual input");
        }
    }

    pub fn rotate(&mut self, delta_theta: f32, delta_phi: f32) {
        if !delta_theta.is_finite() || !delta_phi.is_finite() {
            return;
        }
        self.begin_manual_input();
        self.state.position = orbit::rotate_about(
            self.state.position,
            self.state.target,
            delta_theta,
            delta_phi,
        );
    }

    pub fn dolly(&mut self, scale: f32) {
        self.begin_manual_input();
        self.state.position = orbit::dolly_about(
            self.state.position,
            self.state.target,
            scale,
            self.config.min_distance,
            self.config.max_distance,
        );
    }

    /// Translates both the camera and its look-at target across the view plane.
    pub fn pan(&mut self, delta_right: f32, delta_up: f32) {
        if !delta_right.is_finite() || !delta_up.is_finite() {
            return;
        }
        self.begin_manual_input();
        let offset = orbit::pan_offset(
            self.state.position,
            self.state.target,
            delta_right,
            delta_up,
        );
        self.state.position += offset;
        self.state.target += offset;
    }

    /// Eases the camera to a point `focus_offset` beyond `object` on the ray from the origin.
    pub fn focus_on(&mut self, object: Vec3) {
        let direction = object.direction_or(FALLBACK_DIRECTION);
        self.focus_pose(CameraPose::new(
            object + direction * self.config.focus_offset,
            object,
        ));
    }

    /// Starts an eased transition from the current position to `pose`, replacing any
    /// transition in flight. Forces Manual.
    pub fn focus_pose(&mut self, pose: CameraPose) {
        if !pose.is_finite() {
            warn!("ignoring camera focus on non-finite pose {pose:?}");
            return;
        }
        self.enter_manual();
        if self.transition.is_some() {
            debug!("camera focus retargeted to {}", pose.target);
        } else {
            debug!("camera focus on {}", pose.target);
        }
        self.transition = Some(FocusTransition::new(
            self.state.position,
            pose.position,
            pose.target,
            self.clock_ms,
            self.config.focus_duration_ms,
        ));
    }

    /// Opens the info overlay for the object at `object` and focuses on it, remembering
    /// the mode to restore when the overlay closes.
    pub fn open_overlay(&mut self, object: Vec3) {
        if !object.is_finite() {
            warn!("ignoring overlay for non-finite position {object}");
            return;
        }
        if self.overlay.is_none() {
            self.previous_mode = Some(self.state.mode);
        }
        self.overlay = Some(OverlayAnchor {
            object_position: object,
        });
        debug!("object overlay opened at {object}");
        self.focus_on(object);
    }

    pub fn dismiss_overlay(&mut self) {
        let Some(anchor) = self.overlay.take() else {
            return;
        };
        debug!("object overlay at {} dismissed", anchor.object_position);
        if self.previous_mode.take() == Some(CameraMode::Auto) {
            self.enter_auto();
        }
    }

    pub fn apply(&mut self, command: CameraCommand) {
        match command {
            CameraCommand::Rotate {
                delta_theta,
                delta_phi,
            } => self.rotate(delta_theta, delta_phi),
            CameraCommand::Dolly(scale) => self.dolly(scale),
            CameraCommand::Pan {
                delta_right,
                delta_up,
            } => self.pan(delta_right, delta_up),
            CameraCommand::ToggleMode => self.toggle_mode(),
            CameraCommand::FocusPose(pose) => self.focus_pose(pose),
            CameraCommand::OpenOverlay(object) => self.open_overlay(object),
            CameraCommand::DismissOverlay => self.dismiss_overlay(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME_MS: f32 = 1000.0 / 60.0;
    const SUN: Vec3 = Vec3::new(200.0, 0.0, 0.0);

    fn run(controller: &mut CameraFollowController, frames: usize) -> CameraPose {
        let mut pose = controller.pose();
        for _ in 0..frames {
            pose = controller.tick(FRAME_MS, SUN);
        }
        pose
    }

    #[test]
    fn auto_drifts_toward_daylight_position() {
        let mut controller = CameraFollowController::default();
        let goal = controller.daylight_position(SUN);
        assert_eq!(goal, Vec3::new(90.0, 25.0, 0.0));

        let start_gap = controller.pose().position.distance(goal);
        let pose = controller.tick(FRAME_MS, SUN);
        assert!((pose.position.distance(goal) - start_gap * 0.98).abs() < 1e-3);
        assert_eq!(pose.target, Vec3::ZERO);

        let settled = run(&mut controller, 1000);
        assert!(settled.position.distance(goal) < 1e-3);
    }

    #[test]
    fn drag_enters_manual_and_stops_auto_follow() {
        let mut controller = CameraFollowController::default();
        controller.rotate(0.2, 0.1);
        assert_eq!(controller.mode(), CameraMode::Manual);

        let held = controller.pose();
        let pose = run(&mut controller, 120);
        assert_eq!(pose, held);

        controller.enter_auto();
        let moved = controller.tick(FRAME_MS, SUN);
        assert_ne!(moved.position, held.position);
    }

    #[test]
    fn manual_input_updates_last_interaction() {
        let mut controller = CameraFollowController::default();
        run(&mut controller, 30);
        controller.pan(5.0, -5.0);
        assert!(controller.state().last_interaction_ms > 400.0);
        controller.dolly(0.95);
        assert_eq!(controller.mode(), CameraMode::Manual);
    }

    #[test]
    fn pan_moves_target_with_camera() {
        let mut controller = CameraFollowController::default();
        let before = controller.pose();
        controller.pan(10.0, 0.0);
        let after = controller.pose();
        let camera_shift = after.position - before.position;
        let target_shift = after.target - before.target;
        assert!(camera_shift.length() > 0.0);
        assert!((camera_shift - target_shift).length() < 1e-5);
    }

    #[test]
    fn focus_on_origin_stays_finite() {
        let mut controller = CameraFollowController::default();
        controller.focus_on(Vec3::ZERO);
        assert_eq!(controller.mode(), CameraMode::Manual);
        let pose = run(&mut controller, 90);
        assert!(pose.is_finite());
        assert_eq!(pose.position, Vec3::new(0.0, 15.0, 0.0));
        assert_eq!(pose.target, Vec3::ZERO);
    }

    #[test]
    fn focus_eases_to_offset_position_over_duration() {
        let mut controller = CameraFollowController::default();
        let object = Vec3::new(0.0, 0.0, 50.0);
        controller.focus_on(object);

        let early = controller.tick(100.0, SUN);
        assert_eq!(early.target, object);
        assert!(controller.is_transitioning());

        controller.tick(900.0, SUN);
        assert!(!controller.is_transitioning());
        assert_eq!(controller.pose().position, Vec3::new(0.0, 0.0, 65.0));
    }

    #[test]
    fn second_focus_overwrites_first() {
        let mut controller = CameraFollowController::default();
        let first = Vec3::new(100.0, 0.0, 0.0);
        let second = Vec3::new(0.0, 0.0, -60.0);
        controller.focus_on(first);
        controller.tick(300.0, SUN);
        let mid_flight = controller.pose().position;

        controller.focus_on(second);
        let Some(transition) = controller.transition() else {
            panic!("second focus should start a transition");
        };
        assert_eq!(transition.start_position, mid_flight);

        let settled = run(&mut controller, 120);
        assert!(settled.position.distance(Vec3::new(0.0, 0.0, -75.0)) < 1e-3);
        assert!(settled.position.distance(first) > 50.0);
        assert_eq!(settled.target, second);
    }

    #[test]
    fn manual_input_cancels_focus() {
        let mut controller = CameraFollowController::default();
        controller.focus_on(Vec3::new(40.0, 0.0, 0.0));
        controller.tick(200.0, SUN);
        controller.rotate(0.1, 0.0);
        assert!(!controller.is_transitioning());
        assert_eq!(controller.mode(), CameraMode::Manual);
    }

    #[test]
    fn non_finite_focus_is_ignored() {
        let mut controller = CameraFollowController::default();
        controller.focus_on(Vec3::new(f32::NAN, 0.0, 0.0));
        assert!(!controller.is_transitioning());
        assert_eq!(controller.mode(), CameraMode::Auto);
    }

    #[test]
    fn framing_sits_behind_object() {
        let pose = CameraPose::framing(Vec3::new(100.0, 0.0, 0.0));
        assert_eq!(pose.position, Vec3::new(65.0, 8.0, 5.0));
        assert_eq!(pose.target, Vec3::new(100.0, 0.0, 0.0));
        assert!(CameraPose::framing(Vec3::ZERO).is_finite());
    }

    #[test]
    fn overlay_restores_auto_on_dismiss() {
        let mut controller = CameraFollowController::default();
        controller.open_overlay(Vec3::new(30.0, 0.0, 30.0));
        assert_eq!(controller.mode(), CameraMode::Manual);
        assert!(controller.overlay().is_some());

        controller.dismiss_overlay();
        assert_eq!(controller.mode(), CameraMode::Auto);
        assert!(controller.overlay().is_none());
        assert!(!controller.is_transitioning());
    }

    #[test]
    fn overlay_keeps_manual_when_opened_from_manual() {
        let mut controller = CameraFollowController::default();
        controller.enter_manual();
        controller.open_overlay(Vec3::new(30.0, 0.0, 30.0));
        controller.open_overlay(Vec3::new(-30.0, 0.0, 30.0));
        controller.dismiss_overlay();
        assert_eq!(controller.mode(), CameraMode::Manual);
    }

    #[test]
    fn camera_movement_dismisses_overlay() {
        let mut controller = CameraFollowController::default();
        controller.open_overlay(Vec3::new(30.0, 0.0, 30.0));
        run(&mut controller, 90);
        assert!(controller.overlay().is_some());

        // a tiny nudge stays open
        controller.pan(1.0, 0.0);
        controller.tick(FRAME_MS, SUN);
        assert!(controller.overlay().is_some());

        controller.rotate(0.5, 0.0);
        controller.tick(FRAME_MS, SUN);
        assert!(controller.overlay().is_none());
        assert_eq!(controller.mode(), CameraMode::Auto);
    }

    #[test]
    fn toggle_to_auto_closes_overlay() {
        let mut controller = CameraFollowController::default();
        controller.open_overlay(Vec3::new(30.0, 0.0, 30.0));
        controller.toggle_mode();
        assert_eq!(controller.mode(), CameraMode::Auto);
        assert!(controller.overlay().is_none());
        assert!(!controller.is_transitioning());

        controller.toggle_mode();
        assert_eq!(controller.mode(), CameraMode::Manual);
    }

    #[test]
    fn stays_manual_without_auto_return_delay() {
        let mut controller = CameraFollowController::default();
        controller.rotate(0.1, 0.0);
        controller.tick(60_000.0, SUN);
        assert_eq!(controller.mode(), CameraMode::Manual);
    }

    #[test]
    fn idle_manual_returns_to_auto_when_configured() {
        let mut controller = CameraFollowController::new(CameraFollowConfig {
            auto_return_delay_ms: Some(10_000.0),
            ..default()
        });
        controller.rotate(0.1, 0.0);
        controller.tick(9_000.0, SUN);
        assert_eq!(controller.mode(), CameraMode::Manual);

        controller.tick(1_000.0, SUN);
        assert_eq!(controller.mode(), CameraMode::Auto);
    }

    #[test]
    fn commands_dispatch_to_operations() {
        let mut controller = CameraFollowController::default();
        controller.apply(CameraCommand::ToggleMode);
        assert_eq!(controller.mode(), CameraMode::Manual);
        controller.apply(CameraCommand::ToggleMode);
        assert_eq!(controller.mode(), CameraMode::Auto);
        controller.apply(CameraCommand::FocusPose(CameraPose::earth_view()));
        assert!(controller.is_transitioning());
        controller.apply(CameraCommand::Dolly(1.05));
        assert!(!controller.is_transitioning());
    }
}
