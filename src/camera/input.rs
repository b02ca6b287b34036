//! Translates mouse and keyboard state into [`CameraCommand`]s.

use bevy::ecs::message::MessageWriter;
use bevy::input::mouse::AccumulatedMouseMotion;
use bevy::input::mouse::AccumulatedMouseScroll;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::camera::config::CameraFollowConfig;
use crate::camera::constants::CLICK_DRAG_TOLERANCE_PX;
use crate::camera::controller::CameraCommand;
use crate::camera::picking::PointerClick;
use crate::schedule::CameraSet;

pub struct CameraInputPlugin;

impl Plugin for CameraInputPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DragTracker>()
            .add_systems(Update, read_camera_input.in_set(CameraSet::Input));
    }
}

/// Input gathered over one frame, in raw device units.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct InputSnapshot {
    /// Primary-button drag in pixels, once past the click tolerance
    pub rotate_drag:     Vec2,
    /// Secondary-button drag in pixels
    pub pan_drag:        Vec2,
    /// Wheel travel; positive is away from the user
    pub scroll:          f32,
    /// Held pan keys: x is right (+) / left (-), y is up (+) / down (-)
    pub key_pan:         Vec2,
    pub toggle_mode:     bool,
    pub dismiss_overlay: bool,
}

pub fn translate(snapshot: &InputSnapshot, config: &CameraFollowConfig) -> Vec<CameraCommand> {
    let mut commands = Vec::new();

    if snapshot.toggle_mode {
        commands.push(CameraCommand::ToggleMode);
    }
    if snapshot.dismiss_overlay {
        commands.push(CameraCommand::DismissOverlay);
    }
    if snapshot.rotate_drag != Vec2::ZERO {
        commands.push(CameraCommand::Rotate {
            delta_theta: -snapshot.rotate_drag.x * config.rotate_sensitivity,
            delta_phi:   -snapshot.rotate_drag.y * config.rotate_sensitivity,
        });
    }
    // dragging grabs the scene: content follows the pointer
    if snapshot.pan_drag != Vec2::ZERO {
        commands.push(CameraCommand::Pan {
            delta_right: -snapshot.pan_drag.x * config.pan_sensitivity,
            delta_up:    snapshot.pan_drag.y * config.pan_sensitivity,
        });
    }
    if snapshot.key_pan != Vec2::ZERO {
        commands.push(CameraCommand::Pan {
            delta_right: snapshot.key_pan.x * config.keyboard_pan_step,
            delta_up:    snapshot.key_pan.y * config.keyboard_pan_step,
        });
    }
    if snapshot.scroll > 0.0 {
        commands.push(CameraCommand::Dolly(config.zoom_in_factor));
    } else if snapshot.scroll < 0.0 {
        commands.push(CameraCommand::Dolly(config.zoom_out_factor));
    }

    commands
}

/// Separates clicks from drags on the primary button.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq)]
pub struct DragTracker {
    pressed:   bool,
    dragging:  bool,
    travel_px: f32,
}

impl DragTracker {
    pub const fn press(&mut self) {
        *self = Self {
            pressed:   true,
            dragging:  false,
            travel_px: 0.0,
        };
    }

    /// Records pointer motion; returns `true` once the press has become a drag.
    pub fn track(&mut self, delta: Vec2) -> bool {
        if self.pressed && !self.dragging {
            self.travel_px += delta.length();
            self.dragging = self.travel_px > CLICK_DRAG_TOLERANCE_PX;
        }
        self.dragging
    }

    /// Ends the press; returns `true` when it was a click.
    pub fn release(&mut self) -> bool {
        let click = self.pressed && !self.dragging;
        *self = Self::default();
        click
    }
}

fn key_axis(keys: &ButtonInput<KeyCode>, positive: [KeyCode; 2], negative: [KeyCode; 2]) -> f32 {
    let positive = f32::from(u8::from(keys.any_pressed(positive)));
    let negative = f32::from(u8::from(keys.any_pressed(negative)));
    positive - negative
}

fn read_camera_input(
    mouse_buttons: Res<ButtonInput<MouseButton>>,
    keys: Res<ButtonInput<KeyCode>>,
    motion: Res<AccumulatedMouseMotion>,
    scroll: Res<AccumulatedMouseScroll>,
    config: Res<CameraFollowConfig>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut drag: ResMut<DragTracker>,
    mut camera_commands: MessageWriter<CameraCommand>,
    mut clicks: MessageWriter<PointerClick>,
) {
    if mouse_buttons.just_pressed(MouseButton::Left) {
        drag.press();
    }

    let mut snapshot = InputSnapshot {
        scroll: scroll.delta.y,
        toggle_mode: keys.just_pressed(KeyCode::KeyC),
        dismiss_overlay: keys.just_pressed(KeyCode::Escape),
        key_pan: Vec2::new(
            key_axis(&keys, [KeyCode::KeyD, KeyCode::ArrowRight], [
                KeyCode::KeyA,
                KeyCode::ArrowLeft,
            ]),
            key_axis(&keys, [KeyCode::KeyW, KeyCode::ArrowUp], [
                KeyCode::KeyS,
                KeyCode::ArrowDown,
            ]),
        ),
        ..default()
    };

    if mouse_buttons.pressed(MouseButton::Left) && drag.track(motion.delta) {
        snapshot.rotate_drag = motion.delta;
    }
    if mouse_buttons.pressed(MouseButton::Right) {
        snapshot.pan_drag = motion.delta;
    }

    if mouse_buttons.just_released(MouseButton::Left) && drag.release() {
        let cursor = windows.iter().next().and_then(Window::cursor_position);
        if let Some(cursor) = cursor {
            clicks.write(PointerClick { cursor });
        }
    }

    camera_commands.write_batch(translate(&snapshot, &config));
}
