use bevy::input::common_conditions::input_toggle_active;
use bevy::prelude::*;
use bevy_inspector_egui::inspector_options::std_options::NumberDisplay;
use bevy_inspector_egui::prelude::*;
use bevy_inspector_egui::quick::ResourceInspectorPlugin;

pub struct CameraConfigPlugin;

impl Plugin for CameraConfigPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(
            ResourceInspectorPlugin::<CameraFollowConfig>::default()
                .run_if(input_toggle_active(false, KeyCode::F1)),
        )
        .init_resource::<CameraFollowConfig>();
    }
}

#[derive(Resource, Reflect, InspectorOptions, Debug, PartialEq, Clone, Copy)]
#[reflect(Resource, InspectorOptions)]
pub struct CameraFollowConfig {
    /// Fraction of the remaining distance covered per auto-follow tick
    #[inspector(min = 0.0, max = 1.0, display = NumberDisplay::Slider)]
    pub follow_lerp_factor:       f32,
    #[inspector(min = 10.0, max = 500.0)]
    pub daylight_distance:        f32,
    pub daylight_height_offset:   f32,
    pub daylight_side_offset:     f32,
    /// Distance from a focused object, along its direction from the origin
    #[inspector(min = 0.0, max = 200.0)]
    pub focus_offset:             f32,
    #[inspector(min = 0.0, max = 5000.0)]
    pub focus_duration_ms:        f32,
    /// Idle time after which Manual returns to Auto; `None` keeps Manual until toggled
    pub auto_return_delay_ms:     Option<f32>,
    /// Radians per pixel of drag
    #[inspector(min = 0.0, max = 0.01, display = NumberDisplay::Slider)]
    pub rotate_sensitivity:       f32,
    pub pan_sensitivity:          f32,
    pub keyboard_pan_step:        f32,
    #[inspector(min = 0.5, max = 1.0, display = NumberDisplay::Slider)]
    pub zoom_in_factor:           f32,
    #[inspector(min = 1.0, max = 1.5, display = NumberDisplay::Slider)]
    pub zoom_out_factor:          f32,
    pub min_distance:             f32,
    pub max_distance:             f32,
    /// Camera travel in one tick that closes an open object overlay
    pub overlay_dismiss_distance: f32,
    #[inspector(min = 1.0, max = 240.0)]
    pub target_fps:               f32,
}

impl Default for CameraFollowConfig {
    fn default() -> Self {
        Self {
            follow_lerp_factor:       0.02,
            daylight_distance:        75.0,
            daylight_height_offset:   25.0,
            daylight_side_offset:     15.0,
            focus_offset:             15.0,
            focus_duration_ms:        1000.0,
            auto_return_delay_ms:     None,
            rotate_sensitivity:       0.0015,
            pan_sensitivity:          0.1,
            keyboard_pan_step:        10.0,
            zoom_in_factor:           0.95,
            zoom_out_factor:          1.05,
            min_distance:             1.0,
            max_distance:             1500.0,
            overlay_dismiss_distance: 0.5,
            target_fps:               60.0,
        }
    }
}

impl CameraFollowConfig {
    /// Offset added to the scaled light direction in auto-follow mode
    pub const fn daylight_offset(&self) -> Vec3 {
        Vec3::new(self.daylight_side_offset, self.daylight_height_offset, 0.0)
    }
}
