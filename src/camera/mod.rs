mod cameras;
mod config;
mod constants;
mod controller;
mod focus_command;
mod frame_limiter;
mod input;
mod lights;
mod orbit;
mod picking;
mod transition;

use bevy::prelude::*;

use cameras::CamerasPlugin;
use config::CameraConfigPlugin;
use focus_command::FocusCommandPlugin;
use input::CameraInputPlugin;
use lights::SunLightPlugin;
use picking::PickingPlugin;

pub use picking::ObjectPicked;
pub use picking::Selectable;

pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(CameraConfigPlugin)
            .add_plugins(SunLightPlugin)
            .add_plugins(CamerasPlugin)
            .add_plugins(CameraInputPlugin)
            .add_plugins(PickingPlugin)
            .add_plugins(FocusCommandPlugin);
    }
}
