use bevy::prelude::*;

/// Per-frame ordering of the camera pipeline in `Update`.
#[derive(Debug, Hash, PartialEq, Eq, Clone, SystemSet)]
pub enum CameraSet {
    /// Pointer, keyboard and scene inputs become messages
    Input,
    /// Messages are routed into camera commands
    Commands,
    /// The controller applies commands and advances
    Tick,
    /// The controller's pose is written to the camera transform
    Apply,
}

pub struct SchedulePlugin;

impl Plugin for SchedulePlugin {
    fn build(&self, app: &mut App) {
        app.configure_sets(
            Update,
            (
                CameraSet::Input,
                CameraSet::Commands,
                CameraSet::Tick,
                CameraSet::Apply,
            )
                .chain(),
        );
    }
}
