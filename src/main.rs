//! NEO Impact - an Earth-Moon-NEO viewer with impact estimation, built with Bevy 0.18
//!
//! - Impact energy and crater estimates for catalog objects
//! - Auto/manual camera follow with eased focus transitions
//! - Focus markers from assistant replies
//! - Bevy Remote Protocol (BRP) support for debugging

mod camera;
mod catalog;
mod impact;
mod schedule;
mod traits;

use bevy::prelude::*;
use bevy_brp_extras::BrpExtrasPlugin;
use bevy_inspector_egui::bevy_egui::EguiPlugin;

use crate::camera::CameraPlugin;
use crate::catalog::CatalogPlugin;
use crate::impact::ImpactPlugin;
use crate::schedule::SchedulePlugin;

fn main() {
    let mut app = App::new();

    // Get effective port from BrpExtrasPlugin to include in window title if non-default
    let brp_plugin = BrpExtrasPlugin::default();
    let (effective_port, _) = brp_plugin.get_effective_port();
    let window_title = if effective_port == bevy_brp_extras::DEFAULT_REMOTE_PORT {
        "neo-impact".to_string()
    } else {
        format!("neo-impact - {effective_port}")
    };

    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: window_title,
            ..default()
        }),
        ..default()
    }))
    .insert_resource(ClearColor(Color::BLACK))
    .add_plugins((
        EguiPlugin::default(),
        brp_plugin,
        CameraPlugin,
        CatalogPlugin,
        ImpactPlugin,
        SchedulePlugin,
    ))
    .run();
}
