use bevy::ecs::message::MessageReader;
use bevy::prelude::*;

use crate::camera::config::CameraFollowConfig;
use crate::camera::constants::CAMERA_FAR;
use crate::camera::constants::CAMERA_FOV_DEGREES;
use crate::camera::constants::CAMERA_NEAR;
use crate::camera::controller::CameraCommand;
use crate::camera::controller::CameraFollowController;
use crate::camera::frame_limiter::FrameLimiter;
use crate::camera::lights::SunDirection;
use crate::schedule::CameraSet;
use crate::traits::SecondsExt;

pub struct CamerasPlugin;

impl Plugin for CamerasPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CameraFollowController>()
            .init_resource::<FrameLimiter>()
            .add_message::<CameraCommand>()
            .add_systems(Startup, spawn_follow_camera)
            .add_systems(
                Update,
                (sync_follow_config, apply_camera_commands, tick_camera)
                    .chain()
                    .in_set(CameraSet::Tick),
            )
            .add_systems(Update, apply_camera_pose.in_set(CameraSet::Apply));
    }
}

/// The camera driven by [`CameraFollowController`].
#[derive(Component, Reflect, Debug, Default)]
#[reflect(Component)]
pub struct FollowCamera;

fn spawn_follow_camera(mut commands: Commands, controller: Res<CameraFollowController>) {
    let pose = controller.pose();
    commands.spawn((
        Name::new("Follow Camera"),
        FollowCamera,
        Camera3d::default(),
        Projection::from(PerspectiveProjection {
            fov: CAMERA_FOV_DEGREES.to_radians(),
            near: CAMERA_NEAR,
            far: CAMERA_FAR,
            ..default()
        }),
        Transform::from_translation(pose.position).looking_at(pose.target, Vec3::Y),
    ));
}

fn sync_follow_config(
    config: Res<CameraFollowConfig>,
    mut controller: ResMut<CameraFollowController>,
    mut limiter: ResMut<FrameLimiter>,
) {
    if config.is_changed() {
        controller.set_config(*config);
        limiter.set_target_fps(config.target_fps);
    }
}

fn apply_camera_commands(
    mut commands: MessageReader<CameraCommand>,
    mut controller: ResMut<CameraFollowController>,
) {
    for command in commands.read() {
        controller.apply(*command);
    }
}

fn tick_camera(
    time: Res<Time>,
    sun: Res<SunDirection>,
    mut limiter: ResMut<FrameLimiter>,
    mut controller: ResMut<CameraFollowController>,
) {
    let Some(elapsed_ms) = limiter.advance(time.delta_secs().to_millis()) else {
        return;
    };
    controller.tick(elapsed_ms, sun.0);
}

fn apply_camera_pose(
    controller: Res<CameraFollowController>,
    mut camera: Single<&mut Transform, With<FollowCamera>>,
) {
    if !controller.is_changed() {
        return;
    }
    let pose = controller.pose();
    camera.translation = pose.position;
    camera.look_at(pose.target, Vec3::Y);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::controller::CameraMode;
    use crate::schedule::SchedulePlugin;

    fn camera_app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .add_plugins(SchedulePlugin)
            .init_resource::<CameraFollowConfig>()
            .init_resource::<CameraFollowController>()
            .init_resource::<SunDirection>()
            .init_resource::<FrameLimiter>()
            .add_message::<CameraCommand>()
            .add_systems(
                Update,
                (sync_follow_config, apply_camera_commands, tick_camera)
                    .chain()
                    .in_set(CameraSet::Tick),
            )
            .add_systems(Update, apply_camera_pose.in_set(CameraSet::Apply));
        app.world_mut()
            .spawn((FollowCamera, Transform::default()));
        app
    }

    fn camera_translation(app: &mut App) -> Vec3 {
        let mut query = app
            .world_mut()
            .query_filtered::<&Transform, With<FollowCamera>>();
        query
            .single(app.world())
            .map_or(Vec3::NAN, |transform| transform.translation)
    }

    #[test]
    fn commands_reach_controller_and_camera_follows() {
        let mut app = camera_app();
        app.world_mut()
            .write_message(CameraCommand::OpenOverlay(Vec3::new(0.0, 0.0, 40.0)));
        app.update();

        let controller = app.world().resource::<CameraFollowController>();
        assert_eq!(controller.mode(), CameraMode::Manual);
        assert!(controller.is_transitioning());
        assert!(controller.overlay().is_some());
        let expected = controller.pose().position;
        assert_eq!(camera_translation(&mut app), expected);
    }

    #[test]
    fn config_changes_reach_controller() {
        let mut app = camera_app();
        app.update();
        app.world_mut()
            .resource_mut::<CameraFollowConfig>()
            .focus_offset = 30.0;
        app.update();

        let controller = app.world().resource::<CameraFollowController>();
        assert!((controller.config().focus_offset - 30.0).abs() < f32::EPSILON);
        // the limiter follows the configured rate
        let limiter = app.world().resource::<FrameLimiter>();
        assert!((limiter.interval_ms() - 1000.0 / 60.0).abs() < 1e-4);
    }
}
