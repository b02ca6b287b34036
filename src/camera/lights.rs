use bevy::prelude::*;

use crate::camera::constants::SUN_ILLUMINANCE;
use crate::camera::constants::SUN_ORBIT_RADIANS_PER_SEC;
use crate::camera::constants::SUN_ORBIT_RADIUS;
use crate::schedule::CameraSet;

pub struct SunLightPlugin;

impl Plugin for SunLightPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SunDirection>()
            .add_systems(Startup, spawn_sun)
            .add_systems(Update, orbit_sun.in_set(CameraSet::Input));
    }
}

#[derive(Component)]
struct Sun;

/// Direction from the origin toward the sun; auto follow keeps the camera on this side.
#[derive(Resource, Reflect, Debug, Clone, Copy, PartialEq)]
#[reflect(Resource)]
pub struct SunDirection(pub Vec3);

impl Default for SunDirection {
    fn default() -> Self { Self(sun_position(0.0)) }
}

/// The sun circles the origin in the XZ plane.
pub fn sun_position(elapsed_secs: f32) -> Vec3 {
    let angle = elapsed_secs * SUN_ORBIT_RADIANS_PER_SEC;
    Vec3::new(
        angle.cos() * SUN_ORBIT_RADIUS,
        0.0,
        angle.sin() * SUN_ORBIT_RADIUS,
    )
}

fn spawn_sun(mut commands: Commands) {
    commands.spawn((
        Name::new("Sun"),
        Sun,
        DirectionalLight {
            illuminance: SUN_ILLUMINANCE,
            shadows_enabled: false,
            ..default()
        },
        Transform::from_translation(sun_position(0.0)).looking_at(Vec3::ZERO, Vec3::Y),
    ));
}

fn orbit_sun(
    time: Res<Time>,
    mut direction: ResMut<SunDirection>,
    mut suns: Query<&mut Transform, With<Sun>>,
) {
    let position = sun_position(time.elapsed_secs());
    direction.0 = position;
    for mut transform in &mut suns {
        *transform = Transform::from_translation(position).looking_at(Vec3::ZERO, Vec3::Y);
    }
}
