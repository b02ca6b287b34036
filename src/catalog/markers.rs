use bevy::prelude::*;

use crate::camera::Selectable;
use crate::catalog::NeoCatalog;

const EARTH_RADIUS: f32 = 10.0;
const MOON_RADIUS: f32 = 2.7;
const MOON_POSITION: Vec3 = Vec3::new(60.0, 0.0, 0.0);

const EARTH_COLOR: Color = Color::srgb(0.667, 0.682, 1.0);
const MOON_COLOR: Color = Color::WHITE;
const HAZARDOUS_COLOR: Color = Color::srgb(1.0, 0.133, 1.0);
const SAFE_COLOR: Color = Color::srgb(0.984, 0.984, 0.984);

/// Index of the marked object in [`NeoCatalog::neos`].
#[derive(Component, Reflect, Debug, Clone, Copy, PartialEq, Eq)]
#[reflect(Component)]
pub struct NeoMarker {
    pub index: usize,
}

pub fn spawn_earth_and_moon(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    commands.spawn((
        Name::new("Earth"),
        Mesh3d(meshes.add(Sphere::new(EARTH_RADIUS))),
        MeshMaterial3d(materials.add(EARTH_COLOR)),
        Transform::default(),
        Selectable {
            radius: EARTH_RADIUS,
        },
    ));
    commands.spawn((
        Name::new("Moon"),
        Mesh3d(meshes.add(Sphere::new(MOON_RADIUS))),
        MeshMaterial3d(materials.add(MOON_COLOR)),
        Transform::from_translation(MOON_POSITION),
        Selectable {
            radius: MOON_RADIUS,
        },
    ));
}

pub fn spawn_neo_markers(
    mut commands: Commands,
    catalog: Res<NeoCatalog>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    // all markers share one unit sphere, scaled per object
    let sphere = meshes.add(Sphere::new(1.0));
    let hazardous = materials.add(HAZARDOUS_COLOR);
    let safe = materials.add(SAFE_COLOR);

    for (index, neo) in catalog.neos.iter().enumerate() {
        let material = if neo.is_hazardous {
            hazardous.clone()
        } else {
            safe.clone()
        };
        commands.spawn((
            Name::new(neo.name.clone()),
            NeoMarker { index },
            Mesh3d(sphere.clone()),
            MeshMaterial3d(material),
            Transform::from_translation(neo.world_position()).with_scale(Vec3::splat(neo.size)),
            Selectable { radius: 1.0 },
        ));
    }
    debug!("spawned {} NEO markers", catalog.len());
}
