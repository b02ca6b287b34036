use bevy::ecs::message::Message;
use bevy::ecs::message::MessageReader;
use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;

use crate::camera::cameras::FollowCamera;
use crate::camera::controller::CameraCommand;
use crate::schedule::CameraSet;

pub struct PickingPlugin;

impl Plugin for PickingPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<PointerClick>()
            .add_message::<ObjectPicked>()
            .add_systems(Update, pick_objects.in_set(CameraSet::Input))
            .add_systems(Update, open_picked_overlay.in_set(CameraSet::Commands));
    }
}

/// Marks an entity as clickable. The hit sphere is `radius` scaled by the entity's
/// largest global scale component.
#[derive(Component, Reflect, Debug, Clone, Copy, PartialEq)]
#[reflect(Component)]
pub struct Selectable {
    pub radius: f32,
}

/// A press and release of the primary button without a drag in between.
#[derive(Message, Debug, Clone, Copy, PartialEq)]
pub struct PointerClick {
    pub cursor: Vec2,
}

#[derive(Message, Debug, Clone, Copy, PartialEq)]
pub struct ObjectPicked {
    pub entity:   Entity,
    pub position: Vec3,
}

/// Distance along a unit-length `direction` to the first intersection with the sphere,
/// or the exit point when the ray starts inside it.
pub fn ray_sphere_distance(origin: Vec3, direction: Vec3, center: Vec3, radius: f32) -> Option<f32> {
    let to_origin = origin - center;
    let half_b = to_origin.dot(direction);
    let c = radius.mul_add(-radius, to_origin.length_squared());
    let discriminant = half_b.mul_add(half_b, -c);
    if discriminant < 0.0 || !discriminant.is_finite() {
        return None;
    }
    let root = discriminant.sqrt();
    let near = -half_b - root;
    if near >= 0.0 {
        return Some(near);
    }
    let far = -half_b + root;
    (far >= 0.0).then_some(far)
}

/// Closest candidate hit by the ray; candidates are `(entity, center, radius)`.
pub fn nearest_hit(
    origin: Vec3,
    direction: Vec3,
    candidates: impl IntoIterator<Item = (Entity, Vec3, f32)>,
) -> Option<(Entity, Vec3)> {
    candidates
        .into_iter()
        .filter_map(|(entity, center, radius)| {
            ray_sphere_distance(origin, direction, center, radius)
                .map(|distance| (distance, entity, center))
        })
        .min_by(|a, b| a.0.total_cmp(&b.0))
        .map(|(_, entity, center)| (entity, center))
}

fn pick_objects(
    mut clicks: MessageReader<PointerClick>,
    camera: Single<(&Camera, &GlobalTransform), With<FollowCamera>>,
    selectables: Query<(Entity, &GlobalTransform, &Selectable)>,
    mut picked: MessageWriter<ObjectPicked>,
) {
    let (camera, camera_transform) = *camera;
    for click in clicks.read() {
        let Ok(ray) = camera.viewport_to_world(camera_transform, click.cursor) else {
            continue;
        };
        let candidates = selectables.iter().map(|(entity, transform, selectable)| {
            let (scale, _, center) = transform.to_scale_rotation_translation();
            (entity, center, selectable.radius * scale.max_element())
        });
        if let Some((entity, position)) = nearest_hit(ray.origin, *ray.direction, candidates) {
            debug!("picked {entity} at {position}");
            picked.write(ObjectPicked { entity, position });
        }
    }
}

fn open_picked_overlay(
    mut picked: MessageReader<ObjectPicked>,
    mut commands: MessageWriter<CameraCommand>,
) {
    for pick in picked.read() {
        commands.write(CameraCommand::OpenOverlay(pick.position));
    }
}
