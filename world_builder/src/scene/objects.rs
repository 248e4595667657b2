//! Store → entity sync: setup_scene, SceneIndex, and the per-frame
//! sync_scene_objects system.
//!
//! The store is authoritative. Each frame the sync system compares the
//! store's revision against the last one it applied; on a change it
//! despawns entities for removed ids, spawns entities for new ids through
//! the configured renderer, and writes transforms onto survivors. Entities
//! never mutate the store from here.

use std::collections::HashMap;

use bevy::prelude::*;

use crate::render::RendererResource;
use crate::store::{SceneObject, WorldStore};

/// Marker tying an entity back to its store id.
#[derive(Component)]
pub struct SceneNode {
    pub id: String,
}

/// Entity lookup by object id, plus the last store revision the scene
/// reflects.
#[derive(Resource, Default)]
pub struct SceneIndex {
    pub entities: HashMap<String, Entity>,
    pub synced_revision: Option<u64>,
}

pub fn setup_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    commands.insert_resource(SceneIndex::default());
    commands.spawn((
        Camera3d::default(),
        Transform::from_xyz(0., 2., 8.).looking_at(Vec3::new(0., 1., 0.), Vec3::Y),
        crate::camera::FlyCamera::default(),
    ));
    commands.spawn((
        DirectionalLight {
            illuminance: 8_000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(4., 8., 4.).looking_at(Vec3::ZERO, Vec3::Y),
    ));
    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: 0.3,
    });
    // Ground plane, not part of the store and never pickable.
    commands.spawn((
        Mesh3d(meshes.add(Plane3d::default().mesh().size(60.0, 60.0))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgb(0.08, 0.09, 0.12),
            perceptual_roughness: 1.0,
            ..default()
        })),
        Transform::from_xyz(0., 0., 0.),
    ));
}

/// Builds an entity transform from the stored position, Euler rotation
/// (radians, XYZ order), and per-axis scale.
pub fn object_transform(object: &SceneObject) -> Transform {
    Transform {
        translation: Vec3::from_array(object.position),
        rotation: Quat::from_euler(
            EulerRot::XYZ,
            object.rotation[0],
            object.rotation[1],
            object.rotation[2],
        ),
        scale: Vec3::from_array(object.scale),
    }
}

/// Inverse of [`object_transform`], for writing gizmo edits back.
pub fn transform_to_parts(transform: &Transform) -> ([f32; 3], [f32; 3], [f32; 3]) {
    let (x, y, z) = transform.rotation.to_euler(EulerRot::XYZ);
    (
        transform.translation.to_array(),
        [x, y, z],
        transform.scale.to_array(),
    )
}

pub fn sync_scene_objects(
    mut commands: Commands,
    store: Res<WorldStore>,
    renderer: Res<RendererResource>,
    mut index: ResMut<SceneIndex>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    asset_server: Option<Res<AssetServer>>,
    mut nodes: Query<(&SceneNode, &mut Transform)>,
) {
    let revision = store.0.revision();
    if index.synced_revision == Some(revision) {
        return;
    }

    let objects = store.0.objects();

    // Removed ids first.
    let live: std::collections::HashSet<&str> = objects.iter().map(|o| o.id.as_str()).collect();
    index.entities.retain(|id, entity| {
        if live.contains(id.as_str()) {
            true
        } else {
            commands.entity(*entity).despawn_recursive();
            false
        }
    });

    for object in objects {
        match index.entities.get(&object.id) {
            Some(&entity) => {
                if let Ok((_, mut transform)) = nodes.get_mut(entity) {
                    *transform = object_transform(object);
                }
            }
            None => {
                let entity = renderer.0.spawn_object(
                    &mut commands,
                    &mut meshes,
                    &mut materials,
                    asset_server.as_deref(),
                    object,
                );
                index.entities.insert(object.id.clone(), entity);
            }
        }
    }

    index.synced_revision = Some(revision);
}
