//! Default renderer: primitive meshes plus glTF scene roots.

use bevy::gltf::GltfAssetLabel;
use bevy::prelude::*;
use bevy::render::primitives::Aabb;
use url::Url;

use crate::render::ObjectRenderer;
use crate::scene::materials::{object_material, placeholder_material};
use crate::scene::{object_transform, SceneNode};
use crate::store::{PrimitiveKind, SceneObject, VisualSource};

/// Local asset URIs use the `asset:` scheme; the path is handed to bevy's
/// asset server as-is. Anything else renders as a placeholder.
const ASSET_SCHEME: &str = "asset";

#[derive(Default)]
pub struct PrimitiveMeshRenderer;

impl PrimitiveMeshRenderer {
    fn primitive_mesh(kind: PrimitiveKind, meshes: &mut Assets<Mesh>) -> Handle<Mesh> {
        match kind {
            PrimitiveKind::Box => meshes.add(Cuboid::new(1.0, 1.0, 1.0)),
            PrimitiveKind::Sphere => meshes.add(Sphere::new(0.5)),
            PrimitiveKind::Cylinder => meshes.add(Cylinder::new(0.5, 1.0)),
            PrimitiveKind::Torus => meshes.add(Torus {
                minor_radius: 0.25,
                major_radius: 0.75,
            }),
            PrimitiveKind::Avatar => meshes.add(Capsule3d::new(0.3, 1.2)),
        }
    }

    fn local_asset_path(uri: &Url) -> Option<String> {
        if uri.scheme() != ASSET_SCHEME {
            return None;
        }
        let path = uri.path().trim_start_matches('/');
        (!path.is_empty()).then(|| path.to_string())
    }
}

impl ObjectRenderer for PrimitiveMeshRenderer {
    fn spawn_object(
        &self,
        commands: &mut Commands,
        meshes: &mut Assets<Mesh>,
        materials: &mut Assets<StandardMaterial>,
        asset_server: Option<&AssetServer>,
        object: &SceneObject,
    ) -> Entity {
        let transform = object_transform(object);
        let node = SceneNode {
            id: object.id.clone(),
        };

        if let Some(VisualSource::Model { uri }) = &object.visual {
            if let (Some(path), Some(server)) = (Self::local_asset_path(uri), asset_server) {
                let scene = server.load(GltfAssetLabel::Scene(0).from_asset(path));
                // glTF scene roots carry no mesh of their own; the manual
                // Aabb keeps them pickable.
                return commands
                    .spawn((
                        SceneRoot(scene),
                        transform,
                        node,
                        Aabb::from_min_max(Vec3::splat(-0.5), Vec3::splat(0.5)),
                    ))
                    .id();
            }
            // Remote or unknown scheme, or headless: placeholder box.
            return commands
                .spawn((
                    Mesh3d(Self::primitive_mesh(PrimitiveKind::Box, meshes)),
                    MeshMaterial3d(placeholder_material(materials)),
                    transform,
                    node,
                ))
                .id();
        }

        let kind = object.primitive_kind().unwrap_or(PrimitiveKind::Box);
        commands
            .spawn((
                Mesh3d(Self::primitive_mesh(kind, meshes)),
                MeshMaterial3d(object_material(materials, object.color.as_deref())),
                transform,
                node,
            ))
            .id()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::ecs::world::CommandQueue;

    fn spawn(object: &SceneObject) -> (World, Entity) {
        let mut world = World::new();
        let mut meshes = Assets::<Mesh>::default();
        let mut materials = Assets::<StandardMaterial>::default();
        let renderer = PrimitiveMeshRenderer;

        let mut queue = CommandQueue::default();
        let entity = {
            let mut commands = Commands::new(&mut queue, &world);
            renderer.spawn_object(&mut commands, &mut meshes, &mut materials, None, object)
        };
        queue.apply(&mut world);
        (world, entity)
    }

    #[test]
    fn primitive_spawns_meshed_node_with_transform() {
        let object = SceneObject::primitive("torus-1", PrimitiveKind::Torus)
            .at([2.0, 1.0, 0.0])
            .scaled(1.5);
        let (world, entity) = spawn(&object);

        assert_eq!(world.get::<SceneNode>(entity).unwrap().id, "torus-1");
        assert!(world.get::<Mesh3d>(entity).is_some());
        let transform = world.get::<Transform>(entity).unwrap();
        assert_eq!(transform.translation, Vec3::new(2.0, 1.0, 0.0));
        assert_eq!(transform.scale, Vec3::splat(1.5));
    }

    #[test]
    fn headless_model_falls_back_to_placeholder_mesh() {
        let uri: Url = "asset:models/chair.glb".parse().unwrap();
        let object = SceneObject::model("chair-1", uri);
        let (world, entity) = spawn(&object);

        assert!(world.get::<Mesh3d>(entity).is_some());
        assert!(world.get::<SceneRoot>(entity).is_none());
    }

    #[test]
    fn missing_visual_source_defaults_to_a_box() {
        let object: SceneObject = serde_json::from_str(
            r#"{"id":"mystery-1","position":[0,0,0],"rotation":[0,0,0],"scale":[1,1,1]}"#,
        )
        .unwrap();
        let (world, entity) = spawn(&object);
        assert!(world.get::<Mesh3d>(entity).is_some());
    }

    #[test]
    fn asset_scheme_paths_are_extracted() {
        let uri: Url = "asset:models/chair.glb".parse().unwrap();
        assert_eq!(
            PrimitiveMeshRenderer::local_asset_path(&uri).as_deref(),
            Some("models/chair.glb")
        );

        let remote: Url = "https://assets.example/chair.glb".parse().unwrap();
        assert!(PrimitiveMeshRenderer::local_asset_path(&remote).is_none());
    }
}
