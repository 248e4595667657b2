//! Renderer trait and default implementation.

mod meshes;

use bevy::prelude::*;

use crate::store::SceneObject;

pub use meshes::PrimitiveMeshRenderer;

/// Turns one stored object into an entity tree. Implementations must attach
/// [`crate::scene::SceneNode`] to the root entity they return so picking and
/// sync can find it again.
pub trait ObjectRenderer: Send + Sync + 'static {
    fn setup(&self, _app: &mut App) {}

    /// `asset_server` is absent in headless runs; implementations fall back
    /// to placeholder geometry for model sources in that case.
    fn spawn_object(
        &self,
        commands: &mut Commands,
        meshes: &mut Assets<Mesh>,
        materials: &mut Assets<StandardMaterial>,
        asset_server: Option<&AssetServer>,
        object: &SceneObject,
    ) -> Entity;
}

#[derive(Resource)]
pub struct RendererResource(pub Box<dyn ObjectRenderer>);

impl RendererResource {
    pub fn new(renderer: impl ObjectRenderer) -> Self {
        Self(Box::new(renderer))
    }
}
