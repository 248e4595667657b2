//! Scene object store: data model, mutations, observers, persistence.

mod object;
mod persist;
#[allow(clippy::module_inception)]
mod store;

pub use object::{object_id, PrimitiveKind, SceneObject, VisualSource};
pub(crate) use object::now_millis;
pub use persist::{load_objects, JsonFileStore};
pub use store::{ObjectStore, StoreEvent, StoreObserver};

use bevy::prelude::Resource;

/// Bevy resource wrapping the authoritative store. All mutations happen on
/// the UI event loop; systems go through this resource.
#[derive(Resource)]
pub struct WorldStore(pub ObjectStore);
