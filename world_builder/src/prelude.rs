//! Minimal prelude for SDK consumers.

pub use crate::chain::nft::{ChainRef, NftDescriptor};
pub use crate::render::{ObjectRenderer, PrimitiveMeshRenderer};
pub use crate::sdk::WorldBuilderBuilder;
pub use crate::store::{object_id, PrimitiveKind, SceneObject, VisualSource};
