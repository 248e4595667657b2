//! World builder — a persisted 3D space you can walk, furnish, and mint
//! from.
//!
//! Library root: store, scene, chain bridge, SDK builder, and config
//! modules.

pub mod camera;
pub mod chain;
pub mod config;
mod error;
pub mod render;
pub mod scene;
pub mod store;
mod ui;

pub mod prelude;
pub mod sdk;

pub use error::{ChainError, Result};
pub use store::{object_id, ObjectStore, PrimitiveKind, SceneObject, VisualSource, WorldStore};
pub use ui::Notifications;
