//! Scene composition: entity sync, materials, and plot templates.

pub mod materials;
mod objects;
mod templates;

pub use objects::{
    object_transform, setup_scene, sync_scene_objects, transform_to_parts, SceneIndex, SceneNode,
};
pub use templates::{template_by_name, PlotTemplate, TemplateObject, TEMPLATES};
