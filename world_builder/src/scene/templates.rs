//! Hardcoded land-plot templates.
//!
//! Loading one bulk-replaces the store. Instantiation stamps fresh ids so a
//! template can be loaded repeatedly without colliding with its own static
//! entry names.

use crate::store::{now_millis, PrimitiveKind, SceneObject};

pub struct TemplateObject {
    pub id: &'static str,
    pub kind: PrimitiveKind,
    pub position: [f32; 3],
    pub color: &'static str,
    pub scale: f32,
}

pub struct PlotTemplate {
    pub name: &'static str,
    pub objects: &'static [TemplateObject],
}

pub const TEMPLATES: &[PlotTemplate] = &[
    PlotTemplate {
        name: "starter",
        objects: &[
            TemplateObject {
                id: "starter-floor",
                kind: PrimitiveKind::Box,
                position: [0.0, 0.05, 0.0],
                color: "#334155",
                scale: 4.0,
            },
            TemplateObject {
                id: "starter-orb",
                kind: PrimitiveKind::Sphere,
                position: [0.0, 1.0, 0.0],
                color: "#8B5CF6",
                scale: 1.0,
            },
        ],
    },
    PlotTemplate {
        name: "gallery",
        objects: &[
            TemplateObject {
                id: "gallery-plinth-left",
                kind: PrimitiveKind::Cylinder,
                position: [-2.0, 0.5, 0.0],
                color: "#E2E8F0",
                scale: 1.0,
            },
            TemplateObject {
                id: "gallery-plinth-right",
                kind: PrimitiveKind::Cylinder,
                position: [2.0, 0.5, 0.0],
                color: "#E2E8F0",
                scale: 1.0,
            },
            TemplateObject {
                id: "gallery-ring",
                kind: PrimitiveKind::Torus,
                position: [0.0, 1.5, -2.0],
                color: "#F59E0B",
                scale: 1.5,
            },
        ],
    },
    PlotTemplate {
        name: "garden",
        objects: &[
            TemplateObject {
                id: "garden-stone-a",
                kind: PrimitiveKind::Sphere,
                position: [-1.5, 0.3, 1.0],
                color: "#64748B",
                scale: 0.6,
            },
            TemplateObject {
                id: "garden-stone-b",
                kind: PrimitiveKind::Sphere,
                position: [1.2, 0.25, -0.8],
                color: "#475569",
                scale: 0.5,
            },
            TemplateObject {
                id: "garden-pillar",
                kind: PrimitiveKind::Cylinder,
                position: [0.0, 1.0, -2.5],
                color: "#10B981",
                scale: 1.0,
            },
            TemplateObject {
                id: "garden-keeper",
                kind: PrimitiveKind::Avatar,
                position: [0.5, 0.9, 1.5],
                color: "#F472B6",
                scale: 1.0,
            },
        ],
    },
];

pub fn template_by_name(name: &str) -> Option<&'static PlotTemplate> {
    TEMPLATES.iter().find(|t| t.name == name)
}

impl PlotTemplate {
    /// Builds the template's objects with generated ids (static id + stamp +
    /// index), distinct across repeated loads and from the static names.
    pub fn instantiate(&self) -> Vec<SceneObject> {
        let stamp = now_millis();
        self.objects
            .iter()
            .enumerate()
            .map(|(i, t)| {
                SceneObject::primitive(format!("{}-{stamp}-{i}", t.id), t.kind)
                    .at(t.position)
                    .colored(t.color)
                    .scaled(t.scale)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn instantiate_matches_entry_count_with_fresh_ids() {
        let template = template_by_name("gallery").unwrap();
        let objects = template.instantiate();

        assert_eq!(objects.len(), template.objects.len());

        let static_ids: HashSet<&str> = template.objects.iter().map(|t| t.id).collect();
        let generated: HashSet<&str> = objects.iter().map(|o| o.id.as_str()).collect();
        assert_eq!(generated.len(), objects.len(), "generated ids must be unique");
        assert!(generated.is_disjoint(&static_ids));
    }

    #[test]
    fn instantiated_objects_carry_template_fields() {
        let template = template_by_name("starter").unwrap();
        let objects = template.instantiate();

        assert_eq!(objects[1].color.as_deref(), Some("#8B5CF6"));
        assert_eq!(objects[1].position, [0.0, 1.0, 0.0]);
        assert_eq!(objects[0].scale, [4.0; 3]);
    }

    #[test]
    fn unknown_template_is_none() {
        assert!(template_by_name("castle").is_none());
    }
}
