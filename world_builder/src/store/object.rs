// Persisted scene object model.
// Chain/adapter-specific types stay in chain/; conversion happens there.

use std::collections::BTreeMap;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use url::Url;

/// Fixed set of primitive shapes the renderer knows how to mesh.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrimitiveKind {
    Box,
    Sphere,
    Cylinder,
    Torus,
    Avatar,
}

impl PrimitiveKind {
    pub const ALL: [PrimitiveKind; 5] = [
        PrimitiveKind::Box,
        PrimitiveKind::Sphere,
        PrimitiveKind::Cylinder,
        PrimitiveKind::Torus,
        PrimitiveKind::Avatar,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            PrimitiveKind::Box => "box",
            PrimitiveKind::Sphere => "sphere",
            PrimitiveKind::Cylinder => "cylinder",
            PrimitiveKind::Torus => "torus",
            PrimitiveKind::Avatar => "avatar",
        }
    }
}

/// What an object looks like: a referenced model or a primitive shape.
/// An object carries at most one source; `None` means the renderer picks
/// its default representation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VisualSource {
    Model { uri: Url },
    Primitive { kind: PrimitiveKind },
}

/// A single placed item: transform, visual source, and free-form metadata.
/// NFT/XCM provenance lives in `metadata` under the `nft:*` keys written by
/// the chain module.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SceneObject {
    pub id: String,
    pub position: [f32; 3],
    pub rotation: [f32; 3],
    pub scale: [f32; 3],
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visual: Option<VisualSource>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, String>,
}

impl SceneObject {
    pub fn primitive(id: impl Into<String>, kind: PrimitiveKind) -> Self {
        Self {
            id: id.into(),
            position: [0.0; 3],
            rotation: [0.0; 3],
            scale: [1.0; 3],
            visual: Some(VisualSource::Primitive { kind }),
            color: None,
            metadata: BTreeMap::new(),
        }
    }

    pub fn model(id: impl Into<String>, uri: Url) -> Self {
        Self {
            id: id.into(),
            position: [0.0; 3],
            rotation: [0.0; 3],
            scale: [1.0; 3],
            visual: Some(VisualSource::Model { uri }),
            color: None,
            metadata: BTreeMap::new(),
        }
    }

    pub fn at(mut self, position: [f32; 3]) -> Self {
        self.position = position;
        self
    }

    pub fn colored(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn scaled(mut self, factor: f32) -> Self {
        self.scale = [factor; 3];
        self
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    pub fn primitive_kind(&self) -> Option<PrimitiveKind> {
        match self.visual {
            Some(VisualSource::Primitive { kind }) => Some(kind),
            _ => None,
        }
    }

    pub fn model_uri(&self) -> Option<&Url> {
        match &self.visual {
            Some(VisualSource::Model { uri }) => Some(uri),
            _ => None,
        }
    }
}

/// Conventional object id: name plus creation timestamp in millis.
/// Uniqueness is the caller's concern; the store does not dedup.
pub fn object_id(name: &str) -> String {
    format!("{name}-{}", now_millis())
}

pub(crate) fn now_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primitive_constructor_sets_kind_and_defaults() {
        let obj = SceneObject::primitive("box-1", PrimitiveKind::Box)
            .colored("#8B5CF6")
            .scaled(1.0);

        assert_eq!(obj.primitive_kind(), Some(PrimitiveKind::Box));
        assert_eq!(obj.color.as_deref(), Some("#8B5CF6"));
        assert_eq!(obj.scale, [1.0; 3]);
        assert_eq!(obj.position, [0.0; 3]);
        assert!(obj.model_uri().is_none());
    }

    #[test]
    fn model_and_primitive_sources_are_exclusive() {
        let uri: Url = "https://assets.example/chair.glb".parse().unwrap();
        let obj = SceneObject::model("chair-1", uri.clone());

        assert_eq!(obj.model_uri(), Some(&uri));
        assert!(obj.primitive_kind().is_none());
    }

    #[test]
    fn serde_round_trip_preserves_all_fields() {
        let obj = SceneObject::primitive("torus-5", PrimitiveKind::Torus)
            .at([1.5, 0.5, -3.0])
            .colored("#00FFAA")
            .with_metadata("nft:chain", "evm:moonbeam");

        let json = serde_json::to_string(&obj).unwrap();
        let back: SceneObject = serde_json::from_str(&json).unwrap();
        assert_eq!(back, obj);
    }

    #[test]
    fn object_without_visual_source_deserializes() {
        let back: SceneObject = serde_json::from_str(
            r#"{"id":"mystery-1","position":[0,0,0],"rotation":[0,0,0],"scale":[1,1,1]}"#,
        )
        .unwrap();
        assert!(back.visual.is_none());
        assert!(back.metadata.is_empty());
    }

    #[test]
    fn object_id_embeds_name() {
        let id = object_id("sphere");
        assert!(id.starts_with("sphere-"));
    }
}
