//! NFT descriptors and provenance mapping.
//!
//! Adapter-facing types live here; the store stays chain-agnostic and only
//! sees the `nft:*` metadata strings written by this module.

use std::fmt;
use std::str::FromStr;

use alloy_chains::Chain;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::store::{SceneObject, VisualSource};

pub const META_CHAIN: &str = "nft:chain";
pub const META_COLLECTION: &str = "nft:collection";
pub const META_ITEM: &str = "nft:item";
pub const META_TX: &str = "nft:tx";
pub const META_IMPORT: &str = "nft:import";

/// Identity of the chain an NFT lives on: one Substrate-based chain or any
/// EVM chain.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "chain")]
pub enum ChainRef {
    Substrate(String),
    Evm(Chain),
}

impl fmt::Display for ChainRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChainRef::Substrate(name) => write!(f, "substrate:{name}"),
            ChainRef::Evm(chain) => write!(f, "evm:{chain}"),
        }
    }
}

impl FromStr for ChainRef {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once(':') {
            Some(("substrate", name)) if !name.is_empty() => {
                Ok(ChainRef::Substrate(name.to_string()))
            }
            Some(("evm", name)) => name
                .parse::<Chain>()
                .map(ChainRef::Evm)
                .map_err(|_| format!("unknown EVM chain: {name}")),
            _ => Err(format!("malformed chain ref: {s}")),
        }
    }
}

/// Whether the object entered the scene straight from its origin chain or
/// via the simulated cross-chain transfer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ImportKind {
    Direct,
    Xcm,
}

impl ImportKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImportKind::Direct => "direct",
            ImportKind::Xcm => "xcm",
        }
    }
}

/// Externally fetched NFT summary, as served by the relay's read endpoint.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NftDescriptor {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_uri: Option<Url>,
    pub chain: ChainRef,
    pub collection_id: u32,
    pub item_id: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tx_hash: Option<String>,
}

impl NftDescriptor {
    /// Maps the descriptor into a placeable object: the model reference when
    /// one exists (otherwise the renderer's default), plus provenance
    /// metadata flagging where it came from and how.
    pub fn into_scene_object(self, id: String, kind: ImportKind) -> SceneObject {
        let mut object = SceneObject {
            id,
            position: [0.0; 3],
            rotation: [0.0; 3],
            scale: [1.0; 3],
            visual: self.model_uri.map(|uri| VisualSource::Model { uri }),
            color: None,
            metadata: Default::default(),
        };
        object
            .metadata
            .insert(META_CHAIN.into(), self.chain.to_string());
        object
            .metadata
            .insert(META_COLLECTION.into(), self.collection_id.to_string());
        object
            .metadata
            .insert(META_ITEM.into(), self.item_id.to_string());
        if let Some(tx) = self.tx_hash {
            object.metadata.insert(META_TX.into(), tx);
        }
        object
            .metadata
            .insert(META_IMPORT.into(), kind.as_str().into());
        object
    }
}

/// Reads the provenance chain back off an object, if it has any.
pub fn provenance_chain(object: &SceneObject) -> Option<ChainRef> {
    object.metadata.get(META_CHAIN)?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_chains::NamedChain;

    #[test]
    fn chain_ref_display_parse_round_trip() {
        let refs = [
            ChainRef::Substrate("asset-hub".into()),
            ChainRef::Evm(Chain::from_named(NamedChain::Moonbeam)),
            ChainRef::Evm(Chain::sepolia()),
        ];
        for chain in refs {
            let parsed: ChainRef = chain.to_string().parse().unwrap();
            assert_eq!(parsed, chain);
        }
    }

    #[test]
    fn malformed_chain_ref_is_rejected() {
        assert!("asset-hub".parse::<ChainRef>().is_err());
        assert!("substrate:".parse::<ChainRef>().is_err());
        assert!("evm:not-a-chain".parse::<ChainRef>().is_err());
    }

    #[test]
    fn descriptor_maps_to_object_with_provenance() {
        let descriptor = NftDescriptor {
            name: "Genesis Chair".into(),
            model_uri: Some("https://assets.example/chair.glb".parse().unwrap()),
            chain: ChainRef::Evm(Chain::from_named(NamedChain::Moonbeam)),
            collection_id: 12,
            item_id: 7,
            tx_hash: Some("0xfeed".into()),
        };

        let object = descriptor.into_scene_object("chair-123".into(), ImportKind::Xcm);

        assert!(object.model_uri().is_some());
        assert_eq!(
            object.metadata.get(META_CHAIN).map(String::as_str),
            Some("evm:moonbeam")
        );
        assert_eq!(
            object.metadata.get(META_COLLECTION).map(String::as_str),
            Some("12")
        );
        assert_eq!(object.metadata.get(META_ITEM).map(String::as_str), Some("7"));
        assert_eq!(
            object.metadata.get(META_TX).map(String::as_str),
            Some("0xfeed")
        );
        assert_eq!(
            object.metadata.get(META_IMPORT).map(String::as_str),
            Some("xcm")
        );
        assert_eq!(
            provenance_chain(&object),
            Some(ChainRef::Evm(Chain::from_named(NamedChain::Moonbeam)))
        );
    }

    #[test]
    fn descriptor_without_model_leaves_visual_to_renderer_default() {
        let descriptor = NftDescriptor {
            name: "Bare token".into(),
            model_uri: None,
            chain: ChainRef::Substrate("asset-hub".into()),
            collection_id: 1,
            item_id: 1,
            tx_hash: None,
        };
        let object = descriptor.into_scene_object("bare-1".into(), ImportKind::Direct);
        assert!(object.visual.is_none());
    }
}
