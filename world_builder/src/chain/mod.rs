//! Chain bridge: one worker thread, commands out, outcomes back.
//!
//! All store mutations stay on the UI event loop: the worker only talks to
//! the relay (or runs the simulated transfer) and reports an outcome, which
//! `apply_chain_outcomes` drains each frame and applies synchronously.

pub mod nft;
pub mod relay;
mod request;
pub mod xcm;

use std::thread;

use bevy::prelude::*;
use crossbeam_channel::{Receiver, Sender};
use serde_json::Value;

use crate::error::ChainError;
use crate::store::{now_millis, object_id, WorldStore};
use crate::ui::Notifications;

use nft::{ChainRef, ImportKind, NftDescriptor, META_CHAIN, META_COLLECTION, META_IMPORT, META_ITEM, META_TX};
use relay::{MintReceipt, MintRequest, RelayClient};
use xcm::{simulated_transfer, XcmReceipt};

pub use nft::provenance_chain;
pub use request::RequestState;

#[derive(Clone, Debug)]
pub enum ChainCommand {
    Mint {
        object_id: String,
        owner: String,
        metadata: Value,
    },
    Import {
        collection_id: u32,
        item_id: u32,
    },
    XcmTransfer {
        object_id: String,
        destination: ChainRef,
    },
}

impl ChainCommand {
    pub fn label(&self) -> String {
        match self {
            ChainCommand::Mint { object_id, .. } => format!("mint {object_id}"),
            ChainCommand::Import {
                collection_id,
                item_id,
            } => format!("import {collection_id}/{item_id}"),
            ChainCommand::XcmTransfer { object_id, .. } => format!("transfer {object_id}"),
        }
    }
}

#[derive(Clone, Debug)]
pub enum ChainOutcome {
    Minted {
        object_id: String,
        chain: ChainRef,
        receipt: MintReceipt,
    },
    Imported {
        descriptor: NftDescriptor,
    },
    Transferred {
        object_id: String,
        receipt: XcmReceipt,
    },
    Failed {
        label: String,
        error: String,
    },
}

/// Bevy resource holding both ends the UI sees. Systems drain `outcomes`
/// in `apply_chain_outcomes`.
#[derive(Resource)]
pub struct ChainBridge {
    commands: Sender<ChainCommand>,
    outcomes: Receiver<ChainOutcome>,
}

impl ChainBridge {
    /// Queues a command for the worker. Returns `false` if the worker is
    /// gone, which only happens during shutdown.
    pub fn submit(&self, command: ChainCommand) -> bool {
        self.commands.send(command).is_ok()
    }
}

/// Spawns the chain worker on a dedicated thread and returns the bridge.
pub fn init_chain_bridge(relay: RelayClient, home_chain: ChainRef) -> ChainBridge {
    let (command_tx, command_rx) = crossbeam_channel::bounded(64);
    let (outcome_tx, outcome_rx) = crossbeam_channel::bounded(64);

    thread::spawn(move || worker_loop(relay, home_chain, command_rx, outcome_tx));

    ChainBridge {
        commands: command_tx,
        outcomes: outcome_rx,
    }
}

fn worker_loop(
    relay: RelayClient,
    home_chain: ChainRef,
    commands: Receiver<ChainCommand>,
    outcomes: Sender<ChainOutcome>,
) {
    while let Ok(command) = commands.recv() {
        let outcome = run_command(&relay, &home_chain, command);
        if outcomes.send(outcome).is_err() {
            return;
        }
    }
}

fn run_command(relay: &RelayClient, home_chain: &ChainRef, command: ChainCommand) -> ChainOutcome {
    let label = command.label();
    match command {
        ChainCommand::Mint {
            object_id,
            owner,
            metadata,
        } => match relay.mint(&MintRequest { owner, metadata }) {
            Ok(receipt) => {
                eprintln!("genesis: minted {object_id} as {}", receipt.tx_hash);
                ChainOutcome::Minted {
                    object_id,
                    chain: home_chain.clone(),
                    receipt,
                }
            }
            Err(err) => failed(label, err),
        },
        ChainCommand::Import {
            collection_id,
            item_id,
        } => match relay.metadata(collection_id, item_id) {
            Ok(value) => ChainOutcome::Imported {
                descriptor: descriptor_from_metadata(
                    value,
                    collection_id,
                    item_id,
                    home_chain.clone(),
                ),
            },
            Err(err) => failed(label, err),
        },
        ChainCommand::XcmTransfer {
            object_id,
            destination,
        } => {
            let receipt = simulated_transfer(&object_id, &destination, now_millis());
            ChainOutcome::Transferred { object_id, receipt }
        }
    }
}

fn failed(label: String, err: ChainError) -> ChainOutcome {
    eprintln!("genesis: {label} failed: {err}");
    ChainOutcome::Failed {
        label,
        error: err.to_string(),
    }
}

/// The relay's read endpoint returns whatever metadata the minter stored;
/// name and model URI are pulled from it when present, the rest comes from
/// the request itself.
fn descriptor_from_metadata(
    value: Value,
    collection_id: u32,
    item_id: u32,
    chain: ChainRef,
) -> NftDescriptor {
    let name = value
        .get("name")
        .and_then(Value::as_str)
        .unwrap_or("nft")
        .to_string();
    let model_uri = value
        .get("model_uri")
        .and_then(Value::as_str)
        .and_then(|s| s.parse().ok());
    NftDescriptor {
        name,
        model_uri,
        chain,
        collection_id,
        item_id,
        tx_hash: value
            .get("tx_hash")
            .and_then(Value::as_str)
            .map(str::to_string),
    }
}

const MAX_OUTCOMES_PER_FRAME: usize = 4;

/// Drains worker outcomes (bounded per frame) and applies them to the store,
/// the request state, and the notification queue.
pub fn apply_chain_outcomes(
    bridge: Res<ChainBridge>,
    mut store: ResMut<WorldStore>,
    mut request: ResMut<RequestState>,
    mut notices: ResMut<Notifications>,
) {
    let mut applied = 0usize;
    while applied < MAX_OUTCOMES_PER_FRAME {
        match bridge.outcomes.try_recv() {
            Ok(outcome) => {
                apply_outcome(outcome, &mut store, &mut request, &mut notices);
                applied += 1;
            }
            Err(_) => break,
        }
    }
}

fn apply_outcome(
    outcome: ChainOutcome,
    store: &mut WorldStore,
    request: &mut RequestState,
    notices: &mut Notifications,
) {
    match outcome {
        ChainOutcome::Minted {
            object_id,
            chain,
            receipt,
        } => {
            store.0.set_metadata(&object_id, META_CHAIN, &chain.to_string());
            store.0.set_metadata(
                &object_id,
                META_COLLECTION,
                &receipt.collection_id.to_string(),
            );
            store
                .0
                .set_metadata(&object_id, META_ITEM, &receipt.item_id.to_string());
            store.0.set_metadata(&object_id, META_TX, &receipt.tx_hash);
            request.succeed(format!("mint {object_id}"));
            notices.info(format!("minted {object_id}: {}", receipt.tx_hash));
        }
        ChainOutcome::Imported { descriptor } => {
            let id = object_id(&descriptor.name);
            let label = format!(
                "import {}/{}",
                descriptor.collection_id, descriptor.item_id
            );
            store
                .0
                .add(descriptor.into_scene_object(id.clone(), ImportKind::Direct));
            request.succeed(label.clone());
            notices.info(format!("{label} placed as {id}"));
        }
        ChainOutcome::Transferred { object_id, receipt } => {
            store.0.set_metadata(
                &object_id,
                META_CHAIN,
                &receipt.destination.to_string(),
            );
            store.0.set_metadata(&object_id, META_TX, &receipt.tx_hash);
            store
                .0
                .set_metadata(&object_id, META_IMPORT, ImportKind::Xcm.as_str());
            request.succeed(format!("transfer {object_id}"));
            notices.info(format!(
                "{object_id} now on {}: {}",
                receipt.destination, receipt.tx_hash
            ));
        }
        ChainOutcome::Failed { label, error } => {
            request.fail(label.clone(), error.clone());
            notices.error(format!("{label} failed: {error}"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_chains::Chain;

    #[test]
    fn descriptor_from_metadata_reads_known_fields() {
        let value = serde_json::json!({
            "name": "Genesis Chair",
            "model_uri": "https://assets.example/chair.glb",
            "tx_hash": "0xdead",
        });
        let descriptor =
            descriptor_from_metadata(value, 3, 9, ChainRef::Substrate("asset-hub".into()));
        assert_eq!(descriptor.name, "Genesis Chair");
        assert!(descriptor.model_uri.is_some());
        assert_eq!(descriptor.collection_id, 3);
        assert_eq!(descriptor.item_id, 9);
        assert_eq!(descriptor.tx_hash.as_deref(), Some("0xdead"));
    }

    #[test]
    fn descriptor_from_bare_metadata_falls_back() {
        let descriptor = descriptor_from_metadata(
            serde_json::json!({}),
            1,
            2,
            ChainRef::Evm(Chain::sepolia()),
        );
        assert_eq!(descriptor.name, "nft");
        assert!(descriptor.model_uri.is_none());
        assert!(descriptor.tx_hash.is_none());
    }

    #[test]
    fn command_labels_name_the_operation() {
        let mint = ChainCommand::Mint {
            object_id: "box-1".into(),
            owner: "0xo".into(),
            metadata: Value::Null,
        };
        assert_eq!(mint.label(), "mint box-1");
        let import = ChainCommand::Import {
            collection_id: 4,
            item_id: 2,
        };
        assert_eq!(import.label(), "import 4/2");
    }
}
