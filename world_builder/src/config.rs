//! Env parsing, defaults, and constants.

use std::env;
use std::path::PathBuf;

use alloy_chains::{Chain, NamedChain};
use url::Url;

use crate::chain::nft::ChainRef;

const DEFAULT_RELAY: &str = "http://127.0.0.1:3001";
const SCENE_FILE: &str = "scene.json";

/// Where the persisted object list lives. `SCENE_STORAGE_PATH` wins,
/// otherwise the platform data dir, otherwise the working directory.
pub fn storage_path() -> PathBuf {
    if let Ok(raw) = env::var("SCENE_STORAGE_PATH") {
        return PathBuf::from(raw);
    }
    dirs::data_dir()
        .map(|dir| dir.join("genesis-frame").join(SCENE_FILE))
        .unwrap_or_else(|| PathBuf::from(SCENE_FILE))
}

/// Base URL of the mint relay. `RELAY_URL` or the local default.
pub fn relay_url() -> Url {
    let raw = env::var("RELAY_URL").unwrap_or_else(|_| DEFAULT_RELAY.to_string());
    raw.parse().unwrap_or_else(|err| {
        panic!("genesis: invalid RELAY_URL {raw:?}: {err}");
    })
}

/// The minting account, if one is configured. Minting without it fails
/// with the wallet-absent error before any request goes out.
pub fn owner_address() -> Option<String> {
    env::var("OWNER_ADDRESS").ok().filter(|s| !s.is_empty())
}

/// Chain newly minted objects land on. `HOME_CHAIN` accepts the
/// `substrate:<name>` / `evm:<name>` forms; anything else falls back.
pub fn home_chain() -> ChainRef {
    match env::var("HOME_CHAIN") {
        Ok(raw) => raw.parse().unwrap_or_else(|err| {
            eprintln!("genesis: invalid HOME_CHAIN {raw:?} ({err}), using default");
            default_home_chain()
        }),
        Err(_) => default_home_chain(),
    }
}

fn default_home_chain() -> ChainRef {
    ChainRef::Substrate("asset-hub".to_string())
}

/// Fixed set of chains offered as simulated-transfer destinations.
pub fn destination_chains() -> Vec<ChainRef> {
    vec![
        ChainRef::Substrate("asset-hub".to_string()),
        ChainRef::Evm(Chain::from_named(NamedChain::Moonbeam)),
        ChainRef::Evm(Chain::from_named(NamedChain::Moonriver)),
        ChainRef::Evm(Chain::sepolia()),
    ]
}
