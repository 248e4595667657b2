//! Blocking HTTP client for the mint relay.
//!
//! The relay brokers chain access: `POST /mint` submits an owner address and
//! arbitrary metadata and answers with a transaction hash plus the minted
//! collection/item ids; `GET /nft/{collection}/{item}` returns the stored
//! metadata. No auth, no idempotency key, no retries — a failed call ends
//! the operation and the user retries manually.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{ChainError, Result};

const REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MintRequest {
    pub owner: String,
    pub metadata: serde_json::Value,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MintReceipt {
    pub tx_hash: String,
    pub collection_id: u32,
    pub item_id: u32,
}

pub struct RelayClient {
    base: Url,
    agent: ureq::Agent,
}

impl RelayClient {
    pub fn new(base: Url) -> Self {
        let config = ureq::Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(REQUEST_TIMEOUT_SECS)))
            .build();
        Self {
            base,
            agent: config.into(),
        }
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    pub fn mint(&self, request: &MintRequest) -> Result<MintReceipt> {
        let url = self.endpoint("mint")?;
        let mut response = self.agent.post(url.as_str()).send_json(request)?;
        response
            .body_mut()
            .read_json()
            .map_err(|err| ChainError::Unexpected(format!("bad mint response: {err}")))
    }

    pub fn metadata(&self, collection_id: u32, item_id: u32) -> Result<serde_json::Value> {
        let url = self.endpoint(&format!("nft/{collection_id}/{item_id}"))?;
        let mut response = self.agent.get(url.as_str()).call()?;
        response
            .body_mut()
            .read_json()
            .map_err(|err| ChainError::Unexpected(format!("bad metadata response: {err}")))
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base
            .join(path)
            .map_err(|err| ChainError::Unexpected(format!("bad relay endpoint {path}: {err}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mint_request_serializes_with_flat_fields() {
        let request = MintRequest {
            owner: "5GrwvaEF5zXb26Fz9rcQpDWS57CtERHpNehXCPcNoHGKutQY".into(),
            metadata: serde_json::json!({ "name": "box-1", "scale": 1.0 }),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["owner"], request.owner);
        assert_eq!(json["metadata"]["name"], "box-1");
    }

    #[test]
    fn mint_receipt_deserializes_from_relay_shape() {
        let receipt: MintReceipt = serde_json::from_str(
            r#"{"tx_hash":"0xabc123","collection_id":42,"item_id":7}"#,
        )
        .unwrap();
        assert_eq!(
            receipt,
            MintReceipt {
                tx_hash: "0xabc123".into(),
                collection_id: 42,
                item_id: 7,
            }
        );
    }

    #[test]
    fn endpoint_joins_against_base() {
        let client = RelayClient::new("http://127.0.0.1:3001/".parse().unwrap());
        assert_eq!(
            client.endpoint("nft/1/2").unwrap().as_str(),
            "http://127.0.0.1:3001/nft/1/2"
        );
    }
}
