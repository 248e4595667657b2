//! Error types for chain-facing operations.

use thiserror::Error;

/// Failure taxonomy surfaced at the UI action boundary. No operation
/// retries automatically; a failure resets the request state and waits for
/// the user.
#[derive(Debug, Error)]
pub enum ChainError {
    #[error("network error: {0}")]
    Network(String),

    #[error("no owner account configured")]
    WalletAbsent,

    #[error("unexpected error: {0}")]
    Unexpected(String),
}

impl From<ureq::Error> for ChainError {
    fn from(err: ureq::Error) -> Self {
        match err {
            ureq::Error::StatusCode(code) => ChainError::Network(format!("relay returned {code}")),
            other => ChainError::Network(other.to_string()),
        }
    }
}

impl From<serde_json::Error> for ChainError {
    fn from(err: serde_json::Error) -> Self {
        ChainError::Unexpected(format!("bad relay payload: {err}"))
    }
}

pub type Result<T> = std::result::Result<T, ChainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_code_maps_to_network_error() {
        let err: ChainError = ureq::Error::StatusCode(503).into();
        assert!(matches!(err, ChainError::Network(_)));
        assert!(err.to_string().contains("503"));
    }

    #[test]
    fn wallet_absent_message_is_actionable() {
        assert_eq!(
            ChainError::WalletAbsent.to_string(),
            "no owner account configured"
        );
    }
}
