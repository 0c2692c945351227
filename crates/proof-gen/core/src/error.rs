use alloy::primitives::B256;
use serde::{
    Deserialize,
    Serialize,
};
use std::time::Duration;

/// Classification of a failed chain or bridge operation.
///
/// Every kind except [`ErrorKind::Transient`] is an *info* kind: the request was
/// valid and the answer is a definitive negative one, so no other endpoint can
/// change it. Transient failures are local to the endpoint that produced them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    #[serde(rename = "no_block_found")]
    BlockNotIncluded,
    #[serde(rename = "incorrect_transaction")]
    IncorrectTx,
    #[serde(rename = "transaction_not_checkpointed")]
    TxNotCheckpointed,
    #[serde(rename = "bridge_error")]
    BridgeError,
    #[serde(rename = "transient")]
    Transient,
}

impl ErrorKind {
    pub const fn is_info(self) -> bool {
        !matches!(self, Self::Transient)
    }
}

/// Failures produced by chain clients, their factories and the bridge API.
///
/// The `Display` output of info variants is the message returned to callers.
#[derive(Debug, thiserror::Error)]
pub enum ChainError {
    #[error("No block found")]
    BlockNotIncluded { block: u64, last_checkpointed: u64 },
    #[error("Incorrect burn transaction")]
    IncorrectTx(B256),
    #[error("Burn transaction has not been checkpointed yet")]
    TxNotCheckpointed(B256),
    #[error("Event Signature log not found in tx receipt")]
    EventLogNotFound { tx: B256, event_signature: B256 },
    #[error("Index is greater than the number of tokens in this transaction")]
    TokenIndexOutOfRange { index: usize, matching: usize },
    #[error("{message}")]
    Bridge { status: u16, message: String },
    #[error("null receipt received for {0}")]
    NullReceipt(B256),
    #[error("rpc call timed out after {0:?}")]
    Timeout(Duration),
    #[error("rpc error: {0}")]
    Rpc(String),
    #[error("malformed response: {0}")]
    MalformedResponse(String),
    #[error("failed to construct chain client: {0}")]
    Construction(String),
}

/// Body returned for every failed request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<ErrorKind>,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(kind: Option<ErrorKind>, message: impl Into<String>) -> Self {
        Self {
            error: true,
            kind,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn info_kinds() {
        assert!(ErrorKind::BlockNotIncluded.is_info());
        assert!(ErrorKind::IncorrectTx.is_info());
        assert!(ErrorKind::TxNotCheckpointed.is_info());
        assert!(ErrorKind::BridgeError.is_info());
        assert!(!ErrorKind::Transient.is_info());
    }

    #[test]
    fn error_kind_wire_names() {
        assert_eq!(
            serde_json::to_string(&ErrorKind::BlockNotIncluded).unwrap(),
            "\"no_block_found\""
        );
        assert_eq!(
            serde_json::to_string(&ErrorKind::TxNotCheckpointed).unwrap(),
            "\"transaction_not_checkpointed\""
        );
    }

    #[test]
    fn error_response_omits_missing_kind() {
        let body = serde_json::to_value(ErrorResponse::new(None, "boom")).unwrap();
        assert_eq!(body, serde_json::json!({ "error": true, "message": "boom" }));
    }
}
