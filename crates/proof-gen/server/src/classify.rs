use proof_gen_core::{
    ChainError,
    ErrorKind,
};

/// Maps a chain or bridge failure onto the retry contract.
///
/// Info kinds are definitive answers about the request itself and abort the
/// sweep. Everything else, including failures this function does not
/// recognise, is [`ErrorKind::Transient`].
pub fn classify(error: &ChainError) -> ErrorKind {
    match error {
        ChainError::BlockNotIncluded { .. } => ErrorKind::BlockNotIncluded,
        ChainError::IncorrectTx(_)
        | ChainError::EventLogNotFound { .. }
        | ChainError::TokenIndexOutOfRange { .. } => ErrorKind::IncorrectTx,
        ChainError::TxNotCheckpointed(_) => ErrorKind::TxNotCheckpointed,
        ChainError::Bridge { .. } => ErrorKind::BridgeError,
        ChainError::NullReceipt(_)
        | ChainError::Timeout(_)
        | ChainError::Rpc(_)
        | ChainError::MalformedResponse(_)
        | ChainError::Construction(_) => ErrorKind::Transient,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::B256;
    use std::time::Duration;

    #[test]
    fn definitive_answers_are_info() {
        let hash = B256::repeat_byte(1);
        let cases = [
            (
                ChainError::BlockNotIncluded {
                    block: 10,
                    last_checkpointed: 5,
                },
                ErrorKind::BlockNotIncluded,
            ),
            (ChainError::IncorrectTx(hash), ErrorKind::IncorrectTx),
            (
                ChainError::EventLogNotFound {
                    tx: hash,
                    event_signature: B256::ZERO,
                },
                ErrorKind::IncorrectTx,
            ),
            (
                ChainError::TokenIndexOutOfRange {
                    index: 3,
                    matching: 1,
                },
                ErrorKind::IncorrectTx,
            ),
            (ChainError::TxNotCheckpointed(hash), ErrorKind::TxNotCheckpointed),
            (
                ChainError::Bridge {
                    status: 400,
                    message: "bad".into(),
                },
                ErrorKind::BridgeError,
            ),
        ];
        for (error, kind) in cases {
            assert_eq!(classify(&error), kind, "{error:?}");
            assert!(kind.is_info());
        }
    }

    #[test]
    fn infrastructure_faults_are_transient() {
        let cases = [
            ChainError::NullReceipt(B256::ZERO),
            ChainError::Timeout(Duration::from_secs(10)),
            ChainError::Rpc("connection refused".into()),
            ChainError::MalformedResponse("unexpected".into()),
            ChainError::Construction("bad url".into()),
        ];
        for error in cases {
            assert_eq!(classify(&error), ErrorKind::Transient, "{error:?}");
        }
    }
}
