//! Validation of path and query parameters.

use super::response::ApiError;
use alloy::primitives::B256;
use proof_gen_chain::MAX_PROOF_RANGE;
use proof_gen_core::Network;
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub struct FastMerkleProofQuery {
    pub start: Option<String>,
    pub end: Option<String>,
    pub number: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExitPayloadQuery {
    pub event_signature: Option<String>,
    pub token_index: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ZkEvmQuery {
    pub net_id: Option<String>,
    pub deposit_cnt: Option<String>,
}

/// `matic`/`mainnet` or `mumbai`/`amoy`/`testnet`.
pub fn v1_network(raw: &str) -> Result<Network, ApiError> {
    match raw {
        "matic" => Ok(Network::Mainnet),
        "mumbai" | "amoy" => Ok(Network::Testnet),
        other => other.parse().map_err(ApiError::bad_request),
    }
}

/// `mainnet` or `testnet`/`cardona`.
pub fn zkevm_network(raw: &str) -> Result<Network, ApiError> {
    match raw {
        "cardona" => Ok(Network::Testnet),
        other => other.parse().map_err(ApiError::bad_request),
    }
}

/// A non-negative decimal integer, surrounding whitespace and leading zeros
/// allowed.
pub fn integer(raw: &str) -> Option<u64> {
    let digits = raw.trim();
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

pub fn block_number(raw: &str) -> Result<u64, ApiError> {
    integer(raw).ok_or_else(|| ApiError::bad_request("Invalid block number!"))
}

/// `(start, end, number)` with `start <= number <= end`, spanning at most
/// [`MAX_PROOF_RANGE`] blocks.
pub fn fast_merkle_proof(query: &FastMerkleProofQuery) -> Result<(u64, u64, u64), ApiError> {
    let parse = |value: &Option<String>| value.as_deref().and_then(integer);
    match (parse(&query.start), parse(&query.end), parse(&query.number)) {
        (Some(start), Some(end), Some(number))
            if start <= number && number <= end && end - start < MAX_PROOF_RANGE =>
        {
            Ok((start, end, number))
        }
        _ => Err(ApiError::bad_request("Invalid start or end or block numbers!")),
    }
}

/// Burn transaction hash, event signature and token index (default 0).
pub fn exit_payload(
    burn_tx: &str,
    query: &ExitPayloadQuery,
) -> Result<(B256, B256, usize), ApiError> {
    let (burn_tx, event_signature) = burn_tx_and_signature(burn_tx, query)?;
    let token_index = match query.token_index.as_deref() {
        None => 0,
        Some(raw) => {
            integer(raw)
                .and_then(|index| usize::try_from(index).ok())
                .ok_or_else(|| ApiError::bad_request("Invalid token index!"))?
        }
    };
    Ok((burn_tx, event_signature, token_index))
}

pub fn burn_tx_and_signature(
    burn_tx: &str,
    query: &ExitPayloadQuery,
) -> Result<(B256, B256), ApiError> {
    let event_signature = query.event_signature.as_deref().unwrap_or_default();
    if burn_tx.is_empty() || event_signature.is_empty() {
        return Err(ApiError::bad_request("Burn tx or Event Signature missing!"));
    }
    match (hash(burn_tx), hash(event_signature)) {
        (Some(burn_tx), Some(event_signature)) => Ok((burn_tx, event_signature)),
        _ => Err(ApiError::bad_request("Incorrect Burn tx or Event Signature!")),
    }
}

/// `0x` followed by 64 hex digits.
fn hash(raw: &str) -> Option<B256> {
    if raw.len() != 66 || !raw.starts_with("0x") {
        return None;
    }
    raw.parse().ok()
}

pub fn zkevm(query: &ZkEvmQuery) -> Result<(u64, u64), ApiError> {
    let parse = |value: &Option<String>| value.as_deref().and_then(integer);
    match (parse(&query.net_id), parse(&query.deposit_cnt)) {
        (Some(net_id), Some(deposit_cnt)) => Ok((net_id, deposit_cnt)),
        _ => Err(ApiError::bad_request("Invalid net_id or deposit_cnt!")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HASH: &str = "0x1c20c4a1fe7a2d9e3a8a1f1fb2d9c6ac0f5ee4c5a8c2b4e1d7c0b4a2f3e4d5c6";

    fn some(s: &str) -> Option<String> {
        Some(s.to_string())
    }

    #[test]
    fn integers() {
        assert_eq!(integer("42"), Some(42));
        assert_eq!(integer(" 007 "), Some(7));
        assert_eq!(integer("0"), Some(0));
        assert_eq!(integer(""), None);
        assert_eq!(integer("  "), None);
        assert_eq!(integer("-1"), None);
        assert_eq!(integer("+1"), None);
        assert_eq!(integer("1e3"), None);
        assert_eq!(integer("1.5"), None);
        assert_eq!(integer("0x10"), None);
        assert_eq!(integer("99999999999999999999999"), None);
    }

    #[test]
    fn networks() {
        assert_eq!(v1_network("matic").unwrap(), Network::Mainnet);
        assert_eq!(v1_network("mainnet").unwrap(), Network::Mainnet);
        assert_eq!(v1_network("mumbai").unwrap(), Network::Testnet);
        assert_eq!(v1_network("amoy").unwrap(), Network::Testnet);
        assert!(v1_network("cardona").is_err());
        assert!(v1_network("Matic").is_err());

        assert_eq!(zkevm_network("mainnet").unwrap(), Network::Mainnet);
        assert_eq!(zkevm_network("cardona").unwrap(), Network::Testnet);
        assert!(zkevm_network("matic").is_err());
    }

    #[test]
    fn fast_merkle_proof_bounds() {
        let query = |start, end, number| {
            FastMerkleProofQuery {
                start: some(start),
                end: some(end),
                number: some(number),
            }
        };
        assert_eq!(fast_merkle_proof(&query("10", "20", "15")).unwrap(), (10, 20, 15));
        assert_eq!(fast_merkle_proof(&query("10", "10", "10")).unwrap(), (10, 10, 10));

        for (start, end, number) in [
            ("10", "20", "21"),
            ("10", "20", "9"),
            ("20", "10", "15"),
            ("a", "20", "15"),
            ("0", "18446744073709551615", "0"),
            ("0", "1048576", "7"),
        ] {
            let err = fast_merkle_proof(&query(start, end, number)).unwrap_err();
            assert_eq!(err.message(), "Invalid start or end or block numbers!");
        }
        assert!(fast_merkle_proof(&FastMerkleProofQuery::default()).is_err());
        assert_eq!(
            fast_merkle_proof(&query("5", "1048580", "1048580")).unwrap(),
            (5, 1_048_580, 1_048_580)
        );
    }

    #[test]
    fn exit_payload_params() {
        let query = ExitPayloadQuery {
            event_signature: some(HASH),
            token_index: None,
        };
        let (burn_tx, signature, token_index) = exit_payload(HASH, &query).unwrap();
        assert_eq!(burn_tx, signature);
        assert_eq!(token_index, 0);

        let query = ExitPayloadQuery {
            event_signature: some(HASH),
            token_index: some("3"),
        };
        assert_eq!(exit_payload(HASH, &query).unwrap().2, 3);
    }

    #[test]
    fn exit_payload_rejections() {
        let missing = ExitPayloadQuery::default();
        assert_eq!(
            exit_payload(HASH, &missing).unwrap_err().message(),
            "Burn tx or Event Signature missing!"
        );

        let query = ExitPayloadQuery {
            event_signature: some(HASH),
            token_index: None,
        };
        let non_hex = "0xzz20c4a1fe7a2d9e3a8a1f1fb2d9c6ac0f5ee4c5a8c2b4e1d7c0b4a2f3e4d5c6";
        for bad in [&HASH[2..], &HASH[..65], non_hex] {
            assert_eq!(
                exit_payload(bad, &query).unwrap_err().message(),
                "Incorrect Burn tx or Event Signature!"
            );
        }

        let query = ExitPayloadQuery {
            event_signature: some(HASH),
            token_index: some("first"),
        };
        assert_eq!(
            exit_payload(HASH, &query).unwrap_err().message(),
            "Invalid token index!"
        );
    }

    #[test]
    fn zkevm_params() {
        let query = ZkEvmQuery {
            net_id: some("1"),
            deposit_cnt: some("12"),
        };
        assert_eq!(zkevm(&query).unwrap(), (1, 12));
        assert!(zkevm(&ZkEvmQuery::default()).is_err());
    }
}
