use alloy::primitives::{
    Address,
    B256,
    Bytes,
};
use serde::{
    Deserialize,
    Serialize,
};

/// A root chain `headerBlocks(id)` entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderBlockRecord {
    pub root: B256,
    pub start: u64,
    pub end: u64,
    pub created_at: u64,
    pub proposer: Address,
}

impl HeaderBlockRecord {
    pub const fn contains(&self, block_number: u64) -> bool {
        self.start <= block_number && block_number <= self.end
    }
}

/// Response of the block inclusion query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockInclusion {
    #[serde(with = "hex_quantity")]
    pub header_block_number: u64,
    #[serde(with = "decimal")]
    pub block_number: u64,
    #[serde(with = "decimal")]
    pub start: u64,
    #[serde(with = "decimal")]
    pub end: u64,
    pub proposer: Address,
    pub root: B256,
    #[serde(with = "decimal")]
    pub created_at: u64,
    pub message: String,
}

impl BlockInclusion {
    pub fn new(header_block_number: u64, block_number: u64, record: HeaderBlockRecord) -> Self {
        Self {
            header_block_number,
            block_number,
            start: record.start,
            end: record.end,
            proposer: record.proposer,
            root: record.root,
            created_at: record.created_at,
            message: "success".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MerkleProof {
    pub proof: Bytes,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExitPayload {
    pub message: String,
    pub result: Bytes,
}

impl ExitPayload {
    pub fn new(result: Bytes) -> Self {
        Self {
            message: "Payload generation success".to_string(),
            result,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExitPayloads {
    pub message: String,
    pub result: Vec<Bytes>,
}

impl ExitPayloads {
    pub fn new(result: Vec<Bytes>) -> Self {
        Self {
            message: "Payload generation success".to_string(),
            result,
        }
    }
}

/// Integers rendered as decimal strings.
mod decimal {
    use serde::{
        Deserialize,
        Deserializer,
        Serializer,
        de::Error,
    };

    pub fn serialize<S: Serializer>(value: &u64, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(value)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(D::Error::custom)
    }
}

/// Integers rendered as `0x` prefixed hex strings.
mod hex_quantity {
    use serde::{
        Deserialize,
        Deserializer,
        Serializer,
        de::Error,
    };

    pub fn serialize<S: Serializer>(value: &u64, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&format_args!("{value:#x}"))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
        let s = String::deserialize(deserializer)?;
        let digits = s
            .strip_prefix("0x")
            .ok_or_else(|| D::Error::custom("missing 0x prefix"))?;
        u64::from_str_radix(digits, 16).map_err(D::Error::custom)
    }
}
