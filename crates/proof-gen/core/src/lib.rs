//! Types shared between the proof generation server and its chain clients.

mod chain;
mod error;
mod network;
mod types;

pub use chain::{
    BlockRange,
    ChainClient,
    ChainClientFactory,
    ReceiptInfo,
};
pub use error::{
    ChainError,
    ErrorKind,
    ErrorResponse,
};
pub use network::{
    Endpoint,
    Network,
};
pub use types::{
    BlockInclusion,
    ExitPayload,
    ExitPayloads,
    HeaderBlockRecord,
    MerkleProof,
};
