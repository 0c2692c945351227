//! The seam between request orchestration and the chain-specific work.
//!
//! A [`ChainClient`] is bound to exactly one [`Endpoint`] and lives for a single
//! attempt. The orchestrator asks a [`ChainClientFactory`] for a fresh client on
//! every attempt and drops it afterwards; clients are never cached or shared.

use crate::{
    ChainError,
    Endpoint,
    HeaderBlockRecord,
    Network,
};
use alloy::primitives::{
    B256,
    Bytes,
};
use async_trait::async_trait;

/// Inclusive range of child chain blocks covered by one header block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockRange {
    pub start: u64,
    pub end: u64,
}

impl BlockRange {
    pub const fn new(start: u64, end: u64) -> Self {
        Self { start, end }
    }

    pub const fn contains(&self, number: u64) -> bool {
        self.start <= number && number <= self.end
    }
}

/// The parts of a child chain receipt the orchestration layer cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReceiptInfo {
    pub transaction_hash: B256,
    pub block_number: u64,
}

#[async_trait]
pub trait ChainClient: Send + Sync {
    /// Highest child block covered by a submitted checkpoint.
    async fn last_checkpointed_child_block(&self) -> Result<u64, ChainError>;

    /// Id of the header block whose range contains `block_number`.
    async fn find_containing_header_block(&self, block_number: u64) -> Result<u64, ChainError>;

    async fn read_header_block_record(
        &self,
        header_block: u64,
    ) -> Result<HeaderBlockRecord, ChainError>;

    /// Child chain receipt for `hash`, `None` when the node returned null.
    async fn get_transaction_receipt_or_null(
        &self,
        hash: B256,
    ) -> Result<Option<ReceiptInfo>, ChainError>;

    /// Concatenated sibling hashes proving `leaf` inside `range`.
    async fn get_block_merkle_proof(&self, leaf: u64, range: BlockRange)
    -> Result<Bytes, ChainError>;

    async fn is_checkpointed(&self, hash: B256) -> Result<bool, ChainError> {
        let receipt = self
            .get_transaction_receipt_or_null(hash)
            .await?
            .ok_or(ChainError::NullReceipt(hash))?;
        let last_checkpointed = self.last_checkpointed_child_block().await?;
        Ok(receipt.block_number <= last_checkpointed)
    }

    /// Exit payload for the `token_index`-th matching event of the burn transaction.
    async fn build_exit_payload(
        &self,
        hash: B256,
        event_signature: B256,
        token_index: usize,
    ) -> Result<Bytes, ChainError>;

    /// One exit payload per matching event of the burn transaction.
    async fn build_all_exit_payloads(
        &self,
        hash: B256,
        event_signature: B256,
    ) -> Result<Vec<Bytes>, ChainError>;
}

#[async_trait]
pub trait ChainClientFactory: Send + Sync {
    type Client: ChainClient + 'static;

    async fn construct(
        &self,
        network: Network,
        endpoint: &Endpoint,
    ) -> Result<Self::Client, ChainError>;
}
