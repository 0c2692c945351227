use crate::{
    block_proof::fast_merkle_proof,
    exit_payload::{
        ExitPayloadParts,
        LogSelection,
        encode_exit_payload,
        matching_log_indices,
        receipt_proof,
        select_logs,
        state_sync_tx_hash,
    },
    receipt::encode_rpc_receipt,
    root_chain::{
        IRootChain::IRootChainInstance,
        search_header_block,
    },
};
use alloy::{
    eips::BlockId,
    primitives::{
        Address,
        B256,
        Bytes,
        U256,
    },
    providers::{
        Provider,
        RootProvider,
    },
};
use async_trait::async_trait;
use proof_gen_core::{
    BlockRange,
    ChainClient,
    ChainError,
    HeaderBlockRecord,
    ReceiptInfo,
};
use std::{
    fmt::Display,
    future::IntoFuture,
    time::Duration,
};
use tracing::{
    debug,
    trace,
};

/// Chain client bound to one child node and one parent node.
#[derive(Clone)]
pub struct RpcChainClient {
    child: RootProvider,
    root_chain: IRootChainInstance<RootProvider>,
    timeout: Duration,
}

impl RpcChainClient {
    pub fn new(
        child: RootProvider,
        parent: RootProvider,
        root_chain: Address,
        timeout: Duration,
    ) -> Self {
        Self {
            child,
            root_chain: IRootChainInstance::new(root_chain, parent),
            timeout,
        }
    }

    /// Awaits an RPC call, bounding it by the per-call timeout.
    async fn timed<F, T, E>(&self, call: F) -> Result<T, ChainError>
    where
        F: IntoFuture<Output = Result<T, E>>,
        E: Display,
    {
        match tokio::time::timeout(self.timeout, call).await {
            Ok(result) => result.map_err(|e| ChainError::Rpc(e.to_string())),
            Err(_) => Err(ChainError::Timeout(self.timeout)),
        }
    }

    async fn current_header_block(&self) -> Result<u64, ChainError> {
        let current = self.timed(self.root_chain.currentHeaderBlock().call()).await?;
        to_u64(current, "currentHeaderBlock")
    }

    /// `eth_getRootHash(start, end)`, bor's merkle root over a block range.
    async fn root_hash(&self, start: u64, end: u64) -> Result<B256, ChainError> {
        let root: String = self
            .timed(
                self.child
                    .raw_request::<_, String>("eth_getRootHash".into(), (start, end)),
            )
            .await?;
        let root = if root.starts_with("0x") {
            root
        } else {
            format!("0x{root}")
        };
        root.parse::<B256>()
            .map_err(|e| ChainError::MalformedResponse(format!("eth_getRootHash: {e}")))
    }

    async fn exit_payloads(
        &self,
        hash: B256,
        event_signature: B256,
        selection: LogSelection,
    ) -> Result<Vec<Bytes>, ChainError> {
        let receipt = self
            .timed(self.child.get_transaction_receipt(hash))
            .await?
            .ok_or(ChainError::NullReceipt(hash))?;
        let (Some(block_number), Some(tx_index)) =
            (receipt.block_number, receipt.transaction_index)
        else {
            return Err(ChainError::IncorrectTx(hash));
        };

        if block_number > self.last_checkpointed_child_block().await? {
            return Err(ChainError::TxNotCheckpointed(hash));
        }

        let matching = matching_log_indices(
            receipt.inner.logs().iter().map(|log| &log.inner),
            event_signature,
        );
        let log_indices = select_logs(matching, selection, hash, event_signature)?;

        let header_block = self.find_containing_header_block(block_number).await?;
        let record = self.read_header_block_record(header_block).await?;
        let block_proof = self
            .get_block_merkle_proof(block_number, BlockRange::new(record.start, record.end))
            .await?;

        let block = self
            .timed(self.child.get_block_by_number(block_number.into()))
            .await?
            .ok_or_else(|| {
                ChainError::MalformedResponse(format!("block {block_number} not found"))
            })?;
        let block_receipts = self
            .timed(self.child.get_block_receipts(BlockId::number(block_number)))
            .await?
            .ok_or_else(|| {
                ChainError::MalformedResponse(format!("receipts of block {block_number} not found"))
            })?;

        let state_sync = state_sync_tx_hash(block_number, block.header.hash);
        let encoded: Vec<Vec<u8>> = block_receipts
            .iter()
            .filter(|r| r.transaction_hash != state_sync)
            .map(encode_rpc_receipt)
            .collect();
        let tx_index = usize::try_from(tx_index)
            .map_err(|_| ChainError::MalformedResponse("transaction index overflow".into()))?;
        let proof = receipt_proof(&encoded, tx_index)?;
        if proof.root != block.header.receipts_root {
            return Err(ChainError::MalformedResponse(format!(
                "receipts root mismatch in block {block_number}"
            )));
        }
        debug!(
            target = "proof_gen::chain",
            %hash,
            block_number,
            header_block,
            payloads = log_indices.len(),
            "Building exit payloads"
        );

        Ok(log_indices
            .into_iter()
            .map(|log_index| {
                encode_exit_payload(&ExitPayloadParts {
                    header_block,
                    block_proof: &block_proof,
                    block_number,
                    timestamp: block.header.timestamp,
                    transactions_root: block.header.transactions_root,
                    receipts_root: block.header.receipts_root,
                    receipt: &encoded[tx_index],
                    receipt_proof: &proof,
                    log_index,
                })
            })
            .collect())
    }
}

#[async_trait]
impl ChainClient for RpcChainClient {
    async fn last_checkpointed_child_block(&self) -> Result<u64, ChainError> {
        let last = self.timed(self.root_chain.getLastChildBlock().call()).await?;
        to_u64(last, "getLastChildBlock")
    }

    async fn find_containing_header_block(&self, block_number: u64) -> Result<u64, ChainError> {
        let current = self.current_header_block().await?;
        let header_block = search_header_block(block_number, current, |id| {
            self.read_header_block_record(id)
        })
        .await?;
        trace!(
            target = "proof_gen::chain",
            block_number,
            header_block,
            "Located header block"
        );
        Ok(header_block)
    }

    async fn read_header_block_record(
        &self,
        header_block: u64,
    ) -> Result<HeaderBlockRecord, ChainError> {
        let record = self
            .timed(self.root_chain.headerBlocks(U256::from(header_block)).call())
            .await?;
        Ok(HeaderBlockRecord {
            root: record.root,
            start: to_u64(record.start, "headerBlocks.start")?,
            end: to_u64(record.end, "headerBlocks.end")?,
            created_at: to_u64(record.createdAt, "headerBlocks.createdAt")?,
            proposer: record.proposer,
        })
    }

    async fn get_transaction_receipt_or_null(
        &self,
        hash: B256,
    ) -> Result<Option<ReceiptInfo>, ChainError> {
        let Some(receipt) = self.timed(self.child.get_transaction_receipt(hash)).await? else {
            return Ok(None);
        };
        // pending receipts carry no block
        let block_number = receipt.block_number.ok_or(ChainError::IncorrectTx(hash))?;
        Ok(Some(ReceiptInfo {
            transaction_hash: receipt.transaction_hash,
            block_number,
        }))
    }

    async fn get_block_merkle_proof(
        &self,
        leaf: u64,
        range: BlockRange,
    ) -> Result<Bytes, ChainError> {
        let siblings =
            fast_merkle_proof(leaf, range, |start, end| self.root_hash(start, end)).await?;
        Ok(siblings.iter().flat_map(|sibling| sibling.0).collect())
    }

    async fn build_exit_payload(
        &self,
        hash: B256,
        event_signature: B256,
        token_index: usize,
    ) -> Result<Bytes, ChainError> {
        self.exit_payloads(hash, event_signature, LogSelection::Index(token_index))
            .await?
            .pop()
            .ok_or(ChainError::TokenIndexOutOfRange {
                index: token_index,
                matching: 0,
            })
    }

    async fn build_all_exit_payloads(
        &self,
        hash: B256,
        event_signature: B256,
    ) -> Result<Vec<Bytes>, ChainError> {
        self.exit_payloads(hash, event_signature, LogSelection::All)
            .await
    }
}

fn to_u64(value: U256, field: &str) -> Result<u64, ChainError> {
    u64::try_from(value)
        .map_err(|_| ChainError::MalformedResponse(format!("{field} does not fit in u64")))
}
