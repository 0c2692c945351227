//! Scripted chain client doubles for exercising the sweep without a network.

use alloy::primitives::{
    Address,
    B256,
    Bytes,
};
use async_trait::async_trait;
use proof_gen_core::{
    BlockRange,
    ChainClient,
    ChainClientFactory,
    ChainError,
    Endpoint,
    HeaderBlockRecord,
    Network,
    ReceiptInfo,
};
use std::{
    sync::{
        Arc,
        atomic::{
            AtomicUsize,
            Ordering,
        },
    },
    time::Duration,
};

/// `n` distinct endpoint pairs, `http://child-{i}.local` / `http://parent-{i}.local`.
pub fn endpoints(n: usize) -> Vec<Endpoint> {
    (0..n)
        .map(|i| {
            Endpoint::new(
                format!("http://child-{i}.local").parse().unwrap(),
                format!("http://parent-{i}.local").parse().unwrap(),
            )
        })
        .collect()
}

/// Behaviour of the node behind one endpoint.
///
/// Checkpoints cover 256 blocks each, header block `k * 10_000` spans blocks
/// `(k - 1) * 256 ..= k * 256 - 1`.
#[derive(Debug, Clone)]
pub struct ScriptedNode {
    constructible: bool,
    timing_out: bool,
    last_checkpointed: u64,
    receipt_block: Option<u64>,
    proof: Option<Bytes>,
    matching_events: usize,
}

impl ScriptedNode {
    pub fn healthy() -> Self {
        Self {
            constructible: true,
            timing_out: false,
            last_checkpointed: 1_023,
            receipt_block: Some(100),
            proof: None,
            matching_events: 2,
        }
    }

    pub fn timing_out() -> Self {
        Self {
            timing_out: true,
            ..Self::healthy()
        }
    }

    pub fn unconstructible() -> Self {
        Self {
            constructible: false,
            ..Self::healthy()
        }
    }

    pub fn with_proof(mut self, proof: Bytes) -> Self {
        self.proof = Some(proof);
        self
    }

    pub fn with_receipt_block(mut self, block: u64) -> Self {
        self.receipt_block = Some(block);
        self
    }

    pub fn without_receipt(mut self) -> Self {
        self.receipt_block = None;
        self
    }
}

/// Hands out [`ScriptedClient`]s, looking up the node by endpoint and counting
/// every construction attempt.
#[derive(Debug)]
pub struct ScriptedFactory {
    nodes: Vec<(Endpoint, ScriptedNode)>,
    constructed: AtomicUsize,
    payloads_built: Arc<AtomicUsize>,
}

impl ScriptedFactory {
    /// Node `i` serves the `i`-th endpoint of [`endpoints`].
    pub fn new(nodes: Vec<ScriptedNode>) -> Self {
        Self {
            nodes: endpoints(nodes.len()).into_iter().zip(nodes).collect(),
            constructed: AtomicUsize::new(0),
            payloads_built: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn constructed(&self) -> usize {
        self.constructed.load(Ordering::SeqCst)
    }

    pub fn payloads_built(&self) -> usize {
        self.payloads_built.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ChainClientFactory for ScriptedFactory {
    type Client = ScriptedClient;

    async fn construct(
        &self,
        _network: Network,
        endpoint: &Endpoint,
    ) -> Result<Self::Client, ChainError> {
        self.constructed.fetch_add(1, Ordering::SeqCst);
        let node = self
            .nodes
            .iter()
            .find(|(candidate, _)| candidate == endpoint)
            .map(|(_, node)| node.clone())
            .ok_or_else(|| {
                ChainError::Construction(format!("unknown endpoint {}", endpoint.child))
            })?;
        if !node.constructible {
            return Err(ChainError::Construction("invalid provider url".into()));
        }
        Ok(ScriptedClient {
            node,
            payloads_built: self.payloads_built.clone(),
        })
    }
}

#[derive(Debug)]
pub struct ScriptedClient {
    node: ScriptedNode,
    payloads_built: Arc<AtomicUsize>,
}

impl ScriptedClient {
    fn reachable(&self) -> Result<(), ChainError> {
        if self.node.timing_out {
            Err(ChainError::Timeout(Duration::from_secs(10)))
        } else {
            Ok(())
        }
    }

    fn payload(&self, token_index: usize) -> Bytes {
        self.payloads_built.fetch_add(1, Ordering::SeqCst);
        Bytes::from(vec![0xf8, token_index as u8])
    }
}

#[async_trait]
impl ChainClient for ScriptedClient {
    async fn last_checkpointed_child_block(&self) -> Result<u64, ChainError> {
        self.reachable()?;
        Ok(self.node.last_checkpointed)
    }

    async fn find_containing_header_block(&self, block_number: u64) -> Result<u64, ChainError> {
        self.reachable()?;
        Ok((block_number / 256 + 1) * 10_000)
    }

    async fn read_header_block_record(
        &self,
        header_block: u64,
    ) -> Result<HeaderBlockRecord, ChainError> {
        self.reachable()?;
        let k = header_block / 10_000;
        Ok(HeaderBlockRecord {
            root: B256::repeat_byte(k as u8),
            start: (k - 1) * 256,
            end: k * 256 - 1,
            created_at: 1_700_000_000 + k,
            proposer: Address::repeat_byte(0x11),
        })
    }

    async fn get_transaction_receipt_or_null(
        &self,
        hash: B256,
    ) -> Result<Option<ReceiptInfo>, ChainError> {
        self.reachable()?;
        Ok(self.node.receipt_block.map(|block_number| {
            ReceiptInfo {
                transaction_hash: hash,
                block_number,
            }
        }))
    }

    async fn get_block_merkle_proof(
        &self,
        _leaf: u64,
        range: BlockRange,
    ) -> Result<Bytes, ChainError> {
        self.reachable()?;
        if let Some(proof) = &self.node.proof {
            return Ok(proof.clone());
        }
        let height = (range.end - range.start + 1).next_power_of_two().trailing_zeros();
        Ok(Bytes::from(vec![0x22; 32 * height as usize]))
    }

    async fn build_exit_payload(
        &self,
        _hash: B256,
        _event_signature: B256,
        token_index: usize,
    ) -> Result<Bytes, ChainError> {
        self.reachable()?;
        if token_index >= self.node.matching_events {
            return Err(ChainError::TokenIndexOutOfRange {
                index: token_index,
                matching: self.node.matching_events,
            });
        }
        Ok(self.payload(token_index))
    }

    async fn build_all_exit_payloads(
        &self,
        _hash: B256,
        _event_signature: B256,
    ) -> Result<Vec<Bytes>, ChainError> {
        self.reachable()?;
        Ok((0..self.node.matching_events)
            .map(|i| self.payload(i))
            .collect())
    }
}
