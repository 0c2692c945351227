//! Exit payload assembly: event log selection, the receipt trie proof and the
//! final RLP envelope consumed by the root chain's exit predicates.

use alloy::{
    primitives::{
        B256,
        Bytes,
        Log,
        b256,
        keccak256,
    },
    rlp::{
        Encodable,
        Header,
    },
};
use alloy_trie::{
    HashBuilder,
    Nibbles,
    proof::ProofRetainer,
};
use proof_gen_core::ChainError;

/// ERC20/ERC721 `Transfer(address,address,uint256)`.
pub(crate) const TRANSFER_EVENT: B256 =
    b256!("0xddf252ad1be2c89b69c2b068fc378daa952ba7f163c4a11628f55a4df523b3ef");
/// ERC1155 `TransferSingle(address,address,address,uint256,uint256)`.
pub(crate) const TRANSFER_SINGLE_EVENT: B256 =
    b256!("0xc3d58168c5ae7397731d063d5bbf3d657854427343f4c083240f7aacaa2d0f62");
/// ERC1155 `TransferBatch(address,address,address,uint256[],uint256[])`.
pub(crate) const TRANSFER_BATCH_EVENT: B256 =
    b256!("0x4a39dc06d4c0dbc64b70af90fd698a233a518aa5d07e595d983b8c0526c8f7fb");

const STATE_SYNC_RECEIPT_PREFIX: &[u8] = b"matic-bor-receipt-";

/// Which of the matching logs to build payloads for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LogSelection {
    Index(usize),
    All,
}

/// Positions of the logs emitted with `event_signature`.
///
/// For the well known token transfer events only burns count, i.e. logs whose
/// recipient topic is the zero address.
pub(crate) fn matching_log_indices<'a>(
    logs: impl IntoIterator<Item = &'a Log>,
    event_signature: B256,
) -> Vec<usize> {
    let burn_topic = if event_signature == TRANSFER_EVENT {
        Some(2)
    } else if event_signature == TRANSFER_SINGLE_EVENT || event_signature == TRANSFER_BATCH_EVENT {
        Some(3)
    } else {
        None
    };

    logs.into_iter()
        .enumerate()
        .filter(|(_, log)| {
            let topics = log.topics();
            topics.first() == Some(&event_signature)
                && burn_topic.is_none_or(|i| topics.get(i) == Some(&B256::ZERO))
        })
        .map(|(index, _)| index)
        .collect()
}

pub(crate) fn select_logs(
    matching: Vec<usize>,
    selection: LogSelection,
    tx: B256,
    event_signature: B256,
) -> Result<Vec<usize>, ChainError> {
    if matching.is_empty() {
        return Err(ChainError::EventLogNotFound {
            tx,
            event_signature,
        });
    }
    match selection {
        LogSelection::All => Ok(matching),
        LogSelection::Index(index) => matching
            .get(index)
            .map(|log_index| vec![*log_index])
            .ok_or(ChainError::TokenIndexOutOfRange {
                index,
                matching: matching.len(),
            }),
    }
}

/// Hash under which bor files the synthetic state sync receipt of a block.
/// That receipt is not part of the block's receipts root.
pub(crate) fn state_sync_tx_hash(block_number: u64, block_hash: B256) -> B256 {
    let mut key = Vec::with_capacity(STATE_SYNC_RECEIPT_PREFIX.len() + 8 + 32);
    key.extend_from_slice(STATE_SYNC_RECEIPT_PREFIX);
    key.extend_from_slice(&block_number.to_be_bytes());
    key.extend_from_slice(block_hash.as_slice());
    keccak256(key)
}

#[derive(Debug, Clone)]
pub(crate) struct ReceiptProof {
    pub root: B256,
    /// Trie nodes from the root down to the receipt's leaf.
    pub nodes: Vec<Bytes>,
    /// `rlp(index)`, the receipt's trie key.
    pub key: Vec<u8>,
}

/// Builds the receipts trie over `encoded_receipts` and retains the nodes on
/// the path to the receipt at `index`.
pub(crate) fn receipt_proof(
    encoded_receipts: &[Vec<u8>],
    index: usize,
) -> Result<ReceiptProof, ChainError> {
    if index >= encoded_receipts.len() {
        return Err(ChainError::MalformedResponse(format!(
            "receipt {index} missing from block with {} receipts",
            encoded_receipts.len()
        )));
    }

    let key = alloy::rlp::encode(index as u64);
    let target = Nibbles::unpack(&key);

    let mut leaves: Vec<(Vec<u8>, &[u8])> = encoded_receipts
        .iter()
        .enumerate()
        .map(|(i, receipt)| (alloy::rlp::encode(i as u64), receipt.as_slice()))
        .collect();
    leaves.sort_unstable_by(|a, b| a.0.cmp(&b.0));

    let mut builder =
        HashBuilder::default().with_proof_retainer(ProofRetainer::new(vec![target]));
    for (leaf_key, value) in leaves {
        builder.add_leaf(Nibbles::unpack(&leaf_key), value);
    }
    let root = builder.root();
    let nodes = builder
        .take_proof_nodes()
        .into_nodes_sorted()
        .into_iter()
        .map(|(_, node)| node)
        .collect();

    Ok(ReceiptProof { root, nodes, key })
}

/// Everything that goes into one exit payload.
#[derive(Debug, Clone)]
pub(crate) struct ExitPayloadParts<'a> {
    pub header_block: u64,
    pub block_proof: &'a [u8],
    pub block_number: u64,
    pub timestamp: u64,
    pub transactions_root: B256,
    pub receipts_root: B256,
    pub receipt: &'a [u8],
    pub receipt_proof: &'a ReceiptProof,
    pub log_index: usize,
}

/// `rlp([headerNumber, blockProof, blockNumber, timestamp, txRoot,
/// receiptsRoot, receipt, rlp(parentNodes), 0x00 || rlp(index), logIndex])`
pub(crate) fn encode_exit_payload(parts: &ExitPayloadParts<'_>) -> Bytes {
    let mut parent_nodes_payload = Vec::new();
    for node in &parts.receipt_proof.nodes {
        parent_nodes_payload.extend_from_slice(node);
    }
    let mut parent_nodes = Vec::with_capacity(parent_nodes_payload.len() + 9);
    Header {
        list: true,
        payload_length: parent_nodes_payload.len(),
    }
    .encode(&mut parent_nodes);
    parent_nodes.extend_from_slice(&parent_nodes_payload);

    let mut path = Vec::with_capacity(parts.receipt_proof.key.len() + 1);
    path.push(0x00);
    path.extend_from_slice(&parts.receipt_proof.key);

    let mut fields = Vec::new();
    parts.header_block.encode(&mut fields);
    parts.block_proof.encode(&mut fields);
    parts.block_number.encode(&mut fields);
    parts.timestamp.encode(&mut fields);
    parts.transactions_root.encode(&mut fields);
    parts.receipts_root.encode(&mut fields);
    parts.receipt.encode(&mut fields);
    parent_nodes.as_slice().encode(&mut fields);
    path.as_slice().encode(&mut fields);
    (parts.log_index as u64).encode(&mut fields);

    let mut out = Vec::with_capacity(fields.len() + 9);
    Header {
        list: true,
        payload_length: fields.len(),
    }
    .encode(&mut out);
    out.extend_from_slice(&fields);
    out.into()
}
