//! Consensus encoding of child chain receipts, as committed to by the block's
//! receipts root.

use alloy::{
    consensus::TxReceipt,
    primitives::{
        Bloom,
        Log,
    },
    rlp::{
        Encodable,
        Header,
    },
    rpc::types::TransactionReceipt,
};

/// EIP-2718 encoding of an RPC receipt: `type || rlp(receipt)` for typed
/// transactions, bare `rlp(receipt)` for legacy ones.
pub(crate) fn encode_rpc_receipt(receipt: &TransactionReceipt) -> Vec<u8> {
    let envelope = &receipt.inner;
    encode_receipt_parts(
        envelope.tx_type() as u8,
        envelope.status(),
        envelope.cumulative_gas_used(),
        &envelope.bloom(),
        envelope.logs().iter().map(|log| &log.inner),
    )
}

pub(crate) fn encode_receipt_parts<'a>(
    tx_type: u8,
    status: bool,
    cumulative_gas_used: u64,
    bloom: &Bloom,
    logs: impl Iterator<Item = &'a Log>,
) -> Vec<u8> {
    let mut logs_payload = Vec::new();
    for log in logs {
        log.encode(&mut logs_payload);
    }

    let mut fields = Vec::new();
    status.encode(&mut fields);
    cumulative_gas_used.encode(&mut fields);
    bloom.encode(&mut fields);
    Header {
        list: true,
        payload_length: logs_payload.len(),
    }
    .encode(&mut fields);
    fields.extend_from_slice(&logs_payload);

    let mut out = Vec::with_capacity(fields.len() + 4);
    if tx_type != 0 {
        out.push(tx_type);
    }
    Header {
        list: true,
        payload_length: fields.len(),
    }
    .encode(&mut out);
    out.extend_from_slice(&fields);
    out
}
