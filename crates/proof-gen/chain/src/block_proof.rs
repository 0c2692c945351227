//! Merkle proof of a child block inside a checkpoint.
//!
//! The checkpoint root commits to the block range padded with zero leaves up to
//! the next power of two. Rather than fetching every block header, the proof is
//! assembled from roots of aligned sub-ranges served by `eth_getRootHash`.

use alloy::primitives::{
    B256,
    keccak256,
};
use proof_gen_core::{
    BlockRange,
    ChainError,
};
use std::future::Future;

/// Largest block range a proof is built for. Checkpoints stay far below this.
pub const MAX_PROOF_RANGE: u64 = 1 << 20;

/// Sibling hashes proving `number` inside `range`, ordered leaf to root.
pub(crate) async fn fast_merkle_proof<F, Fut>(
    number: u64,
    range: BlockRange,
    mut root_hash: F,
) -> Result<Vec<B256>, ChainError>
where
    F: FnMut(u64, u64) -> Fut,
    Fut: Future<Output = Result<B256, ChainError>>,
{
    if !range.contains(number) {
        return Err(ChainError::MalformedResponse(format!(
            "block {number} outside of checkpoint range {}..={}",
            range.start, range.end
        )));
    }
    let size = range
        .end
        .checked_sub(range.start)
        .and_then(|span| span.checked_add(1))
        .filter(|size| *size <= MAX_PROOF_RANGE)
        .ok_or_else(|| {
            ChainError::MalformedResponse(format!(
                "checkpoint range {}..={} exceeds {MAX_PROOF_RANGE} blocks",
                range.start, range.end
            ))
        })?;

    let offset = range.start;
    let target = number - offset;
    let depth = ceil_log2(size);

    let mut left = 0;
    let mut right = size - 1;
    let mut root_to_leaf = Vec::with_capacity(depth as usize);

    for level in 0..depth {
        let subtree_leaves = 1u64 << (depth - level);
        let pivot = left + subtree_leaves / 2 - 1;

        if target > pivot {
            // left sibling is a full subtree
            root_to_leaf.push(root_hash(offset + left, offset + pivot).await?);
            left = pivot + 1;
            continue;
        }

        let expected_height = depth - (level + 1);
        if right <= pivot {
            root_to_leaf.push(zero_hash(expected_height));
        } else {
            // right sibling is partially filled, pad it with empty subtrees
            let sub_height = ceil_log2(right - pivot);
            let remaining = root_hash(offset + pivot + 1, offset + right).await?;
            root_to_leaf.push(
                (sub_height..expected_height)
                    .fold(remaining, |node, height| hash_pair(node, zero_hash(height))),
            );
        }
        right = right.min(pivot);
    }

    root_to_leaf.reverse();
    Ok(root_to_leaf)
}

fn ceil_log2(n: u64) -> u32 {
    if n <= 1 {
        0
    } else {
        u64::BITS - (n - 1).leading_zeros()
    }
}

/// Root of a perfect tree of `2^height` zero leaves.
fn zero_hash(height: u32) -> B256 {
    (0..height).fold(B256::ZERO, |node, _| hash_pair(node, node))
}

fn hash_pair(left: B256, right: B256) -> B256 {
    let mut buf = [0u8; 64];
    buf[..32].copy_from_slice(left.as_slice());
    buf[32..].copy_from_slice(right.as_slice());
    keccak256(buf)
}
