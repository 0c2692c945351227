use alloy::sol;
use proof_gen_core::{
    ChainError,
    HeaderBlockRecord,
};
use std::future::Future;

/// Header block ids advance in steps of this many.
pub const CHECKPOINT_INTERVAL: u64 = 10_000;

sol! {
    #[sol(rpc)]
    interface IRootChain {
        function getLastChildBlock() external view returns (uint256);
        function currentHeaderBlock() external view returns (uint256);
        function headerBlocks(uint256 headerBlockId)
            external
            view
            returns (bytes32 root, uint256 start, uint256 end, uint256 createdAt, address proposer);
    }
}

/// Binary search over header blocks `CHECKPOINT_INTERVAL * k` for
/// `k in [1, current_header_block / CHECKPOINT_INTERVAL]`, returning the id of
/// the header block whose range contains `child_block`.
pub(crate) async fn search_header_block<F, Fut>(
    child_block: u64,
    current_header_block: u64,
    mut read_header_block: F,
) -> Result<u64, ChainError>
where
    F: FnMut(u64) -> Fut,
    Fut: Future<Output = Result<HeaderBlockRecord, ChainError>>,
{
    let mut start = 1;
    let mut end = current_header_block / CHECKPOINT_INTERVAL;

    while start <= end {
        if start == end {
            return Ok(start * CHECKPOINT_INTERVAL);
        }

        let mid = start + (end - start) / 2;
        let record = read_header_block(mid * CHECKPOINT_INTERVAL).await?;
        if record.contains(child_block) {
            return Ok(mid * CHECKPOINT_INTERVAL);
        }
        if record.start > child_block {
            end = mid - 1;
        } else {
            start = mid + 1;
        }
    }

    Err(ChainError::MalformedResponse(format!(
        "no header block contains child block {child_block}"
    )))
}
