//! # `proof-gen-chain`
//!
//! [`ChainClient`](proof_gen_core::ChainClient) implementation talking to a
//! Polygon PoS child chain node and its Ethereum parent chain over JSON-RPC.
//!
//! * Checkpoint state comes from the `RootChain` contract on the parent chain.
//! * Block proofs are assembled from sub-range roots served by the child
//!   node's `eth_getRootHash`.
//! * Exit payloads combine the block proof with a receipt trie proof built
//!   locally from the block's receipts.

mod block_proof;
mod client;
mod exit_payload;
mod factory;
mod receipt;
mod root_chain;

pub use block_proof::MAX_PROOF_RANGE;
pub use client::RpcChainClient;
pub use factory::{
    RootChainAddresses,
    RpcChainClientFactory,
};
pub use root_chain::CHECKPOINT_INTERVAL;
