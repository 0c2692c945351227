//! # `proof-gen-server`
//!
//! HTTP API that generates Polygon PoS checkpoint inclusion proofs and exit
//! payloads, and proxies the zkEVM bridge service.
//!
//! Every proof request is served by one *sweep* over the network's endpoint
//! pool: up to two passes starting at the endpoint that last succeeded.
//! Transient failures move on to the next endpoint, definitive answers end the
//! sweep on the spot.

#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]

pub mod api;
pub mod bridge;
pub mod classify;
mod config;
pub mod error;
pub mod metrics;
pub mod orchestrator;
pub mod pool;
pub mod proof;
mod server;
pub mod service;

#[cfg(test)]
mod test_utils;

pub use bridge::BridgeProxy;
pub use config::{
    Config,
    ConfigError,
};
pub use error::ProofError;
pub use pool::{
    EmptyPool,
    NetworkProfile,
};
pub use server::ProofGenServer;
pub use service::ProofService;
