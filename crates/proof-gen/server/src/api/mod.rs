//! # `api`
//!
//! HTTP surface of the proof generation server. Every route is a `GET`.
//!
//! ## Proofs
//!
//! - `/api/v1/{network}/block-included/{blockNumber}`: checkpoint containing a
//!   child block
//! - `/api/v1/{network}/fast-merkle-proof?start&end&number`: merkle proof of
//!   `number` inside the checkpoint range `start..=end`
//! - `/api/v1/{network}/exit-payload/{burnTxHash}?eventSignature&tokenIndex`:
//!   exit payload for one burn event
//! - `/api/v1/{network}/all-exit-payloads/{burnTxHash}?eventSignature`: one
//!   exit payload per burn event
//!
//! `network` is `matic`/`mainnet` or `mumbai`/`amoy`/`testnet`.
//!
//! ## zkEVM bridge
//!
//! - `/api/zkevm/{network}/bridge?net_id&deposit_cnt`
//! - `/api/zkevm/{network}/merkle-proof?net_id&deposit_cnt`
//!
//! `network` is `mainnet` or `testnet`/`cardona`.
//!
//! ## Errors
//!
//! ```json
//! {
//!   "error": true,
//!   "kind": "transaction_not_checkpointed",
//!   "message": "Burn transaction has not been checkpointed yet"
//! }
//! ```
//!
//! - 400: invalid parameters
//! - 404: the request was valid but the answer is negative, `kind` says why
//! - 500: no endpoint could serve the request

pub mod handlers;
pub mod params;
pub mod response;
pub mod tracing_middleware;

use crate::{
    bridge::BridgeProxy,
    service::ProofService,
};
use axum::{
    Router,
    middleware,
    routing::get,
};
use proof_gen_core::ChainClientFactory;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Paths served by [`router`].
pub const ROUTES: &[&str] = &[
    "/",
    "/health-check",
    "/api/v1/{network}/block-included/{blockNumber}",
    "/api/v1/{network}/fast-merkle-proof",
    "/api/v1/{network}/exit-payload/{burnTxHash}",
    "/api/v1/{network}/all-exit-payloads/{burnTxHash}",
    "/api/zkevm/{network}/bridge",
    "/api/zkevm/{network}/merkle-proof",
];

/// Shared state handed to every handler.
#[derive(Debug)]
pub struct ApiState<F> {
    pub service: Arc<ProofService<F>>,
    pub bridge: Arc<BridgeProxy>,
}

impl<F> Clone for ApiState<F> {
    fn clone(&self) -> Self {
        Self {
            service: self.service.clone(),
            bridge: self.bridge.clone(),
        }
    }
}

impl<F> ApiState<F> {
    pub fn new(service: ProofService<F>, bridge: BridgeProxy) -> Self {
        Self {
            service: Arc::new(service),
            bridge: Arc::new(bridge),
        }
    }
}

pub fn router<F: ChainClientFactory + 'static>(state: ApiState<F>) -> Router {
    Router::new()
        .route(ROUTES[0], get(handlers::list_routes))
        .route(ROUTES[1], get(handlers::health_check))
        .route(ROUTES[2], get(handlers::block_included::<F>))
        .route(ROUTES[3], get(handlers::fast_merkle_proof::<F>))
        .route(ROUTES[4], get(handlers::exit_payload::<F>))
        .route(ROUTES[5], get(handlers::all_exit_payloads::<F>))
        .route(ROUTES[6], get(handlers::zkevm_bridge::<F>))
        .route(ROUTES[7], get(handlers::zkevm_merkle_proof::<F>))
        .fallback(handlers::not_found)
        .layer(middleware::from_fn(tracing_middleware::tracing_middleware))
        .with_state(state)
}

/// Serves the API on `listener` until `cancel_token` is cancelled.
pub async fn serve<F: ChainClientFactory + 'static>(
    listener: TcpListener,
    state: ApiState<F>,
    cancel_token: CancellationToken,
) -> anyhow::Result<()> {
    info!(
        target = "proof_gen::api",
        local_addr = ?listener.local_addr()?,
        "API server starting"
    );
    axum::serve(listener, router(state))
        .with_graceful_shutdown(async move { cancel_token.cancelled().await })
        .await?;
    Ok(())
}
