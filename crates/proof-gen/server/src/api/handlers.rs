use super::{
    ApiState,
    params::{
        self,
        ExitPayloadQuery,
        FastMerkleProofQuery,
        ZkEvmQuery,
    },
    response::ApiError,
};
use axum::{
    Json,
    extract::{
        Path,
        Query,
        State,
    },
};
use proof_gen_core::{
    BlockInclusion,
    ChainClientFactory,
    ExitPayload,
    ExitPayloads,
    MerkleProof,
};
use serde::Serialize;
use serde_json::Value;

pub async fn block_included<F: ChainClientFactory + 'static>(
    State(state): State<ApiState<F>>,
    Path((network, block_number)): Path<(String, String)>,
) -> Result<Json<BlockInclusion>, ApiError> {
    let network = params::v1_network(&network)?;
    let block_number = params::block_number(&block_number)?;
    Ok(Json(
        state.service.block_included(network, block_number).await?,
    ))
}

pub async fn fast_merkle_proof<F: ChainClientFactory + 'static>(
    State(state): State<ApiState<F>>,
    Path(network): Path<String>,
    Query(query): Query<FastMerkleProofQuery>,
) -> Result<Json<MerkleProof>, ApiError> {
    let network = params::v1_network(&network)?;
    let (start, end, number) = params::fast_merkle_proof(&query)?;
    Ok(Json(
        state
            .service
            .fast_merkle_proof(network, start, end, number)
            .await?,
    ))
}

pub async fn exit_payload<F: ChainClientFactory + 'static>(
    State(state): State<ApiState<F>>,
    Path((network, burn_tx)): Path<(String, String)>,
    Query(query): Query<ExitPayloadQuery>,
) -> Result<Json<ExitPayload>, ApiError> {
    let network = params::v1_network(&network)?;
    let (burn_tx, event_signature, token_index) = params::exit_payload(&burn_tx, &query)?;
    Ok(Json(
        state
            .service
            .exit_payload(network, burn_tx, event_signature, token_index)
            .await?,
    ))
}

pub async fn all_exit_payloads<F: ChainClientFactory + 'static>(
    State(state): State<ApiState<F>>,
    Path((network, burn_tx)): Path<(String, String)>,
    Query(query): Query<ExitPayloadQuery>,
) -> Result<Json<ExitPayloads>, ApiError> {
    let network = params::v1_network(&network)?;
    let (burn_tx, event_signature) = params::burn_tx_and_signature(&burn_tx, &query)?;
    Ok(Json(
        state
            .service
            .all_exit_payloads(network, burn_tx, event_signature)
            .await?,
    ))
}

pub async fn zkevm_bridge<F: ChainClientFactory + 'static>(
    State(state): State<ApiState<F>>,
    Path(network): Path<String>,
    Query(query): Query<ZkEvmQuery>,
) -> Result<Json<Value>, ApiError> {
    let network = params::zkevm_network(&network)?;
    let (net_id, deposit_cnt) = params::zkevm(&query)?;
    Ok(Json(
        state.bridge.bridge(network, net_id, deposit_cnt).await?,
    ))
}

pub async fn zkevm_merkle_proof<F: ChainClientFactory + 'static>(
    State(state): State<ApiState<F>>,
    Path(network): Path<String>,
    Query(query): Query<ZkEvmQuery>,
) -> Result<Json<Value>, ApiError> {
    let network = params::zkevm_network(&network)?;
    let (net_id, deposit_cnt) = params::zkevm(&query)?;
    Ok(Json(
        state
            .bridge
            .merkle_proof(network, net_id, deposit_cnt)
            .await?,
    ))
}

#[derive(Debug, Serialize)]
pub struct HealthCheck {
    success: bool,
    message: &'static str,
}

pub async fn health_check() -> Json<HealthCheck> {
    Json(HealthCheck {
        success: true,
        message: "Health Check Success",
    })
}

#[derive(Debug, Serialize)]
pub struct RouteInfo {
    path: &'static str,
    methods: [&'static str; 1],
}

/// Every route served, for discovery.
pub async fn list_routes() -> Json<Vec<RouteInfo>> {
    Json(
        super::ROUTES
            .iter()
            .map(|&path| {
                RouteInfo {
                    path,
                    methods: ["get"],
                }
            })
            .collect(),
    )
}

pub async fn not_found() -> ApiError {
    ApiError::not_found("Not found")
}
