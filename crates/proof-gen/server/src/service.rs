//! The four proof requests, each one chain operation wrapped in a sweep.

use crate::{
    error::ProofError,
    orchestrator::sweep,
    pool::NetworkProfile,
    proof::verify_proof,
};
use alloy::primitives::B256;
use proof_gen_core::{
    BlockInclusion,
    BlockRange,
    ChainClient,
    ChainClientFactory,
    ChainError,
    ErrorKind,
    ExitPayload,
    ExitPayloads,
    MerkleProof,
    Network,
};
use std::future::Future;
use tracing::{
    error,
    instrument,
};

/// Answers proof requests against the endpoint pools of both networks.
#[derive(Debug)]
pub struct ProofService<F> {
    factory: F,
    mainnet: NetworkProfile,
    testnet: NetworkProfile,
}

impl<F: ChainClientFactory> ProofService<F> {
    pub fn new(factory: F, mainnet: NetworkProfile, testnet: NetworkProfile) -> Self {
        Self {
            factory,
            mainnet,
            testnet,
        }
    }

    pub fn profile(&self, network: Network) -> &NetworkProfile {
        match network {
            Network::Mainnet => &self.mainnet,
            Network::Testnet => &self.testnet,
        }
    }

    /// Runs `operation` on a freshly built client for each attempt of a sweep.
    /// Failing to build the client is always transient.
    async fn run<T, Op, Fut>(&self, network: Network, operation: Op) -> Result<T, ProofError>
    where
        Op: Fn(F::Client) -> Fut,
        Fut: Future<Output = Result<T, ChainError>>,
    {
        let factory = &self.factory;
        let operation = &operation;
        sweep(self.profile(network), |_, endpoint| {
            async move {
                let client = factory
                    .construct(network, endpoint)
                    .await
                    .map_err(|err| {
                        match err {
                            ChainError::Construction(_) => err,
                            other => ChainError::Construction(other.to_string()),
                        }
                    })?;
                operation(client).await
            }
        })
        .await
    }

    #[instrument(name = "proof_service::block_included", skip(self), level = "debug")]
    pub async fn block_included(
        &self,
        network: Network,
        block_number: u64,
    ) -> Result<BlockInclusion, ProofError> {
        self.run(network, |client| {
            async move {
                let last_checkpointed = client.last_checkpointed_child_block().await?;
                if block_number > last_checkpointed {
                    return Err(ChainError::BlockNotIncluded {
                        block: block_number,
                        last_checkpointed,
                    });
                }
                let header_block = client.find_containing_header_block(block_number).await?;
                let record = client.read_header_block_record(header_block).await?;
                Ok(BlockInclusion::new(header_block, block_number, record))
            }
        })
        .await
    }

    /// Callers guarantee `start <= number <= end`.
    #[instrument(name = "proof_service::fast_merkle_proof", skip(self), level = "debug")]
    pub async fn fast_merkle_proof(
        &self,
        network: Network,
        start: u64,
        end: u64,
        number: u64,
    ) -> Result<MerkleProof, ProofError> {
        let proof = self
            .run(network, |client| {
                async move {
                    client
                        .get_block_merkle_proof(number, BlockRange::new(start, end))
                        .await
                }
            })
            .await?;

        if !verify_proof(number.saturating_sub(start), &proof) {
            error!(
                target = "proof_gen::service",
                %network,
                start,
                end,
                number,
                proof_len = proof.len(),
                "Generated merkle proof failed verification"
            );
            return Err(ProofError::InvalidProof);
        }
        Ok(MerkleProof { proof })
    }

    #[instrument(name = "proof_service::exit_payload", skip(self), level = "debug")]
    pub async fn exit_payload(
        &self,
        network: Network,
        burn_tx: B256,
        event_signature: B256,
        token_index: usize,
    ) -> Result<ExitPayload, ProofError> {
        let result = self
            .run(network, |client| {
                async move {
                    if !client.is_checkpointed(burn_tx).await? {
                        return Err(ChainError::TxNotCheckpointed(burn_tx));
                    }
                    client
                        .build_exit_payload(burn_tx, event_signature, token_index)
                        .await
                }
            })
            .await;
        unresolved_as_incorrect(result).map(ExitPayload::new)
    }

    #[instrument(name = "proof_service::all_exit_payloads", skip(self), level = "debug")]
    pub async fn all_exit_payloads(
        &self,
        network: Network,
        burn_tx: B256,
        event_signature: B256,
    ) -> Result<ExitPayloads, ProofError> {
        let result = self
            .run(network, |client| {
                async move {
                    if !client.is_checkpointed(burn_tx).await? {
                        return Err(ChainError::TxNotCheckpointed(burn_tx));
                    }
                    client
                        .build_all_exit_payloads(burn_tx, event_signature)
                        .await
                }
            })
            .await;
        unresolved_as_incorrect(result).map(ExitPayloads::new)
    }
}

/// A burn transaction no endpoint could resolve after a full sweep is not a
/// burn transaction.
fn unresolved_as_incorrect<T>(result: Result<T, ProofError>) -> Result<T, ProofError> {
    match result {
        Err(ProofError::Fatal {
            last: ChainError::NullReceipt(hash),
            ..
        }) => Err(ProofError::info(ErrorKind::IncorrectTx, &ChainError::IncorrectTx(hash))),
        other => other,
    }
}
