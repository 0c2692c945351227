//! The bounded retry sweep over a network's endpoint pool.

use crate::{
    classify::classify,
    error::ProofError,
    metrics::{
        AttemptOutcome,
        record_attempt,
        record_sweep_exhausted,
    },
    pool::NetworkProfile,
};
use proof_gen_core::{
    ChainError,
    Endpoint,
};
use std::future::Future;
use tracing::{
    debug,
    error,
    warn,
};

/// Runs `attempt` against the endpoints of `profile`, starting at the sticky
/// index and rotating through the pool at most twice.
///
/// * Success commits the winning endpoint as the new sticky index.
/// * An info classification aborts immediately, no further endpoint is tried.
/// * Transient failures move on to the next endpoint. Once every attempt is
///   used up the sweep fails with [`ProofError::Fatal`].
///
/// Attempts run inside the returned future, dropping it stops the sweep.
pub async fn sweep<'p, T, F, Fut>(
    profile: &'p NetworkProfile,
    mut attempt: F,
) -> Result<T, ProofError>
where
    F: FnMut(usize, &'p Endpoint) -> Fut,
    Fut: Future<Output = Result<T, ChainError>>,
{
    let network = profile.network();
    let start = profile.start_index();
    let max_attempts = profile.max_attempts();
    let mut last_error = None;

    for attempt_number in 0..max_attempts {
        let index = (start + attempt_number) % profile.len();

        match attempt(index, profile.endpoint(index)).await {
            Ok(value) => {
                record_attempt(network, AttemptOutcome::Success);
                if index != start {
                    debug!(
                        target = "proof_gen::orchestrator",
                        %network,
                        endpoint = index,
                        previous = start,
                        "Moving sticky endpoint"
                    );
                    profile.commit(index);
                }
                return Ok(value);
            }
            Err(err) => {
                let kind = classify(&err);
                if kind.is_info() {
                    record_attempt(network, AttemptOutcome::Info);
                    debug!(
                        target = "proof_gen::orchestrator",
                        %network,
                        endpoint = index,
                        ?kind,
                        error = %err,
                        "Request answered negatively"
                    );
                    return Err(ProofError::info(kind, &err));
                }

                record_attempt(network, AttemptOutcome::Transient);
                warn!(
                    target = "proof_gen::orchestrator",
                    %network,
                    endpoint = index,
                    attempt = attempt_number + 1,
                    max_attempts,
                    error = %err,
                    "Attempt failed"
                );
                last_error = Some(err);
            }
        }
    }

    record_sweep_exhausted(network);
    let last = last_error.unwrap_or_else(|| ChainError::Construction("empty endpoint pool".into()));
    error!(
        target = "proof_gen::orchestrator",
        %network,
        attempts = max_attempts,
        error = %last,
        "All endpoints failed"
    );
    Err(ProofError::Fatal {
        attempts: max_attempts,
        last,
    })
}
