//! Metrics emitted by the proof generation server.
//!
//! ### Counters
//! - `proof_gen_rpc_attempts_total{network, outcome}`: chain client attempts made
//!   by sweeps, `outcome` is one of `success`, `info` or `transient`
//! - `proof_gen_rpc_sweep_exhausted_total{network}`: sweeps that ran out of attempts
//! - `proof_gen_bridge_requests_total{network, status}`: zkEVM bridge API calls
//!
//! ### Histograms
//! - `proof_gen_request_duration_seconds{route, status}`: wall clock time per HTTP request

use metrics::{
    counter,
    histogram,
};
use proof_gen_core::Network;
use std::time::Duration;

#[derive(Debug, Clone, Copy)]
pub enum AttemptOutcome {
    Success,
    Info,
    Transient,
}

impl AttemptOutcome {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Info => "info",
            Self::Transient => "transient",
        }
    }
}

pub fn record_attempt(network: Network, outcome: AttemptOutcome) {
    counter!(
        "proof_gen_rpc_attempts_total",
        "network" => network.as_str(),
        "outcome" => outcome.as_str()
    )
    .increment(1);
}

pub fn record_sweep_exhausted(network: Network) {
    counter!("proof_gen_rpc_sweep_exhausted_total", "network" => network.as_str()).increment(1);
}

pub fn record_bridge_request(network: Network, status: u16) {
    counter!(
        "proof_gen_bridge_requests_total",
        "network" => network.as_str(),
        "status" => status.to_string()
    )
    .increment(1);
}

pub fn record_request(route: String, status: u16, elapsed: Duration) {
    histogram!(
        "proof_gen_request_duration_seconds",
        "route" => route,
        "status" => status.to_string()
    )
    .record(elapsed.as_secs_f64());
}
