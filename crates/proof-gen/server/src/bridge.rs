//! Passthrough to the zkEVM bridge service API.

use crate::{
    classify::classify,
    error::ProofError,
    metrics::record_bridge_request,
};
use proof_gen_core::{
    ChainError,
    Network,
};
use serde_json::Value;
use std::time::Duration;
use tracing::{
    instrument,
    warn,
};
use url::Url;

/// One bridge API base URL per network, no pool and no retry.
#[derive(Debug, Clone)]
pub struct BridgeProxy {
    client: reqwest::Client,
    mainnet: Url,
    testnet: Url,
    timeout: Duration,
}

impl BridgeProxy {
    pub fn new(mainnet: Url, testnet: Url, timeout: Duration) -> Self {
        Self {
            client: reqwest::Client::new(),
            mainnet,
            testnet,
            timeout,
        }
    }

    /// `GET {base}/bridge?net_id&deposit_cnt`
    #[instrument(name = "bridge_proxy::bridge", skip(self), level = "debug")]
    pub async fn bridge(
        &self,
        network: Network,
        net_id: u64,
        deposit_cnt: u64,
    ) -> Result<Value, ProofError> {
        self.call(network, "bridge", net_id, deposit_cnt).await
    }

    /// `GET {base}/merkle-proof?net_id&deposit_cnt`
    #[instrument(name = "bridge_proxy::merkle_proof", skip(self), level = "debug")]
    pub async fn merkle_proof(
        &self,
        network: Network,
        net_id: u64,
        deposit_cnt: u64,
    ) -> Result<Value, ProofError> {
        self.call(network, "merkle-proof", net_id, deposit_cnt).await
    }

    async fn call(
        &self,
        network: Network,
        path: &str,
        net_id: u64,
        deposit_cnt: u64,
    ) -> Result<Value, ProofError> {
        match self.fetch(network, path, net_id, deposit_cnt).await {
            Ok(body) => Ok(body),
            Err(err) => {
                let kind = classify(&err);
                if kind.is_info() {
                    return Err(ProofError::info(kind, &err));
                }
                warn!(
                    target = "proof_gen::bridge",
                    %network,
                    path,
                    error = %err,
                    "Bridge API request failed"
                );
                Err(ProofError::Fatal {
                    attempts: 1,
                    last: err,
                })
            }
        }
    }

    async fn fetch(
        &self,
        network: Network,
        path: &str,
        net_id: u64,
        deposit_cnt: u64,
    ) -> Result<Value, ChainError> {
        let base = match network {
            Network::Mainnet => &self.mainnet,
            Network::Testnet => &self.testnet,
        };
        let url = format!("{}/{path}", base.as_str().trim_end_matches('/'));

        let response = self
            .client
            .get(url)
            .query(&[("net_id", net_id), ("deposit_cnt", deposit_cnt)])
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ChainError::Timeout(self.timeout)
                } else {
                    ChainError::Rpc(e.to_string())
                }
            })?;

        let status = response.status();
        record_bridge_request(network, status.as_u16());

        if !status.is_success() {
            let body = response
                .text()
                .await
                .map_err(|e| ChainError::MalformedResponse(e.to_string()))?;
            return Err(ChainError::Bridge {
                status: status.as_u16(),
                message: upstream_message(body),
            });
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| ChainError::MalformedResponse(e.to_string()))
    }
}

/// The `message` field of a JSON error body, or the raw body.
fn upstream_message(body: String) -> String {
    serde_json::from_str::<Value>(&body)
        .ok()
        .and_then(|value| value.get("message")?.as_str().map(str::to_owned))
        .unwrap_or(body)
}
