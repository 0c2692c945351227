use crate::RpcChainClient;
use alloy::{
    primitives::{
        Address,
        address,
    },
    providers::{
        Provider,
        ProviderBuilder,
    },
};
use async_trait::async_trait;
use proof_gen_core::{
    ChainClientFactory,
    ChainError,
    Endpoint,
    Network,
};
use std::time::Duration;
use url::Url;

/// `RootChain` proxy contract addresses on each network's parent chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RootChainAddresses {
    pub mainnet: Address,
    pub testnet: Address,
}

impl RootChainAddresses {
    pub const fn for_network(&self, network: Network) -> Address {
        match network {
            Network::Mainnet => self.mainnet,
            Network::Testnet => self.testnet,
        }
    }
}

impl Default for RootChainAddresses {
    fn default() -> Self {
        Self {
            mainnet: address!("0x86E4Dc95c7FBdBf52e33D563BbDB00823894C287"),
            testnet: address!("0xbd07D7E1E93c8d4b2a261327F3C28a8EA7167Eff"),
        }
    }
}

/// Builds a fresh [`RpcChainClient`] for every attempt.
#[derive(Debug, Clone)]
pub struct RpcChainClientFactory {
    root_chains: RootChainAddresses,
    timeout: Duration,
}

impl RpcChainClientFactory {
    pub const fn new(root_chains: RootChainAddresses, timeout: Duration) -> Self {
        Self {
            root_chains,
            timeout,
        }
    }
}

#[async_trait]
impl ChainClientFactory for RpcChainClientFactory {
    type Client = RpcChainClient;

    async fn construct(
        &self,
        network: Network,
        endpoint: &Endpoint,
    ) -> Result<Self::Client, ChainError> {
        Ok(RpcChainClient::new(
            http_provider(&endpoint.child),
            http_provider(&endpoint.parent),
            self.root_chains.for_network(network),
            self.timeout,
        ))
    }
}

fn http_provider(url: &Url) -> alloy::providers::RootProvider {
    ProviderBuilder::new().connect_http(url.clone()).root().clone()
}
