use crate::{
    api::ApiState,
    bridge::BridgeProxy,
    pool::{
        EmptyPool,
        NetworkProfile,
    },
    server::ProofGenServer,
    service::ProofService,
};
use alloy::primitives::Address;
use clap::Parser;
use proof_gen_chain::{
    RootChainAddresses,
    RpcChainClientFactory,
};
use proof_gen_core::{
    Endpoint,
    Network,
};
use std::{
    net::SocketAddr,
    time::Duration,
};
use tokio::net::TcpListener;
use url::Url;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{network} has {child} child RPC URLs but {parent} parent RPC URLs")]
    MismatchedEndpoints {
        network: Network,
        child: usize,
        parent: usize,
    },
    #[error(transparent)]
    Empty(#[from] EmptyPool),
}

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// Api server address
    #[arg(long, env = "PROOF_GEN_LISTEN_ADDR", default_value = "0.0.0.0:5000")]
    pub listen_addr: SocketAddr,
    /// Comma separated Polygon PoS mainnet RPC URLs
    #[arg(long, env = "PROOF_GEN_MAINNET_CHILD_RPCS", value_delimiter = ',')]
    pub mainnet_child_rpcs: Vec<Url>,
    /// Comma separated Ethereum mainnet RPC URLs, paired by position with the child URLs
    #[arg(long, env = "PROOF_GEN_MAINNET_PARENT_RPCS", value_delimiter = ',')]
    pub mainnet_parent_rpcs: Vec<Url>,
    /// Comma separated Amoy RPC URLs
    #[arg(long, env = "PROOF_GEN_TESTNET_CHILD_RPCS", value_delimiter = ',')]
    pub testnet_child_rpcs: Vec<Url>,
    /// Comma separated Sepolia RPC URLs, paired by position with the child URLs
    #[arg(long, env = "PROOF_GEN_TESTNET_PARENT_RPCS", value_delimiter = ',')]
    pub testnet_parent_rpcs: Vec<Url>,
    /// RootChain proxy on Ethereum mainnet
    #[arg(
        long,
        env = "PROOF_GEN_MAINNET_ROOT_CHAIN",
        default_value = "0x86E4Dc95c7FBdBf52e33D563BbDB00823894C287"
    )]
    pub mainnet_root_chain: Address,
    /// RootChain proxy on Sepolia
    #[arg(
        long,
        env = "PROOF_GEN_TESTNET_ROOT_CHAIN",
        default_value = "0xbd07D7E1E93c8d4b2a261327F3C28a8EA7167Eff"
    )]
    pub testnet_root_chain: Address,
    /// zkEVM mainnet bridge service
    #[arg(
        long,
        env = "PROOF_GEN_ZKEVM_MAINNET_URL",
        default_value = "https://bridge-api.zkevm-rpc.com"
    )]
    pub zkevm_mainnet_url: Url,
    /// zkEVM Cardona bridge service
    #[arg(
        long,
        env = "PROOF_GEN_ZKEVM_TESTNET_URL",
        default_value = "https://bridge-api.cardona.zkevm-rpc.com"
    )]
    pub zkevm_testnet_url: Url,
    /// Timeout of a single RPC or bridge call, in milliseconds
    #[arg(long, env = "PROOF_GEN_RPC_TIMEOUT_MS", default_value = "10000")]
    pub rpc_timeout_ms: u64,
}

impl Config {
    pub fn rpc_timeout(&self) -> Duration {
        Duration::from_millis(self.rpc_timeout_ms)
    }

    pub fn mainnet_profile(&self) -> Result<NetworkProfile, ConfigError> {
        profile(
            Network::Mainnet,
            &self.mainnet_child_rpcs,
            &self.mainnet_parent_rpcs,
        )
    }

    pub fn testnet_profile(&self) -> Result<NetworkProfile, ConfigError> {
        profile(
            Network::Testnet,
            &self.testnet_child_rpcs,
            &self.testnet_parent_rpcs,
        )
    }

    /// Build the proof generation server
    pub async fn build(self) -> anyhow::Result<ProofGenServer> {
        let mainnet = self.mainnet_profile()?;
        let testnet = self.testnet_profile()?;
        tracing::info!(
            mainnet_endpoints = mainnet.len(),
            testnet_endpoints = testnet.len(),
            rpc_timeout = ?self.rpc_timeout(),
            "Configured endpoint pools"
        );

        let factory = RpcChainClientFactory::new(
            RootChainAddresses {
                mainnet: self.mainnet_root_chain,
                testnet: self.testnet_root_chain,
            },
            self.rpc_timeout(),
        );
        let bridge = BridgeProxy::new(
            self.zkevm_mainnet_url.clone(),
            self.zkevm_testnet_url.clone(),
            self.rpc_timeout(),
        );

        // Bind to an address
        let listener = TcpListener::bind(&self.listen_addr).await?;
        tracing::info!(listen_addr = ?self.listen_addr, "Listening on address");

        Ok(ProofGenServer {
            listener,
            state: ApiState::new(ProofService::new(factory, mainnet, testnet), bridge),
        })
    }
}

fn profile(
    network: Network,
    child: &[Url],
    parent: &[Url],
) -> Result<NetworkProfile, ConfigError> {
    if child.len() != parent.len() {
        return Err(ConfigError::MismatchedEndpoints {
            network,
            child: child.len(),
            parent: parent.len(),
        });
    }
    let endpoints = child
        .iter()
        .zip(parent)
        .map(|(child, parent)| Endpoint::new(child.clone(), parent.clone()))
        .collect();
    Ok(NetworkProfile::new(network, endpoints)?)
}
