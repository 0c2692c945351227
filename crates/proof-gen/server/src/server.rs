use crate::api::{
    self,
    ApiState,
};
use anyhow::Result;
use proof_gen_chain::RpcChainClientFactory;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;

#[derive(Debug)]
pub struct ProofGenServer {
    pub listener: TcpListener,
    pub state: ApiState<RpcChainClientFactory>,
}

impl ProofGenServer {
    /// Run the server until the cancellation token is cancelled.
    pub async fn run(self, cancel_token: CancellationToken) -> Result<()> {
        tracing::info!("Started API server");
        api::serve(self.listener, self.state, cancel_token).await?;
        tracing::info!("Api stopped.");
        Ok(())
    }
}
