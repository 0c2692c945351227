use proof_gen_server::Config;

use clap::Parser;
use tokio_util::sync::CancellationToken;

use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    let _guard = rust_tracing::trace();

    let config = Config::parse();
    tracing::info!(
        listen_addr = %config.listen_addr,
        zkevm_mainnet_url = %config.zkevm_mainnet_url,
        zkevm_testnet_url = %config.zkevm_testnet_url,
        "Starting proof generation server"
    );

    let server = config.build().await?;
    let cancel_token = CancellationToken::new();
    let mut server_future = Box::pin(server.run(cancel_token.clone()));

    let result = tokio::select! {
        result = &mut server_future => result,
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Received Ctrl-C signal, draining in-flight requests");
            cancel_token.cancel();
            server_future.await
        }
    };

    match &result {
        Ok(()) => tracing::info!("Server shutdown gracefully"),
        Err(e) => tracing::error!(error = ?e, "Server encountered an error"),
    }
    result
}
