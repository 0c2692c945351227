use clap::Parser;
use proof_gen_server::Config;
use serde_json::{
    Value,
    json,
};
use std::net::SocketAddr;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use wiremock::{
    Request,
    ResponseTemplate,
};

/// Port nothing listens on.
pub const UNREACHABLE: &str = "http://127.0.0.1:1";

/// Upstreams the server under test talks to.
pub struct Upstreams<'a> {
    pub child: &'a str,
    pub parent: &'a str,
    pub bridge: &'a str,
}

impl Default for Upstreams<'_> {
    fn default() -> Self {
        Self {
            child: UNREACHABLE,
            parent: UNREACHABLE,
            bridge: UNREACHABLE,
        }
    }
}

pub struct RunningServer {
    pub addr: SocketAddr,
    cancel_token: CancellationToken,
    handle: JoinHandle<anyhow::Result<()>>,
}

impl RunningServer {
    /// Builds the server from command line arguments, every network served by
    /// the same upstreams.
    pub async fn start(upstreams: Upstreams<'_>) -> Self {
        let config = Config::try_parse_from([
            "proof-gen",
            "--listen-addr",
            "127.0.0.1:0",
            "--mainnet-child-rpcs",
            upstreams.child,
            "--mainnet-parent-rpcs",
            upstreams.parent,
            "--testnet-child-rpcs",
            upstreams.child,
            "--testnet-parent-rpcs",
            upstreams.parent,
            "--zkevm-mainnet-url",
            upstreams.bridge,
            "--zkevm-testnet-url",
            upstreams.bridge,
            "--rpc-timeout-ms",
            "2000",
        ])
        .unwrap();

        let server = config.build().await.unwrap();
        let addr = server.listener.local_addr().unwrap();
        let cancel_token = CancellationToken::new();
        let handle = tokio::spawn(server.run(cancel_token.clone()));

        Self {
            addr,
            cancel_token,
            handle,
        }
    }

    pub async fn get(&self, path: &str) -> (u16, Value) {
        let response = reqwest::get(format!("http://{}{path}", self.addr))
            .await
            .unwrap();
        let status = response.status().as_u16();
        (status, response.json().await.unwrap())
    }

    pub async fn stop(self) {
        self.cancel_token.cancel();
        self.handle.await.unwrap().unwrap();
    }
}

/// Answers every JSON-RPC request with `result`, echoing the request id.
pub fn rpc_result(result: Value) -> impl Fn(&Request) -> ResponseTemplate {
    move |request: &Request| {
        let body: Value = serde_json::from_slice(&request.body).unwrap();
        ResponseTemplate::new(200).set_body_json(json!({
            "jsonrpc": "2.0",
            "id": body["id"],
            "result": result,
        }))
    }
}
