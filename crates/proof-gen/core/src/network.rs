use serde::{
    Deserialize,
    Serialize,
};
use std::{
    fmt,
    str::FromStr,
};
use url::Url;

/// Network tier a request is served against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    Mainnet,
    Testnet,
}

impl Network {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Mainnet => "mainnet",
            Self::Testnet => "testnet",
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Network {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mainnet" => Ok(Self::Mainnet),
            "testnet" => Ok(Self::Testnet),
            _ => Err(format!("Invalid network: {s}")),
        }
    }
}

/// A child chain RPC paired with the parent chain RPC it is used with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoint {
    pub child: Url,
    pub parent: Url,
}

impl Endpoint {
    pub fn new(child: Url, parent: Url) -> Self {
        Self { child, parent }
    }
}
