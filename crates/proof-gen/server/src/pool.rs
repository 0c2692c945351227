//! Per-network endpoint pool.

use proof_gen_core::{
    Endpoint,
    Network,
};
use std::sync::atomic::{
    AtomicUsize,
    Ordering,
};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("no RPC endpoints configured for {0}")]
pub struct EmptyPool(pub Network);

/// Endpoint list of one network tier plus the index of the endpoint that most
/// recently served a request.
///
/// The sticky index is only a hint for where the next sweep starts. It is read
/// and overwritten without coordination, concurrent sweeps may observe a stale
/// value and the last successful writer wins.
#[derive(Debug)]
pub struct NetworkProfile {
    network: Network,
    endpoints: Vec<Endpoint>,
    sticky: AtomicUsize,
}

impl NetworkProfile {
    pub fn new(network: Network, endpoints: Vec<Endpoint>) -> Result<Self, EmptyPool> {
        if endpoints.is_empty() {
            return Err(EmptyPool(network));
        }
        Ok(Self {
            network,
            endpoints,
            sticky: AtomicUsize::new(0),
        })
    }

    pub fn network(&self) -> Network {
        self.network
    }

    pub fn len(&self) -> usize {
        self.endpoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }

    /// Two full passes over the pool.
    pub fn max_attempts(&self) -> usize {
        2 * self.endpoints.len()
    }

    pub fn endpoint(&self, index: usize) -> &Endpoint {
        &self.endpoints[index % self.endpoints.len()]
    }

    pub fn start_index(&self) -> usize {
        self.sticky.load(Ordering::Relaxed) % self.endpoints.len()
    }

    /// Records `index` as the endpoint to start the next sweep from.
    pub fn commit(&self, index: usize) {
        let index = index % self.endpoints.len();
        if self.sticky.load(Ordering::Relaxed) != index {
            self.sticky.store(index, Ordering::Relaxed);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::endpoints;

    #[test]
    fn rejects_empty_pool() {
        assert_eq!(
            NetworkProfile::new(Network::Mainnet, vec![]).unwrap_err(),
            EmptyPool(Network::Mainnet)
        );
    }

    #[test]
    fn starts_at_zero_and_follows_commits() {
        let profile = NetworkProfile::new(Network::Testnet, endpoints(3)).unwrap();
        assert_eq!(profile.start_index(), 0);
        assert_eq!(profile.max_attempts(), 6);

        profile.commit(2);
        assert_eq!(profile.start_index(), 2);
        assert_eq!(profile.endpoint(2).child.as_str(), "http://child-2.local/");
    }

    #[test]
    fn endpoint_index_wraps() {
        let profile = NetworkProfile::new(Network::Mainnet, endpoints(2)).unwrap();
        assert_eq!(profile.endpoint(3), profile.endpoint(1));
        profile.commit(5);
        assert_eq!(profile.start_index(), 1);
    }
}
