//! Fan-out probing of all peer endpoints

use futures::future::join_all;
use reqwest::Client;
use tracing::{debug, warn};

use super::probe::probe_endpoint;

/// Heights from the peers that answered this cycle. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quorum {
    heights: Vec<u64>,
    configured: usize,
}

impl Quorum {
    /// `None` when no endpoint answered
    pub fn from_heights(heights: Vec<u64>, configured: usize) -> Option<Self> {
        if heights.is_empty() {
            None
        } else {
            Some(Self {
                heights,
                configured,
            })
        }
    }

    pub fn best_height(&self) -> u64 {
        self.heights.iter().copied().max().unwrap_or_default()
    }

    pub fn responded(&self) -> usize {
        self.heights.len()
    }

    pub fn configured(&self) -> usize {
        self.configured
    }
}

/// Probe every endpoint concurrently and keep the successful heights.
///
/// Individual failures are logged and dropped. All probes finish (or time out)
/// before this returns.
pub async fn sample_peers(client: &Client, endpoints: &[String]) -> Option<Quorum> {
    let samples = join_all(
        endpoints
            .iter()
            .map(|endpoint| probe_endpoint(client, endpoint)),
    )
    .await;

    let mut heights = Vec::with_capacity(samples.len());
    for sample in samples {
        match sample.outcome {
            Ok(height) => {
                debug!("Peer {} reported height {}", sample.endpoint, height);
                heights.push(height);
            }
            Err(e) => warn!("Error fetching status from {}: {}", sample.endpoint, e),
        }
    }

    Quorum::from_heights(heights, endpoints.len())
}
