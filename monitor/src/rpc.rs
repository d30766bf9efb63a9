//! Shared HTTP client construction
//!
//! Every outbound call (peer probes, node probe, bot API) goes through a client
//! built here, bounded by the configured RPC timeout.

use anyhow::{anyhow, Result};
use reqwest::Client;
use std::time::Duration;

/// Create the HTTP client used for RPC probes and bot API calls
pub fn create_client(request_timeout: Duration) -> Result<Client> {
    Client::builder()
        .timeout(request_timeout)
        .connect_timeout(request_timeout)
        .build()
        .map_err(|e| anyhow!("Failed to create HTTP client: {}", e))
}
