//! Single-endpoint height probe

use reqwest::Client;
use tracing::debug;

use super::types::StatusResponse;
use crate::errors::{MonitorError, ProtocolError, TransportError};

/// Result of probing one endpoint
#[derive(Debug)]
pub struct HeightSample {
    pub endpoint: String,
    pub outcome: Result<u64, MonitorError>,
}

pub async fn probe_endpoint(client: &Client, endpoint: &str) -> HeightSample {
    HeightSample {
        endpoint: endpoint.to_string(),
        outcome: fetch_block_height(client, endpoint).await,
    }
}

/// Fetch `result.sync_info.latest_block_height` from `<endpoint>/status`.
///
/// The request timeout comes from the client.
pub async fn fetch_block_height(client: &Client, endpoint: &str) -> Result<u64, MonitorError> {
    let status_url = format!("{}/status", endpoint);

    let response = client
        .get(&status_url)
        .send()
        .await
        .map_err(|e| TransportError::from_reqwest(endpoint, e))?;

    let status = response.status();
    if !status.is_success() {
        return Err(ProtocolError::UnexpectedStatus {
            endpoint: endpoint.to_string(),
            status: status.as_u16(),
            body: response.text().await.unwrap_or_default(),
        }
        .into());
    }

    let body = response
        .text()
        .await
        .map_err(|e| TransportError::from_reqwest(endpoint, e))?;

    let parsed: StatusResponse =
        serde_json::from_str(&body).map_err(|e| ProtocolError::InvalidBody {
            endpoint: endpoint.to_string(),
            reason: e.to_string(),
        })?;

    let result = match (parsed.result, parsed.error) {
        (Some(result), _) => result,
        (None, Some(error)) => {
            return Err(ProtocolError::InvalidBody {
                endpoint: endpoint.to_string(),
                reason: format!("RPC error {}: {}", error.code, error.message),
            }
            .into())
        }
        (None, None) => {
            return Err(ProtocolError::InvalidBody {
                endpoint: endpoint.to_string(),
                reason: "missing result".to_string(),
            }
            .into())
        }
    };

    let raw_height = result.sync_info.latest_block_height;
    let height = raw_height
        .trim()
        .parse::<u64>()
        .map_err(|_| ProtocolError::InvalidHeight {
            endpoint: endpoint.to_string(),
            value: raw_height.clone(),
        })?;

    debug!(
        "{} at height {} (catching up: {})",
        endpoint, height, result.sync_info.catching_up
    );
    Ok(height)
}
