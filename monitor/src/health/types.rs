//! RPC response structures for the `/status` endpoint

use serde::Deserialize;

/// CometBFT `/status` response, reduced to the fields the monitor reads
#[derive(Debug, Clone, Deserialize)]
pub struct StatusResponse {
    pub result: Option<StatusResult>,
    pub error: Option<RpcError>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StatusResult {
    pub sync_info: SyncInfo,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SyncInfo {
    /// String-encoded integer
    pub latest_block_height: String,
    #[serde(default)]
    pub catching_up: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RpcError {
    #[serde(default)]
    pub code: i64,
    pub message: String,
}
