//! Height probing
//!
//! This module reads chain heights from the monitored node and its peer RPC endpoints.

pub mod probe;
pub mod quorum;
pub mod types;

pub use probe::{fetch_block_height, probe_endpoint, HeightSample};
pub use quorum::{sample_peers, Quorum};
