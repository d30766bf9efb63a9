//! This module provides reusable test utilities:
//! - Mock HTTP servers (RPC endpoints, bot API)
//! - Test configuration builder
//! - Common test data

// Not every test binary uses every fixture
#![allow(dead_code)]
#![allow(unused_imports)]

pub mod mock_rpc;
pub mod mock_telegram;
pub mod test_config;
pub mod test_data;

// Re-export commonly used items
pub use mock_rpc::MockRpcServer;
pub use mock_telegram::MockTelegramServer;
pub use test_config::TestConfigBuilder;
pub use test_data::*;
