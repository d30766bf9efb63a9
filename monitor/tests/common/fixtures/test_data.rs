//! Common test data and constants

/// Bot credentials used against the mock bot API
pub mod telegram {
    pub const BOT_TOKEN: &str = "123456:test-token";
    pub const CHAT_ID: &str = "-100200300";
}

/// Reference thresholds
pub mod thresholds {
    pub const LEVEL_1: i64 = 5;
    pub const LEVEL_2: i64 = 10;
    pub const LEVEL_3: i64 = 15;
}

/// Reference scheduling values, in seconds
pub mod timing {
    pub const CHECK_INTERVAL: u64 = 15;
    pub const RPC_TIMEOUT: u64 = 2;
    pub const OUTAGE_GRACE: u64 = 60;
    pub const OUTAGE_REPEAT: u64 = 60;
}

/// An address nothing listens on
pub const UNREACHABLE_URL: &str = "http://127.0.0.1:1";
