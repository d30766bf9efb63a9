//! Central repository for intervals, defaults and message texts
//!
//! Organized by category so that timeouts and thresholds have a single source of truth.

/// Scheduling constants
pub mod schedule {
    /// Default interval between monitoring cycles
    pub const CHECK_INTERVAL_SECONDS: u64 = 15;

    /// Default per-request timeout for RPC probes and bot API calls
    pub const RPC_TIMEOUT_SECONDS: u64 = 5;

    /// Default interval between bot update polls
    pub const COMMAND_POLL_INTERVAL_SECONDS: u64 = 2;
}

/// Full-outage notification timing
pub mod outage {
    /// Outage time before the repeat timer starts counting
    pub const GRACE_SECONDS: u64 = 60;

    /// Time between repeated outage notifications
    pub const REPEAT_SECONDS: u64 = 60;
}

/// Default configuration values
pub mod defaults {
    pub const CONFIG_PATH: &str = "config/main.toml";

    pub const ENV_FILE: &str = ".env";

    pub const STATE_FILE: &str = "previous_state.yml";

    pub const TELEGRAM_API_URL: &str = "https://api.telegram.org";
}

/// Operator-facing texts
pub mod messages {
    /// Command that triggers the one-time acknowledgment
    pub const START_COMMAND: &str = "/start";

    pub const START_ACKNOWLEDGMENT: &str = "Monitoring has started!";
}
