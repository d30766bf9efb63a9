//! Lag alerting
//!
//! Classification of lag into severity levels, the debounce decision, and the
//! persisted record of the last level sent.

pub mod level;
pub mod state;

pub use level::{classify, decide, AlertChange, AlertDecision, AlertLevel, AlertThresholds};
pub use state::{PersistedState, StateStore};
