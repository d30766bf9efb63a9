//! Scheduling loop
//!
//! Drives one monitoring cycle per tick: sample peers, probe the node, compute the
//! lag, and run the alert decision against the persisted state. A full outage takes
//! a separate path with its own repeat timer.

pub mod outage;

use reqwest::Client;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, error, info, warn};

use crate::alerts::{decide, AlertChange, AlertLevel, StateStore};
use crate::config::Config;
use crate::health::{fetch_block_height, sample_peers};
use crate::services::TelegramNotifier;
pub use outage::OutageTracker;

/// What a single cycle did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    /// No peer answered. `notification` is set on the ticks where the outage message was due.
    Outage { notification: Option<String> },

    /// Peers answered but the monitored node did not
    NodeUnreachable,

    /// Lag computed but the state file could not be read, so no alert decision was made
    StateUnavailable { lag: i64 },

    /// Lag computed and the alert decision applied
    Checked {
        lag: i64,
        level: AlertLevel,
        notification: Option<String>,
    },
}

pub struct LagMonitor {
    config: Arc<Config>,
    client: Client,
    notifier: Arc<TelegramNotifier>,
    state_store: StateStore,
    outage: OutageTracker,
}

impl LagMonitor {
    pub fn new(config: Arc<Config>, client: Client, notifier: Arc<TelegramNotifier>) -> Self {
        let state_store = StateStore::new(config.state_file.clone());
        Self {
            config,
            client,
            notifier,
            state_store,
            outage: OutageTracker::new(),
        }
    }

    pub fn outage(&self) -> &OutageTracker {
        &self.outage
    }

    pub async fn run(mut self, mut shutdown: watch::Receiver<bool>) {
        let mut ticker = interval(self.config.check_interval());
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut cycle_count = 0u64;

        loop {
            tokio::select! {
                _ = shutdown.changed() => {
                    info!("Monitoring loop stopping after {} cycles", cycle_count);
                    return;
                }
                _ = ticker.tick() => {
                    cycle_count += 1;
                    if cycle_count.is_multiple_of(20) {
                        info!("Monitoring cycle #{}", cycle_count);
                    }
                    // Shutdown drops an in-flight cycle before its next probe or notification
                    tokio::select! {
                        _ = shutdown.changed() => {
                            info!("Monitoring loop stopping during cycle #{}", cycle_count);
                            return;
                        }
                        _ = self.run_cycle() => {}
                    }
                }
            }
        }
    }

    pub async fn run_cycle(&mut self) -> CycleOutcome {
        debug!("Starting new check cycle");

        let quorum = match sample_peers(&self.client, &self.config.rpc_urls).await {
            Some(quorum) => quorum,
            None => return self.handle_outage().await,
        };

        if self.outage.is_in_outage() {
            info!(
                "RPC endpoints reachable again after {}s outage",
                self.outage.elapsed_since_last_success().as_secs()
            );
        }
        self.outage.reset();

        let best_height = quorum.best_height();
        let node_height = match fetch_block_height(&self.client, &self.config.node_url).await {
            Ok(height) => height,
            Err(e) => {
                error!("Error comparing with node {}: {}", self.config.node_url, e);
                return CycleOutcome::NodeUnreachable;
            }
        };

        let lag = height_lag(best_height, node_height);
        info!(
            "Current block height difference: {} blocks (best peer {} from {}/{} endpoints, node {})",
            lag,
            best_height,
            quorum.responded(),
            quorum.configured(),
            node_height
        );

        self.apply_alert(lag).await
    }

    async fn apply_alert(&self, lag: i64) -> CycleOutcome {
        let previous = match self.state_store.load().await {
            Ok(state) => state,
            Err(e) => {
                error!(
                    "Error loading previous state, alerting is paused until {} is fixed or removed: {}",
                    self.state_store.path().display(),
                    e
                );
                return CycleOutcome::StateUnavailable { lag };
            }
        };

        let decision = decide(lag, &self.config.thresholds, &previous);
        let notification = decision.message();

        if let Some(message) = &notification {
            match decision.change {
                Some(AlertChange::Escalated) => warn!("{}", message),
                _ => info!("{}", message),
            }

            // Persisted even when delivery failed
            self.notifier.notify(message).await;

            if let Err(e) = self.state_store.save(lag, decision.level).await {
                error!("Error saving alert state: {}", e);
            }
        }

        CycleOutcome::Checked {
            lag,
            level: decision.level,
            notification,
        }
    }

    async fn handle_outage(&mut self) -> CycleOutcome {
        let due = self
            .outage
            .record_outage(self.config.check_interval(), &self.config.outage);
        let elapsed = self.outage.elapsed_since_last_success().as_secs();

        warn!(
            "None of the {} RPC endpoints answered (outage for {}s)",
            self.config.rpc_urls.len(),
            elapsed
        );

        if !due {
            return CycleOutcome::Outage { notification: None };
        }

        let message = format!(
            "None of the RPC endpoints can be reached for {} seconds!",
            elapsed
        );
        error!("{}", message);
        self.notifier.notify(&message).await;

        CycleOutcome::Outage {
            notification: Some(message),
        }
    }
}

/// Best peer height minus node height; negative when the node is ahead
pub fn height_lag(best_peer_height: u64, node_height: u64) -> i64 {
    if best_peer_height >= node_height {
        i64::try_from(best_peer_height - node_height).unwrap_or(i64::MAX)
    } else {
        -i64::try_from(node_height - best_peer_height).unwrap_or(i64::MAX)
    }
}
