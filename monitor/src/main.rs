use anyhow::Result;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use monitor::constants::defaults;
use monitor::rpc::create_client;
use monitor::{CommandListener, ConfigManager, LagMonitor, TelegramNotifier};

#[tokio::main]
async fn main() -> Result<()> {
    let env_filter = EnvFilter::from_default_env()
        .add_directive("monitor=info".parse()?)
        .add_directive("hyper=warn".parse()?)
        .add_directive("reqwest=warn".parse()?);

    fmt().with_env_filter(env_filter).init();

    info!("Starting block height monitor");

    ConfigManager::load_env_file(defaults::ENV_FILE)?;

    // Invalid thresholds or missing credentials stop the process here
    let config_path =
        std::env::var("MONITOR_CONFIG").unwrap_or_else(|_| defaults::CONFIG_PATH.to_string());
    let config_manager = ConfigManager::new(&config_path).await?;
    let config = config_manager.get_current_config();

    let client = create_client(config.rpc_timeout())?;
    let notifier = Arc::new(TelegramNotifier::new(client.clone(), &config.telegram));
    info!(
        "Notifications go to chat {} via {}",
        notifier.chat_id(),
        config.telegram.api_url
    );

    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let lag_monitor = LagMonitor::new(config.clone(), client.clone(), notifier.clone());
    let monitor_handle = tokio::spawn(lag_monitor.run(shutdown_rx.clone()));

    let listener = CommandListener::new(client, notifier, config.command_poll_interval());
    let listener_handle = tokio::spawn(listener.run(shutdown_rx));

    info!(
        "Background tasks started with {}s check interval and state file {}",
        config.check_interval_seconds,
        config.state_file.display()
    );

    shutdown_signal().await;
    info!("Shutdown signal received, stopping");

    if shutdown_tx.send(true).is_err() {
        warn!("Background tasks already stopped");
    }

    for (name, handle) in [("monitoring loop", monitor_handle), ("command listener", listener_handle)] {
        if let Err(e) = handle.await {
            error!("{} task failed: {}", name, e);
        }
    }

    info!("Block height monitor stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
}
