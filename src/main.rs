//! Tea Time - an egg timer with repeating reminders
//!
//! This is the main entry point for the teatime application.

use std::sync::Arc;
use anyhow::Context;
use tokio::{
    net::TcpListener,
    sync::{mpsc, watch},
};
use tracing::{info, warn};

use teatime::{
    api::create_router,
    clock::{Clock, SystemClock},
    config::Config,
    controller::Controller,
    entries::EntryStore,
    services::{check_command_available, DesktopNotifier, NOTIFY_COMMAND},
    state::AppState,
    tasks::driver_task,
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("teatime={},tower_http=info", config.log_level()))
        .init();

    info!("Starting teatime v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "Configuration: host={}, port={}, reminder every {}s",
        config.host, config.port, config.reminder_interval
    );

    let data_file = config
        .data_file()
        .context("could not determine a data directory, pass --data-file")?;
    let entries = EntryStore::load(&data_file)
        .with_context(|| format!("loading timer list from {}", data_file.display()))?;

    // Alerts are best effort: a missing program only costs us the alert
    if let Err(e) = check_command_available(NOTIFY_COMMAND).await {
        warn!("{}", e);
    }
    let sound = config.sound();
    if let Some(sound) = &sound {
        if let Err(e) = check_command_available(&sound.command).await {
            warn!("{}", e);
        }
    }

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let notifier = DesktopNotifier::new("Tea Time", sound);
    let controller = Controller::new(
        Arc::clone(&clock),
        entries,
        Box::new(notifier),
        config.timing(),
    );

    // Start the timer driver, the only owner of timer state
    let (command_tx, command_rx) = mpsc::channel(32);
    let (timer_tx, timer_rx) = watch::channel(controller.snapshot());
    let driver = tokio::spawn(driver_task(controller, clock, command_rx, timer_tx));

    let state = Arc::new(AppState::new(
        command_tx,
        timer_rx,
        config.port,
        config.host.clone(),
    ));

    // Create HTTP router with all endpoints
    let app = create_router(state);

    let addr = config.address();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding control API to {}", addr))?;

    info!("Control API running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST   /timers/:index/start - Start a timer from the list");
    info!("  POST   /stop                - Stop the timer and its reminders");
    info!("  POST   /focus               - Acknowledge a finished timer");
    info!("  GET    /entries             - List timers");
    info!("  POST   /entries             - Add a timer");
    info!("  PATCH  /entries/:index      - Edit a timer");
    info!("  DELETE /entries/:index      - Delete a timer");
    info!("  GET    /status              - Current timer state");
    info!("  GET    /health              - Health check");

    // Setup graceful shutdown
    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
        }
    }

    driver.abort();
    info!("Shutdown complete");
    Ok(())
}
