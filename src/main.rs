// Main entry point - Dependency injection, monitor loop and server setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use std::{net::SocketAddr, sync::Arc, time::Duration};
use tracing_subscriber::EnvFilter;

use crate::application::dispatcher::NotificationDispatcher;
use crate::application::monitor::{MonitorParams, Surfaces, WaveMonitor};
use crate::application::notifier::{LogNotifier, Notifier};
use crate::application::reading_source::{RandomWaveSource, SystemClock};
use crate::application::weather_service::WeatherService;
use crate::infrastructure::config::load_app_config;
use crate::infrastructure::openweather::OpenWeatherClient;
use crate::infrastructure::telegram::TelegramNotifier;
use crate::presentation::app_state::AppState;
use crate::presentation::dashboard::DashboardView;
use crate::presentation::router::build_router;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = load_app_config()?;
    let http = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.dispatch.send_timeout_secs))
        .build()?;

    // Outbound adapters (infrastructure layer)
    let notifier: Arc<dyn Notifier> = if config.telegram.bot_token.is_empty() {
        tracing::warn!("No Telegram bot token configured, notifications will only be logged");
        Arc::new(LogNotifier)
    } else {
        Arc::new(TelegramNotifier::new(http.clone(), &config.telegram))
    };
    let (dispatcher, dispatch_worker) = NotificationDispatcher::spawn(
        notifier,
        config.dispatch.queue_capacity,
        Duration::from_secs(config.dispatch.send_timeout_secs),
    );

    // Dashboard view implements every surface the monitor drives
    let dashboard = DashboardView::new(&config.map, config.dashboard.alert_queue_len);
    dashboard.label_sources();
    let view = Arc::new(dashboard.clone());
    let surfaces = Surfaces {
        map: view.clone(),
        chart: view.clone(),
        display: view.clone(),
        alarm: view.clone(),
        alerts: view.clone(),
        frame: view.clone(),
    };

    // One-shot weather snapshot, not awaited
    if config.weather.api_key.is_empty() {
        tracing::warn!("No OpenWeatherMap API key configured, skipping weather snapshot");
    } else {
        let weather = WeatherService::new(
            Arc::new(OpenWeatherClient::new(http.clone(), &config.weather)),
            view.clone(),
        );
        tokio::spawn(async move {
            weather.refresh().await;
        });
    }

    // Monitor loop (application layer)
    let monitor = WaveMonitor::new(
        MonitorParams::from_config(&config),
        surfaces,
        dispatcher.clone(),
        Box::new(RandomWaveSource::new(
            config.monitor.min_height_m,
            config.monitor.max_height_m,
            config.monitor.seed,
        )),
        Box::new(SystemClock),
    );
    let (stop_tx, stop_rx) = tokio::sync::oneshot::channel::<()>();
    let monitor_task = tokio::spawn(monitor.run(async move {
        let _ = stop_rx.await;
    }));

    // Build router (presentation layer)
    let state = Arc::new(AppState {
        dashboard,
        dispatcher,
    });
    let router = build_router(state);

    // Start server
    let addr: SocketAddr = config.server.bind.parse()?;
    tracing::info!("Starting wave-monitor service on {}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!("Failed to listen for Ctrl-C, running until killed: {}", e);
                std::future::pending::<()>().await;
            }
            tracing::info!("Shutdown requested");
        })
        .await?;

    // Stop ticking, then let queued notifications drain
    let _ = stop_tx.send(());
    monitor_task.await?;
    if tokio::time::timeout(Duration::from_secs(5), dispatch_worker)
        .await
        .is_err()
    {
        tracing::warn!("Notification queue did not drain before exit");
    }

    Ok(())
}
