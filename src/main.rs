// Main entry point - Dependency injection and widget startup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use std::sync::Arc;
use tokio::sync::RwLock;
use tracing_subscriber::EnvFilter;

use crate::application::click_service::ClickForwarder;
use crate::application::refresh_service::{ChartSettings, HoursSelector, RefreshService};
use crate::domain::chart::Chart;
use crate::domain::control::ControlPanel;
use crate::infrastructure::config::load_dashboard_config;
use crate::infrastructure::http_client::CollaboratorClient;
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::router;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Load configuration
    let config = load_dashboard_config()?;
    let addr = config.bind_addr()?;

    // Collaborator client (infrastructure layer)
    let client = Arc::new(CollaboratorClient::new(
        &config.collaborator.base_url,
        config.request_timeout(),
    )?);
    match client.ping().await {
        Ok(()) => tracing::info!(base_url = %config.collaborator.base_url, "collaborator reachable"),
        Err(e) => tracing::warn!(base_url = %config.collaborator.base_url, error = %e, "collaborator not reachable yet"),
    }

    // Services (application layer)
    let chart = Arc::new(RwLock::new(Chart::new(config.chart.dataset_label.clone())));
    let hours = HoursSelector::new(config.refresh.default_hours);
    let refresh_service = RefreshService::new(
        client.clone(),
        chart,
        ChartSettings {
            label_format: config.chart.label_format.clone(),
            sensor: config.chart.sensor.clone(),
        },
    );
    let clicks = ClickForwarder::new(client, ControlPanel::new(config.controls.clone()));

    let refresh = refresh_service.spawn(hours.clone(), config.poll_interval());

    let state = Arc::new(AppState {
        chart: refresh_service.chart(),
        hours,
        clicks,
    });

    tracing::info!(%addr, interval_secs = config.refresh.interval_secs, "starting heatpump dashboard");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router(state))
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "failed to listen for shutdown signal");
            }
        })
        .await?;

    refresh.shutdown().await;
    tracing::info!("dashboard stopped");

    Ok(())
}
