//! hub-gateway server entry point.
//!
//! Starts the Axum HTTP server with the hub REST endpoints.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use hub_gateway::api;
use hub_gateway::app_state::AppState;
use hub_gateway::config::{self, AnalyticsBackend, HubConfig};
use hub_gateway::persistence::{MemoryAnalytics, PostgresAnalytics, SharedAnalytics};
use hub_gateway::service::HubService;
use hub_gateway::upstream::GitHubRawSource;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    let log_json = config::log_json_from_env();
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if log_json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    // Load configuration
    let config = HubConfig::from_env()
        .map_err(|e| anyhow::anyhow!(e))
        .context("invalid configuration")?;

    tracing::info!(
        addr = %config.listen_addr,
        upstream = %config.upstream_base_url,
        "starting hub-gateway"
    );

    // Build upstream and persistence layers
    let source = GitHubRawSource::new(
        &config.upstream_base_url,
        Duration::from_secs(config.upstream_timeout_secs),
        &config.upstream_user_agent,
    )?;
    let analytics = build_analytics(&config).await?;

    // Build service layer
    let hub_service = HubService::new(Arc::new(source), analytics, config.nav_section.clone())?;
    let app = api::app(AppState::new(hub_service));

    // Start server
    let listener = tokio::net::TcpListener::bind(config.listen_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.listen_addr))?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

async fn build_analytics(config: &HubConfig) -> anyhow::Result<Option<SharedAnalytics>> {
    let store: Option<SharedAnalytics> = match config.analytics_backend {
        AnalyticsBackend::Postgres => {
            let store = PostgresAnalytics::connect(config)
                .await
                .context("failed to connect analytics database")?;
            Some(Arc::new(store))
        }
        AnalyticsBackend::Memory => Some(Arc::new(MemoryAnalytics::new())),
        AnalyticsBackend::Disabled => None,
    };

    match &store {
        Some(store) => tracing::info!(backend = store.backend_name(), "analytics enabled"),
        None => tracing::info!("analytics disabled"),
    }
    Ok(store)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    tracing::info!("shutdown signal received");
}
