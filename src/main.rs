// Main entry point - Dependency injection and server setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use anyhow::Context;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use crate::application::dispatcher::RequestDispatcher;
use crate::application::host_gateway::HostGateway;
use crate::application::lovelace_service::LovelaceService;
use crate::infrastructure::config::load_settings;
use crate::infrastructure::file_store::JsonFileStore;
use crate::infrastructure::home_assistant::{HomeAssistantGateway, LogOnlyGateway};
use crate::presentation::app_state::AppState;
use crate::presentation::router::build_router;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Load configuration
    let settings = load_settings().context("Failed to load configuration")?;

    // Create repository (infrastructure layer)
    let repository = Arc::new(JsonFileStore::new(
        &settings.storage.config_dir,
        settings.storage.layout,
    ));

    let host: Arc<dyn HostGateway> = match settings.host.base_url.clone() {
        Some(base_url) => {
            tracing::info!("Forwarding reloads to host at {}", base_url);
            Arc::new(HomeAssistantGateway::new(base_url, settings.host.token.clone()))
        }
        None => {
            tracing::warn!("host.base_url is not set; host reloads will only be logged");
            Arc::new(LogOnlyGateway)
        }
    };

    // Create services (application layer)
    let service = LovelaceService::new(repository, host, settings.editor.placeholder_heading.clone());

    // Create application state
    let state = Arc::new(AppState {
        dispatcher: RequestDispatcher::new(service),
    });

    // Build router (presentation layer)
    let router = build_router(state);

    // Start server
    let addr = settings.server.bind_addr;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!(
        "Starting lovelace-api on {} (storage: {}, layout: {:?})",
        addr,
        settings.storage.config_dir.display(),
        settings.storage.layout
    );

    axum::serve(listener, router).await?;

    Ok(())
}
