// Host gateway backed by the Home Assistant REST API
use crate::application::host_gateway::HostGateway;
use crate::domain::dashboard::DashboardId;
use crate::domain::event::LovelaceUpdated;
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde_json::{Value, json};

#[derive(Debug, Clone)]
pub struct HomeAssistantGateway {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl HomeAssistantGateway {
    pub fn new(base_url: String, token: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        }
    }

    async fn post(&self, path: &str, body: &Value) -> Result<()> {
        let url = format!("{}{}", self.base_url, path);

        let mut request = self.client.post(&url).json(body);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .with_context(|| format!("Failed to send request to {}", url))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Host call {} failed with status {}: {}", path, status, body);
        }

        Ok(())
    }
}

#[async_trait]
impl HostGateway for HomeAssistantGateway {
    async fn reload(&self, _dashboard_id: &DashboardId) -> Result<()> {
        // The host reloads every dashboard at once.
        self.post("/api/services/lovelace/reload", &json!({ "force": true }))
            .await
    }

    async fn announce(&self, event: &LovelaceUpdated) -> Result<()> {
        let body = serde_json::to_value(event).context("Failed to encode event")?;
        self.post(&format!("/api/events/{}", LovelaceUpdated::EVENT_TYPE), &body)
            .await
    }

    async fn restart(&self) -> Result<()> {
        self.post("/api/services/homeassistant/restart", &json!({}))
            .await
    }
}

/// Used when no host URL is configured: calls are logged and succeed.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogOnlyGateway;

#[async_trait]
impl HostGateway for LogOnlyGateway {
    async fn reload(&self, dashboard_id: &DashboardId) -> Result<()> {
        tracing::info!("No host configured; skipping reload of '{}'", dashboard_id);
        Ok(())
    }

    async fn announce(&self, event: &LovelaceUpdated) -> Result<()> {
        tracing::info!("No host configured; skipping event for '{}'", event.dashboard_id);
        Ok(())
    }

    async fn restart(&self) -> Result<()> {
        anyhow::bail!("no host configured to restart")
    }
}
