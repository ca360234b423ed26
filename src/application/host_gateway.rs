// Gateway trait for calls into the host application
use crate::domain::dashboard::DashboardId;
use crate::domain::event::LovelaceUpdated;
use async_trait::async_trait;

#[async_trait]
pub trait HostGateway: Send + Sync {
    /// Ask the host to re-read the persisted dashboard into its live model.
    async fn reload(&self, dashboard_id: &DashboardId) -> anyhow::Result<()>;

    /// Publish a change event for external listeners.
    async fn announce(&self, event: &LovelaceUpdated) -> anyhow::Result<()>;

    async fn restart(&self) -> anyhow::Result<()>;
}
