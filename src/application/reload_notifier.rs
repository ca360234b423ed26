// Reload notifier - Pushes a persisted dashboard back into the host's live view
use crate::application::host_gateway::HostGateway;
use crate::domain::dashboard::DashboardId;
use crate::domain::event::LovelaceUpdated;
use std::sync::Arc;

#[derive(Clone)]
pub struct ReloadNotifier {
    host: Arc<dyn HostGateway>,
}

impl ReloadNotifier {
    pub fn new(host: Arc<dyn HostGateway>) -> Self {
        Self { host }
    }

    /// Reloads the host and announces the change. Failures are logged only:
    /// the document is already on disk by the time this runs.
    pub async fn notify(&self, dashboard_id: &DashboardId) {
        tracing::info!("Reloading Lovelace dashboard '{}'", dashboard_id);

        if let Err(e) = self.host.reload(dashboard_id).await {
            tracing::error!("Error reloading Lovelace dashboard '{}': {:#}", dashboard_id, e);
        }

        let event = LovelaceUpdated::now(dashboard_id.as_str());
        if let Err(e) = self.host.announce(&event).await {
            tracing::error!("Error announcing update of '{}': {:#}", dashboard_id, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::host_gateway::testing::{HostCall, RecordingGateway};

    #[tokio::test]
    async fn test_notify_reloads_then_announces() {
        let host = Arc::new(RecordingGateway::default());
        let notifier = ReloadNotifier::new(host.clone());

        notifier.notify(&DashboardId::default()).await;

        assert_eq!(
            host.calls(),
            vec![
                HostCall::Reload("lovelace".into()),
                HostCall::Announce("lovelace".into())
            ]
        );
    }

    #[tokio::test]
    async fn test_reload_failure_is_swallowed() {
        let host = Arc::new(RecordingGateway::failing_reload());
        let notifier = ReloadNotifier::new(host.clone());

        notifier.notify(&DashboardId::default()).await;

        assert_eq!(host.calls().len(), 2);
    }
}
