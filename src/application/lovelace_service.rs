// Lovelace service - Use cases over the stored dashboard document
use crate::application::dashboard_repository::{DashboardRepository, LoadIssue};
use crate::application::error::LovelaceError;
use crate::application::host_gateway::HostGateway;
use crate::application::reload_notifier::ReloadNotifier;
use crate::domain::dashboard::{DashboardConfig, DashboardId, View, ViewSummary};
use crate::domain::editor::UpsertOutcome;
use serde_json::{Map, Value};
use std::sync::Arc;

#[derive(Clone)]
pub struct LovelaceService {
    repository: Arc<dyn DashboardRepository>,
    host: Arc<dyn HostGateway>,
    notifier: ReloadNotifier,
    placeholder_heading: String,
}

impl LovelaceService {
    pub fn new(
        repository: Arc<dyn DashboardRepository>,
        host: Arc<dyn HostGateway>,
        placeholder_heading: String,
    ) -> Self {
        Self {
            repository,
            notifier: ReloadNotifier::new(host.clone()),
            host,
            placeholder_heading,
        }
    }

    /// Whole document. A dashboard that was never saved reads as `{}`.
    pub async fn get_config(&self, dashboard_id: &DashboardId) -> Result<DashboardConfig, LovelaceError> {
        self.repository.load(dashboard_id).await.into_readable()
    }

    pub async fn save_config(
        &self,
        dashboard_id: &DashboardId,
        config: DashboardConfig,
    ) -> Result<(), LovelaceError> {
        let _guard = self.repository.lock(dashboard_id).await;
        self.repository.save(dashboard_id, config).await?;
        self.notifier.notify(dashboard_id).await;
        Ok(())
    }

    pub async fn get_view(&self, dashboard_id: &DashboardId, path: &str) -> Result<View, LovelaceError> {
        let config = self.get_config(dashboard_id).await?;
        config
            .get_view(path)
            .cloned()
            .ok_or_else(|| LovelaceError::ViewNotFound { path: path.to_string() })
    }

    pub async fn set_view_content(
        &self,
        dashboard_id: &DashboardId,
        path: &str,
        body: Map<String, Value>,
    ) -> Result<(), LovelaceError> {
        self.mutate(dashboard_id, |config| {
            if config.set_view_content(path, body) == UpsertOutcome::Added {
                tracing::warn!("View with path '{}' not found, creating new", path);
            } else {
                tracing::info!("Replaced content of view with path '{}'", path);
            }
            Ok(())
        })
        .await
    }

    pub async fn upsert_view(
        &self,
        dashboard_id: &DashboardId,
        title: &str,
        path: &str,
    ) -> Result<(), LovelaceError> {
        let heading = self.placeholder_heading.as_str();
        self.mutate(dashboard_id, |config| {
            match config.upsert_view(title, path, heading) {
                UpsertOutcome::Added => tracing::info!("Adding new view with path '{}'", path),
                UpsertOutcome::Updated => tracing::info!("Updating existing view with path '{}'", path),
            }
            Ok(())
        })
        .await
    }

    /// Removes every view at `path`. Nothing is written when no view matched.
    pub async fn delete_view(&self, dashboard_id: &DashboardId, path: &str) -> Result<(), LovelaceError> {
        self.mutate(dashboard_id, |config| {
            if config.delete_view(path) {
                tracing::info!("Deleted view with path '{}'", path);
                Ok(())
            } else {
                tracing::warn!("No view found with path '{}'", path);
                Err(LovelaceError::ViewNotFound { path: path.to_string() })
            }
        })
        .await
    }

    /// `{title, path}` of each well-formed view. Read problems yield an empty list.
    pub async fn list_views(&self, dashboard_id: &DashboardId) -> Vec<ViewSummary> {
        let loaded = self.repository.load(dashboard_id).await;
        if let Some(LoadIssue::ReadFailure(reason)) = &loaded.issue {
            tracing::error!("Error getting Lovelace view list: {}", reason);
        }
        loaded.config.list_views()
    }

    pub async fn restart_host(&self) -> Result<(), LovelaceError> {
        tracing::info!("Requesting host restart");
        self.host.restart().await.map_err(|e| {
            tracing::error!("Error restarting host: {:#}", e);
            LovelaceError::Host(format!("{:#}", e))
        })
    }

    /// Runs one read-modify-write cycle under the slot lock. The edit may veto
    /// the save by returning an error; nothing is written or reloaded then.
    async fn mutate<F>(&self, dashboard_id: &DashboardId, edit: F) -> Result<(), LovelaceError>
    where
        F: FnOnce(&mut DashboardConfig) -> Result<(), LovelaceError>,
    {
        let _guard = self.repository.lock(dashboard_id).await;

        let mut config = self.repository.load(dashboard_id).await.into_readable()?;
        edit(&mut config)?;
        self.repository.save(dashboard_id, config).await?;
        self.notifier.notify(dashboard_id).await;

        Ok(())
    }
}
