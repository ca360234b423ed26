// Repository trait for dashboard document storage
use crate::application::error::LovelaceError;
use crate::domain::dashboard::{DashboardConfig, DashboardId};
use async_trait::async_trait;
use tokio::sync::OwnedMutexGuard;

/// Why a load produced an empty document instead of stored content.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadIssue {
    NotFound,
    ReadFailure(String),
}

/// Result of a load: the document (empty on any issue) plus what went wrong, if anything.
#[derive(Debug, Clone, Default)]
pub struct LoadedConfig {
    pub config: DashboardConfig,
    pub issue: Option<LoadIssue>,
}

impl LoadedConfig {
    pub fn found(config: DashboardConfig) -> Self {
        Self { config, issue: None }
    }

    pub fn missing() -> Self {
        Self {
            config: DashboardConfig::default(),
            issue: Some(LoadIssue::NotFound),
        }
    }

    pub fn unreadable(reason: String) -> Self {
        Self {
            config: DashboardConfig::default(),
            issue: Some(LoadIssue::ReadFailure(reason)),
        }
    }

    /// Document for callers that build on stored content: a missing file is an
    /// empty dashboard, an unreadable one is an error.
    pub fn into_readable(self) -> Result<DashboardConfig, LovelaceError> {
        match self.issue {
            Some(LoadIssue::ReadFailure(reason)) => Err(LovelaceError::ReadFailure(reason)),
            _ => Ok(self.config),
        }
    }
}

#[async_trait]
pub trait DashboardRepository: Send + Sync {
    /// Exclusive access to the storage slot backing `dashboard_id`.
    /// Held across a whole load → edit → save → notify cycle.
    async fn lock(&self, dashboard_id: &DashboardId) -> OwnedMutexGuard<()>;

    async fn load(&self, dashboard_id: &DashboardId) -> LoadedConfig;

    /// Replaces `data.config` in the stored envelope, keeping all other metadata.
    async fn save(&self, dashboard_id: &DashboardId, config: DashboardConfig) -> Result<(), LovelaceError>;
}
