// Request dispatcher - Runs validated commands against the Lovelace service
use crate::application::command::LovelaceCommand;
use crate::application::error::LovelaceError;
use crate::application::lovelace_service::LovelaceService;
use crate::domain::dashboard::{DashboardConfig, View, ViewSummary};
use serde::Serialize;

/// What a successful command produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CommandReply {
    Config(DashboardConfig),
    View(View),
    Views(Vec<ViewSummary>),
    Done,
}

#[derive(Clone)]
pub struct RequestDispatcher {
    service: LovelaceService,
}

impl RequestDispatcher {
    pub fn new(service: LovelaceService) -> Self {
        Self { service }
    }

    pub async fn dispatch(&self, command: LovelaceCommand) -> Result<CommandReply, LovelaceError> {
        tracing::debug!("Dispatching {:?}", command);

        match command {
            LovelaceCommand::GetConfig { dashboard_id } => {
                self.service.get_config(&dashboard_id).await.map(CommandReply::Config)
            }
            LovelaceCommand::SaveConfig { dashboard_id, config } => {
                self.service.save_config(&dashboard_id, config).await?;
                Ok(CommandReply::Done)
            }
            LovelaceCommand::GetSection { dashboard_id, path } => {
                self.service.get_view(&dashboard_id, &path).await.map(CommandReply::View)
            }
            LovelaceCommand::SetSection {
                dashboard_id,
                path,
                view_config,
            } => {
                self.service
                    .set_view_content(&dashboard_id, &path, view_config)
                    .await?;
                Ok(CommandReply::Done)
            }
            LovelaceCommand::UpsertView {
                dashboard_id,
                title,
                path,
            } => {
                self.service.upsert_view(&dashboard_id, &title, &path).await?;
                Ok(CommandReply::Done)
            }
            LovelaceCommand::DeleteView { dashboard_id, path } => {
                self.service.delete_view(&dashboard_id, &path).await?;
                Ok(CommandReply::Done)
            }
            LovelaceCommand::ListViews { dashboard_id } => {
                Ok(CommandReply::Views(self.service.list_views(&dashboard_id).await))
            }
            LovelaceCommand::RestartHost => {
                self.service.restart_host().await?;
                Ok(CommandReply::Done)
            }
        }
    }
}
