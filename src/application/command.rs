// Lovelace commands - Parameter validation shared by the HTTP and service surfaces
use crate::application::error::LovelaceError;
use crate::domain::dashboard::{DashboardConfig, DashboardId};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

pub const SERVICE_GET_LOVELACE_CONFIG: &str = "get_lovelace_config";
pub const SERVICE_SAVE_LOVELACE_CONFIG: &str = "save_lovelace_config";
pub const SERVICE_UPSERT_LOVELACE_VIEW: &str = "upsert_lovelace_view";
pub const SERVICE_DELETE_LOVELACE_VIEW: &str = "delete_lovelace_view";
pub const SERVICE_GET_LOVELACE_SECTION: &str = "get_lovelace_section";
pub const SERVICE_SET_LOVELACE_SECTION: &str = "set_lovelace_section";
pub const SERVICE_GET_LOVELACE_LIST: &str = "get_lovelace_list";
pub const SERVICE_RESTART_HASS: &str = "restart_hass";

/// A validated operation. Building one never touches storage.
#[derive(Debug, Clone, PartialEq)]
pub enum LovelaceCommand {
    GetConfig {
        dashboard_id: DashboardId,
    },
    SaveConfig {
        dashboard_id: DashboardId,
        config: DashboardConfig,
    },
    GetSection {
        dashboard_id: DashboardId,
        path: String,
    },
    SetSection {
        dashboard_id: DashboardId,
        path: String,
        view_config: Map<String, Value>,
    },
    UpsertView {
        dashboard_id: DashboardId,
        title: String,
        path: String,
    },
    DeleteView {
        dashboard_id: DashboardId,
        path: String,
    },
    ListViews {
        dashboard_id: DashboardId,
    },
    RestartHost,
}

#[derive(Debug, Default, Deserialize)]
pub struct DashboardParams {
    pub dashboard_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SaveConfigParams {
    pub dashboard_id: Option<String>,
    pub config: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SectionParams {
    pub dashboard_id: Option<String>,
    pub path: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SetSectionParams {
    pub dashboard_id: Option<String>,
    pub path: Option<String>,
    pub view_config: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpsertViewParams {
    pub dashboard_id: Option<String>,
    pub title: Option<String>,
    pub path: Option<String>,
}

impl DashboardParams {
    pub fn into_get_config(self) -> Result<LovelaceCommand, LovelaceError> {
        Ok(LovelaceCommand::GetConfig {
            dashboard_id: dashboard_id(self.dashboard_id)?,
        })
    }

    pub fn into_list_views(self) -> Result<LovelaceCommand, LovelaceError> {
        Ok(LovelaceCommand::ListViews {
            dashboard_id: dashboard_id(self.dashboard_id)?,
        })
    }
}

impl SaveConfigParams {
    pub fn into_command(self) -> Result<LovelaceCommand, LovelaceError> {
        let dashboard_id = dashboard_id(self.dashboard_id)?;
        let config: DashboardConfig = match self.config {
            Some(config @ Value::Object(_)) => serde_json::from_value(config)
                .map_err(|e| LovelaceError::Validation(format!("Invalid config: {}", e)))?,
            Some(Value::Null) | None => return Err(validation("No config provided")),
            Some(_) => return Err(validation("config must be a JSON object")),
        };
        Ok(LovelaceCommand::SaveConfig { dashboard_id, config })
    }
}

impl SectionParams {
    pub fn into_get_section(self) -> Result<LovelaceCommand, LovelaceError> {
        Ok(LovelaceCommand::GetSection {
            dashboard_id: dashboard_id(self.dashboard_id)?,
            path: required(self.path).ok_or_else(|| validation("Path is required"))?,
        })
    }

    pub fn into_delete_view(self) -> Result<LovelaceCommand, LovelaceError> {
        Ok(LovelaceCommand::DeleteView {
            dashboard_id: dashboard_id(self.dashboard_id)?,
            path: required(self.path).ok_or_else(|| validation("Path is required"))?,
        })
    }
}

impl SetSectionParams {
    pub fn into_command(self) -> Result<LovelaceCommand, LovelaceError> {
        let dashboard_id = dashboard_id(self.dashboard_id)?;
        let path = required(self.path);
        let view_config = match self.view_config {
            Some(Value::Object(map)) if !map.is_empty() => Some(map),
            Some(Value::Object(_)) | Some(Value::Null) | None => None,
            Some(_) => return Err(validation("view_config must be a JSON object")),
        };
        match (path, view_config) {
            (Some(path), Some(view_config)) => Ok(LovelaceCommand::SetSection {
                dashboard_id,
                path,
                view_config,
            }),
            _ => Err(validation("Path and view_config are required")),
        }
    }
}

impl UpsertViewParams {
    pub fn into_command(self) -> Result<LovelaceCommand, LovelaceError> {
        let dashboard_id = dashboard_id(self.dashboard_id)?;
        match (required(self.title), required(self.path)) {
            (Some(title), Some(path)) => Ok(LovelaceCommand::UpsertView {
                dashboard_id,
                title,
                path,
            }),
            _ => Err(validation("Title and path are required")),
        }
    }
}

impl LovelaceCommand {
    /// Builds a command from a service name and its data payload.
    pub fn from_service(service: &str, data: Value) -> Result<Self, LovelaceError> {
        match service {
            SERVICE_GET_LOVELACE_CONFIG => params::<DashboardParams>(data)?.into_get_config(),
            SERVICE_SAVE_LOVELACE_CONFIG => params::<SaveConfigParams>(data)?.into_command(),
            SERVICE_UPSERT_LOVELACE_VIEW => params::<UpsertViewParams>(data)?.into_command(),
            SERVICE_DELETE_LOVELACE_VIEW => params::<SectionParams>(data)?.into_delete_view(),
            SERVICE_GET_LOVELACE_SECTION => params::<SectionParams>(data)?.into_get_section(),
            SERVICE_SET_LOVELACE_SECTION => params::<SetSectionParams>(data)?.into_command(),
            SERVICE_GET_LOVELACE_LIST => params::<DashboardParams>(data)?.into_list_views(),
            SERVICE_RESTART_HASS => Ok(Self::RestartHost),
            _ => Err(LovelaceError::Validation(format!("Unknown service '{}'", service))),
        }
    }
}

fn params<T: DeserializeOwned>(data: Value) -> Result<T, LovelaceError> {
    serde_json::from_value(data)
        .map_err(|e| LovelaceError::Validation(format!("Invalid service data: {}", e)))
}

fn dashboard_id(raw: Option<String>) -> Result<DashboardId, LovelaceError> {
    match raw {
        None => Ok(DashboardId::default()),
        Some(raw) => DashboardId::parse(&raw)
            .ok_or_else(|| LovelaceError::Validation(format!("Invalid dashboard_id '{}'", raw))),
    }
}

// Empty strings count as missing.
fn required(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn validation(message: &str) -> LovelaceError {
    LovelaceError::Validation(message.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn lovelace() -> DashboardId {
        DashboardId::default()
    }

    fn message(err: LovelaceError) -> String {
        match err {
            LovelaceError::Validation(message) => message,
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_dashboard_id_defaults_to_lovelace() {
        let command = LovelaceCommand::from_service(SERVICE_GET_LOVELACE_LIST, json!({})).unwrap();
        assert_eq!(command, LovelaceCommand::ListViews { dashboard_id: lovelace() });
    }

    #[test]
    fn test_invalid_dashboard_id_is_rejected() {
        let err = LovelaceCommand::from_service(
            SERVICE_GET_LOVELACE_CONFIG,
            json!({ "dashboard_id": "../../etc" }),
        )
        .unwrap_err();
        assert_eq!(message(err), "Invalid dashboard_id '../../etc'");
    }

    #[test]
    fn test_save_config_requires_object() {
        let missing = SaveConfigParams::default().into_command().unwrap_err();
        assert_eq!(message(missing), "No config provided");

        let wrong = LovelaceCommand::from_service(SERVICE_SAVE_LOVELACE_CONFIG, json!({ "config": [1] }))
            .unwrap_err();
        assert_eq!(message(wrong), "config must be a JSON object");

        let bad_views = LovelaceCommand::from_service(
            SERVICE_SAVE_LOVELACE_CONFIG,
            json!({ "config": { "views": "not a list" } }),
        )
        .unwrap_err();
        assert!(message(bad_views).starts_with("Invalid config"));

        let ok = LovelaceCommand::from_service(
            SERVICE_SAVE_LOVELACE_CONFIG,
            json!({ "dashboard_id": "lovelace", "config": { "views": [] } }),
        )
        .unwrap();
        assert!(matches!(ok, LovelaceCommand::SaveConfig { .. }));
    }

    #[test]
    fn test_upsert_requires_title_and_path() {
        let err = LovelaceCommand::from_service(SERVICE_UPSERT_LOVELACE_VIEW, json!({ "path": "p" }))
            .unwrap_err();
        assert_eq!(message(err), "Title and path are required");

        let err = LovelaceCommand::from_service(
            SERVICE_UPSERT_LOVELACE_VIEW,
            json!({ "title": "", "path": "p" }),
        )
        .unwrap_err();
        assert_eq!(message(err), "Title and path are required");

        let command = LovelaceCommand::from_service(
            SERVICE_UPSERT_LOVELACE_VIEW,
            json!({ "title": "Kitchen", "path": "kitchen" }),
        )
        .unwrap();
        assert_eq!(
            command,
            LovelaceCommand::UpsertView {
                dashboard_id: lovelace(),
                title: "Kitchen".into(),
                path: "kitchen".into(),
            }
        );
    }

    #[test]
    fn test_section_commands_require_path() {
        for service in [SERVICE_GET_LOVELACE_SECTION, SERVICE_DELETE_LOVELACE_VIEW] {
            let err = LovelaceCommand::from_service(service, json!({})).unwrap_err();
            assert_eq!(message(err), "Path is required");
        }
    }

    #[test]
    fn test_set_section_requires_path_and_view_config() {
        let err = LovelaceCommand::from_service(SERVICE_SET_LOVELACE_SECTION, json!({ "path": "p" }))
            .unwrap_err();
        assert_eq!(message(err), "Path and view_config are required");

        let err = LovelaceCommand::from_service(
            SERVICE_SET_LOVELACE_SECTION,
            json!({ "path": "p", "view_config": "cards" }),
        )
        .unwrap_err();
        assert_eq!(message(err), "view_config must be a JSON object");

        let command = LovelaceCommand::from_service(
            SERVICE_SET_LOVELACE_SECTION,
            json!({ "path": "p", "view_config": { "title": "P" } }),
        )
        .unwrap();
        assert!(matches!(command, LovelaceCommand::SetSection { path, .. } if path == "p"));
    }

    #[test]
    fn test_wrong_parameter_types_are_client_errors() {
        let err = LovelaceCommand::from_service(SERVICE_UPSERT_LOVELACE_VIEW, json!({ "title": 5, "path": "p" }))
            .unwrap_err();
        assert!(message(err).starts_with("Invalid service data"));
    }

    #[test]
    fn test_unknown_service() {
        let err = LovelaceCommand::from_service("drop_tables", json!({})).unwrap_err();
        assert_eq!(message(err), "Unknown service 'drop_tables'");
    }

    #[test]
    fn test_restart_takes_no_data() {
        let command = LovelaceCommand::from_service(SERVICE_RESTART_HASS, json!({})).unwrap();
        assert_eq!(command, LovelaceCommand::RestartHost);
    }
}
