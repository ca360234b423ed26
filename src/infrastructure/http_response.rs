// HTTP response shaping for Lovelace results and errors
use crate::application::dispatcher::CommandReply;
use crate::application::error::LovelaceError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// Body of every failed request: `{"success": false, "error": "..."}`.
#[derive(Debug, Serialize)]
pub struct FailureBody {
    pub success: bool,
    pub error: String,
}

/// Reply of the service surface. `result` is omitted for commands that only
/// report success.
#[derive(Debug, Serialize)]
pub struct CommandOutcome {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<CommandReply>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl LovelaceError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::ViewNotFound { .. } => StatusCode::NOT_FOUND,
            Self::ReadFailure(_) | Self::PersistFailure(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Host(_) => StatusCode::BAD_GATEWAY,
        }
    }

    fn log(&self) {
        if self.status_code().is_server_error() {
            tracing::error!("Lovelace request failed: {}", self);
        } else {
            tracing::debug!("Lovelace request rejected: {}", self);
        }
    }
}

impl IntoResponse for LovelaceError {
    fn into_response(self) -> Response {
        self.log();
        let body = FailureBody {
            success: false,
            error: self.to_string(),
        };
        (self.status_code(), Json(body)).into_response()
    }
}

impl IntoResponse for CommandReply {
    fn into_response(self) -> Response {
        match self {
            Self::Config(config) => Json(config).into_response(),
            Self::View(view) => Json(view).into_response(),
            Self::Views(views) => Json(views).into_response(),
            Self::Done => Json(CommandOutcome {
                success: true,
                result: None,
                error: None,
            })
            .into_response(),
        }
    }
}

/// Shape a dispatched command for the service surface.
pub fn command_outcome_response(result: Result<CommandReply, LovelaceError>) -> Response {
    match result {
        Ok(reply) => {
            let result = match reply {
                CommandReply::Done => None,
                other => Some(other),
            };
            Json(CommandOutcome {
                success: true,
                result,
                error: None,
            })
            .into_response()
        }
        Err(e) => {
            e.log();
            let status = e.status_code();
            let outcome = CommandOutcome {
                success: false,
                result: None,
                error: Some(e.to_string()),
            };
            (status, Json(outcome)).into_response()
        }
    }
}
