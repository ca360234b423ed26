// HTTP request handlers
use crate::application::command::{
    DashboardParams, LovelaceCommand, SaveConfigParams, SectionParams, SetSectionParams,
    UpsertViewParams,
};
use crate::application::error::LovelaceError;
use crate::infrastructure::http_response::command_outcome_response;
use crate::presentation::app_state::AppState;
use axum::{
    Json,
    body::Bytes,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    response::{IntoResponse, Response},
};
use serde_json::{Map, Value};
use std::sync::Arc;

type QueryParams<T> = Result<Query<T>, QueryRejection>;
type JsonBody<T> = Result<Json<T>, JsonRejection>;

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Whole dashboard document
pub async fn get_lovelace_config(
    State(state): State<Arc<AppState>>,
    query: QueryParams<DashboardParams>,
) -> Response {
    let command = query_params(query).and_then(DashboardParams::into_get_config);
    run(&state, command).await
}

/// Replace the whole dashboard document
pub async fn save_lovelace_config(
    State(state): State<Arc<AppState>>,
    body: JsonBody<SaveConfigParams>,
) -> Response {
    let command = json_body(body).and_then(SaveConfigParams::into_command);
    run(&state, command).await
}

/// One view, looked up by path
pub async fn get_lovelace_section(
    State(state): State<Arc<AppState>>,
    query: QueryParams<SectionParams>,
) -> Response {
    let command = query_params(query).and_then(SectionParams::into_get_section);
    run(&state, command).await
}

/// Replace (or create) the content of one view
pub async fn set_lovelace_section(
    State(state): State<Arc<AppState>>,
    body: JsonBody<SetSectionParams>,
) -> Response {
    let command = json_body(body).and_then(SetSectionParams::into_command);
    run(&state, command).await
}

/// Create a view or rename an existing one
pub async fn upsert_lovelace_view(
    State(state): State<Arc<AppState>>,
    body: JsonBody<UpsertViewParams>,
) -> Response {
    let command = json_body(body).and_then(UpsertViewParams::into_command);
    run(&state, command).await
}

pub async fn delete_lovelace_view(
    State(state): State<Arc<AppState>>,
    body: JsonBody<SectionParams>,
) -> Response {
    let command = json_body(body).and_then(SectionParams::into_delete_view);
    run(&state, command).await
}

/// `{title, path}` of every view
pub async fn get_lovelace_list(
    State(state): State<Arc<AppState>>,
    query: QueryParams<DashboardParams>,
) -> Response {
    let command = query_params(query).and_then(DashboardParams::into_list_views);
    run(&state, command).await
}

pub async fn restart_host(State(state): State<Arc<AppState>>) -> Response {
    run(&state, Ok(LovelaceCommand::RestartHost)).await
}

/// Service surface: `POST /services/{service}` with the service data as body.
/// An empty body means no data.
pub async fn call_service(
    Path(service): Path<String>,
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Response {
    let data = if body.iter().all(u8::is_ascii_whitespace) {
        Ok(Value::Object(Map::new()))
    } else {
        serde_json::from_slice(&body)
            .map_err(|e| LovelaceError::Validation(format!("Invalid service data: {}", e)))
    };

    let command = data.and_then(|data| LovelaceCommand::from_service(&service, data));
    let result = match command {
        Ok(command) => state.dispatcher.dispatch(command).await,
        Err(e) => Err(e),
    };
    command_outcome_response(result)
}

async fn run(state: &AppState, command: Result<LovelaceCommand, LovelaceError>) -> Response {
    let command = match command {
        Ok(command) => command,
        Err(e) => return e.into_response(),
    };

    match state.dispatcher.dispatch(command).await {
        Ok(reply) => reply.into_response(),
        Err(e) => e.into_response(),
    }
}

fn query_params<T>(query: QueryParams<T>) -> Result<T, LovelaceError> {
    query
        .map(|Query(params)| params)
        .map_err(|rejection| LovelaceError::Validation(rejection.body_text()))
}

fn json_body<T>(body: JsonBody<T>) -> Result<T, LovelaceError> {
    body.map(|Json(params)| params)
        .map_err(|rejection| LovelaceError::Validation(rejection.body_text()))
}
