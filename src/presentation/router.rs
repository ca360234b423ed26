// Route table
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{
    call_service, delete_lovelace_view, get_lovelace_config, get_lovelace_list,
    get_lovelace_section, health_check, restart_host, save_lovelace_config, set_lovelace_section,
    upsert_lovelace_view,
};
use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub const API_BASE_PATH: &str = "/api/ha_rest_api";

pub fn build_router(state: Arc<AppState>) -> Router {
    let api = Router::new()
        .route("/lovelace", get(get_lovelace_config).post(save_lovelace_config))
        .route(
            "/lovelace_section",
            get(get_lovelace_section).post(set_lovelace_section),
        )
        .route("/lovelace_section/upsert", post(upsert_lovelace_view))
        .route("/lovelace_section/delete", post(delete_lovelace_view))
        .route("/lovelace_list", get(get_lovelace_list))
        .route("/restart", post(restart_host))
        .route("/services/:service", post(call_service));

    Router::new()
        .route("/healthz", get(health_check))
        .nest(API_BASE_PATH, api)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
