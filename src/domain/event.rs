// Change notification announced after a dashboard is persisted
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Fired on the host event bus as `lovelace_updated`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LovelaceUpdated {
    pub dashboard_id: String,
    pub updated_at: DateTime<Utc>,
}

impl LovelaceUpdated {
    pub const EVENT_TYPE: &'static str = "lovelace_updated";

    pub fn now(dashboard_id: &str) -> Self {
        Self {
            dashboard_id: dashboard_id.to_string(),
            updated_at: Utc::now(),
        }
    }
}
