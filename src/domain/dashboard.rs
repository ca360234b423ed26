// Dashboard domain model
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use std::fmt;

pub const DEFAULT_DASHBOARD_ID: &str = "lovelace";

const DEFAULT_ENVELOPE_VERSION: u64 = 1;

/// The dashboard document stored under `data.config`.
///
/// Only `views` is interpreted; every other key is carried through untouched.
/// `views` is absent (`None`), explicitly `null` (`Some(None)`) or a list, and
/// each of those forms is written back as it was read.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardConfig {
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    views: Option<Option<Vec<View>>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl DashboardConfig {
    pub fn views(&self) -> &[View] {
        match &self.views {
            Some(Some(views)) => views,
            _ => &[],
        }
    }

    /// The view list, created on first use.
    pub fn views_mut(&mut self) -> &mut Vec<View> {
        self.views
            .get_or_insert(None)
            .get_or_insert_with(Vec::new)
    }

    /// Whether the document carries a `views` list at all.
    pub fn has_view_list(&self) -> bool {
        matches!(self.views, Some(Some(_)))
    }
}

// A key that is present always deserializes to `Some`, even when it holds `null`.
fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

/// Identifier of a dashboard as sent by callers (`url_path` on the host side).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DashboardId(String);

impl DashboardId {
    /// Accepts ASCII letters, digits, `_` and `-` so the id can be embedded in
    /// a storage file name.
    pub fn parse(raw: &str) -> Option<Self> {
        let valid = !raw.is_empty()
            && raw
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        valid.then(|| Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_default(&self) -> bool {
        self.0 == DEFAULT_DASHBOARD_ID
    }
}

impl Default for DashboardId {
    fn default() -> Self {
        Self(DEFAULT_DASHBOARD_ID.to_string())
    }
}

impl fmt::Display for DashboardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single view ("section") of a dashboard, keyed by `path`.
///
/// The body is opaque: cards, badges and sections are copied as-is. Entries
/// that are not JSON objects are kept too, but have no title or path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct View(Value);

impl View {
    pub fn from_body(body: Map<String, Value>) -> Self {
        Self(Value::Object(body))
    }

    /// Minimal body for a freshly created view: one grid holding a heading card.
    pub fn placeholder(title: &str, path: &str, heading: &str) -> Self {
        let mut body = Map::new();
        body.insert("type".to_string(), Value::from("sections"));
        body.insert("max_columns".to_string(), Value::from(4));
        body.insert("title".to_string(), Value::from(title));
        body.insert("path".to_string(), Value::from(path));
        body.insert(
            "sections".to_string(),
            json!([{
                "type": "grid",
                "cards": [{ "type": "heading", "heading": heading }]
            }]),
        );
        Self(Value::Object(body))
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.as_object()?.get(key)
    }

    pub fn path(&self) -> Option<&str> {
        self.get("path").and_then(Value::as_str)
    }

    pub fn title(&self) -> Option<&str> {
        self.get("title").and_then(Value::as_str)
    }

    pub fn set_title(&mut self, title: &str) {
        self.set("title", title);
    }

    pub fn set_path(&mut self, path: &str) {
        self.set("path", path);
    }

    fn set(&mut self, key: &str, value: &str) {
        if let Some(body) = self.0.as_object_mut() {
            body.insert(key.to_string(), Value::from(value));
        }
    }
}

/// `{title, path}` projection returned by the list operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewSummary {
    pub title: String,
    pub path: String,
}

/// On-disk wrapper around a dashboard document.
///
/// Unknown keys at both levels are retained so a read-modify-write cycle only
/// ever touches `data.config`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageEnvelope {
    #[serde(default = "default_envelope_version")]
    pub version: u64,
    #[serde(default = "default_envelope_version")]
    pub minor_version: u64,
    #[serde(default = "default_envelope_key")]
    pub key: String,
    #[serde(default)]
    pub data: EnvelopeData,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnvelopeData {
    #[serde(default)]
    pub config: DashboardConfig,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl StorageEnvelope {
    /// Envelope synthesized the first time a storage slot is written.
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            version: DEFAULT_ENVELOPE_VERSION,
            minor_version: DEFAULT_ENVELOPE_VERSION,
            key: key.into(),
            data: EnvelopeData::default(),
            extra: Map::new(),
        }
    }
}

impl Default for StorageEnvelope {
    fn default() -> Self {
        Self::new(DEFAULT_DASHBOARD_ID)
    }
}

fn default_envelope_version() -> u64 {
    DEFAULT_ENVELOPE_VERSION
}

fn default_envelope_key() -> String {
    DEFAULT_DASHBOARD_ID.to_string()
}
