use serde::Deserialize;
use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub storage: StorageSettings,
    #[serde(default)]
    pub host: HostSettings,
    #[serde(default)]
    pub editor: EditorSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: SocketAddr,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageSettings {
    /// Host configuration directory; documents live under `<config_dir>/.storage`.
    #[serde(default = "default_config_dir")]
    pub config_dir: PathBuf,
    #[serde(default)]
    pub layout: StorageLayout,
}

/// How dashboard ids map onto storage files.
#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StorageLayout {
    /// Every dashboard id reads and writes the single `lovelace` slot.
    #[default]
    Shared,
    /// `lovelace` for the default dashboard, `lovelace.<id>` for the others.
    PerDashboard,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct HostSettings {
    pub base_url: Option<String>,
    pub token: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct EditorSettings {
    #[serde(default = "default_placeholder_heading")]
    pub placeholder_heading: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
        }
    }
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            config_dir: default_config_dir(),
            layout: StorageLayout::default(),
        }
    }
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            placeholder_heading: default_placeholder_heading(),
        }
    }
}

fn default_bind_addr() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 8080))
}

fn default_config_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_placeholder_heading() -> String {
    "New section".to_string()
}

/// Reads `config/server.{toml,yaml,json}` if present, then `LOVELACE_API__*`
/// environment variables (e.g. `LOVELACE_API__STORAGE__CONFIG_DIR`).
pub fn load_settings() -> anyhow::Result<Settings> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/server").required(false))
        .add_source(
            config::Environment::with_prefix("LOVELACE_API")
                .prefix_separator("__")
                .separator("__"),
        )
        .build()?;

    Ok(settings.try_deserialize()?)
}
