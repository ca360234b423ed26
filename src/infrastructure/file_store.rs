// JSON file repository for dashboard documents
use crate::application::dashboard_repository::{DashboardRepository, LoadedConfig};
use crate::application::error::LovelaceError;
use crate::domain::dashboard::{DEFAULT_DASHBOARD_ID, DashboardConfig, DashboardId, StorageEnvelope};
use crate::infrastructure::config::StorageLayout;
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::ffi::OsString;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::OwnedMutexGuard;

/// Stores each dashboard as a host-style envelope under `<config_dir>/.storage`.
///
/// Writes go through a temp file and a rename, so readers see either the old
/// or the new file. Writers serialize on a per-file async mutex. The registry
/// only holds mutexes that are locked or awaited; idle ones are dropped on the
/// next `lock` call.
pub struct JsonFileStore {
    storage_dir: PathBuf,
    layout: StorageLayout,
    locks: Mutex<HashMap<PathBuf, Arc<tokio::sync::Mutex<()>>>>,
}

impl JsonFileStore {
    pub fn new(config_dir: impl AsRef<Path>, layout: StorageLayout) -> Self {
        Self {
            storage_dir: config_dir.as_ref().join(".storage"),
            layout,
            locks: Mutex::new(HashMap::new()),
        }
    }

    /// Storage key, also used as the file name and as `key` in new envelopes.
    fn slot_key(&self, dashboard_id: &DashboardId) -> String {
        match self.layout {
            StorageLayout::PerDashboard if !dashboard_id.is_default() => {
                format!("{}.{}", DEFAULT_DASHBOARD_ID, dashboard_id)
            }
            _ => DEFAULT_DASHBOARD_ID.to_string(),
        }
    }

    pub fn resolve_path(&self, dashboard_id: &DashboardId) -> PathBuf {
        self.storage_dir.join(self.slot_key(dashboard_id))
    }

    /// `Ok(None)` when there is no file yet.
    async fn read_envelope(path: &Path) -> Result<Option<StorageEnvelope>> {
        let bytes = match fs::read(path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to read {}", path.display()));
            }
        };

        let envelope = serde_json::from_slice(&bytes)
            .with_context(|| format!("Malformed Lovelace storage file {}", path.display()))?;
        Ok(Some(envelope))
    }
}

#[async_trait]
impl DashboardRepository for JsonFileStore {
    async fn lock(&self, dashboard_id: &DashboardId) -> OwnedMutexGuard<()> {
        let path = self.resolve_path(dashboard_id);
        let slot = {
            let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
            // Only the registry refers to an idle slot.
            locks.retain(|_, slot| Arc::strong_count(slot) > 1);
            locks.entry(path).or_default().clone()
        };
        slot.lock_owned().await
    }

    async fn load(&self, dashboard_id: &DashboardId) -> LoadedConfig {
        let path = self.resolve_path(dashboard_id);
        tracing::debug!("Reading Lovelace config from: {}", path.display());

        match Self::read_envelope(&path).await {
            Ok(Some(envelope)) => {
                let config = envelope.data.config;
                let duplicates = config.duplicate_paths();
                if !duplicates.is_empty() {
                    tracing::warn!(
                        "Dashboard '{}' has duplicate view paths {:?}; first match wins",
                        dashboard_id,
                        duplicates
                    );
                }
                LoadedConfig::found(config)
            }
            Ok(None) => {
                tracing::warn!("Lovelace config file not found: {}", path.display());
                LoadedConfig::missing()
            }
            Err(e) => {
                tracing::error!("Error reading Lovelace config from storage: {:#}", e);
                LoadedConfig::unreadable(format!("{:#}", e))
            }
        }
    }

    async fn save(&self, dashboard_id: &DashboardId, config: DashboardConfig) -> Result<(), LovelaceError> {
        let path = self.resolve_path(dashboard_id);

        let mut envelope = match Self::read_envelope(&path).await {
            Ok(Some(envelope)) => envelope,
            Ok(None) => StorageEnvelope::new(self.slot_key(dashboard_id)),
            Err(e) => {
                tracing::error!("Refusing to overwrite unreadable storage file: {:#}", e);
                return Err(LovelaceError::PersistFailure(format!("{:#}", e)));
            }
        };
        envelope.data.config = config;

        let payload = serde_json::to_vec_pretty(&envelope)
            .map_err(|e| LovelaceError::PersistFailure(format!("Failed to encode config: {}", e)))?;

        write_atomically(&path, &payload).await.map_err(|e| {
            tracing::error!("Error saving Lovelace config to storage: {:#}", e);
            LovelaceError::PersistFailure(format!("{:#}", e))
        })?;

        tracing::debug!("Saved Lovelace config to: {}", path.display());
        Ok(())
    }
}

/// Write `payload` next to `path`, flush it, then rename over `path`.
/// The temp file is removed if any step fails.
async fn write_atomically(path: &Path, payload: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .await
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    let temp_path = temp_path_for(path);
    let result = write_and_rename(&temp_path, path, payload).await;
    if result.is_err() {
        let _ = fs::remove_file(&temp_path).await;
    }
    result
}

async fn write_and_rename(temp_path: &Path, path: &Path, payload: &[u8]) -> Result<()> {
    let mut file = fs::File::create(temp_path)
        .await
        .with_context(|| format!("Failed to create temp file {}", temp_path.display()))?;
    file.write_all(payload)
        .await
        .context("Failed to write temp file")?;
    file.sync_all().await.context("Failed to flush temp file")?;
    drop(file);

    fs::rename(temp_path, path)
        .await
        .with_context(|| format!("Failed to rename temp file over {}", path.display()))?;
    Ok(())
}

// Slot files never start with a dot, so the temp name cannot collide with one.
fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = OsString::from(".");
    name.push(path.file_name().unwrap_or_default());
    name.push(".tmp");
    path.with_file_name(name)
}
