//! Settings store - JSON-file persistence with a versioned in-memory snapshot
//!
//! The record is loaded once at startup. Reads hand out the current
//! `Arc<UserSettings>` snapshot; writes persist the file first and then swap
//! the snapshot, so an in-flight request keeps the version it started with.

use crate::error::{DirectoryError, Result};
use crate::settings::types::UserSettings;
use chrono::Utc;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, warn};

pub struct SettingsStore {
    path: PathBuf,
    current: RwLock<Arc<UserSettings>>,
}

impl SettingsStore {
    /// Load settings from `path`, falling back to an empty record when the
    /// file does not exist yet.
    pub async fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let settings = read_settings_file(&path).await?;

        Ok(Self {
            path,
            current: RwLock::new(Arc::new(settings)),
        })
    }

    /// Current settings snapshot
    pub async fn snapshot(&self) -> Arc<UserSettings> {
        self.current.read().await.clone()
    }

    /// Persist a new record and swap the snapshot
    pub async fn update(&self, mut settings: UserSettings) -> Result<Arc<UserSettings>> {
        settings.updated_at = Some(Utc::now());

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let content = serde_json::to_string_pretty(&settings)?;
        tokio::fs::write(&self.path, content).await?;

        let snapshot = Arc::new(settings);
        *self.current.write().await = snapshot.clone();

        info!("Persisted sender settings for {}", snapshot.email);
        Ok(snapshot)
    }

    /// Re-read the settings file (admin operation)
    pub async fn reload(&self) -> Result<Arc<UserSettings>> {
        let settings = read_settings_file(&self.path).await?;
        let snapshot = Arc::new(settings);
        *self.current.write().await = snapshot.clone();

        info!("Reloaded sender settings from {}", self.path.display());
        Ok(snapshot)
    }
}

async fn read_settings_file(path: &Path) -> Result<UserSettings> {
    match tokio::fs::read_to_string(path).await {
        Ok(content) => serde_json::from_str(&content)
            .map_err(|e| DirectoryError::Config(format!("Invalid settings file: {}", e))),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            warn!("No settings file at {}, starting empty", path.display());
            Ok(UserSettings::default())
        }
        Err(e) => Err(e.into()),
    }
}
