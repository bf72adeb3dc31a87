use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub smtp: SmtpConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    pub listen_addr: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    pub database_url: String,
    /// Directory where uploaded offer-request documents are stored
    pub attachments_dir: String,
    /// Path of the persisted sender-settings file
    pub settings_path: String,
}

/// Defaults for the outbound SMTP relay; per-user overrides take precedence
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SmtpConfig {
    pub server: String,
    pub port: u16,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl Config {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| crate::error::DirectoryError::Config(e.to_string()))?;

        toml::from_str(&content).map_err(|e| crate::error::DirectoryError::Config(e.to_string()))
    }

    pub fn default() -> Self {
        Self {
            server: ServerConfig {
                listen_addr: "0.0.0.0:8000".to_string(),
            },
            storage: StorageConfig {
                database_url: "sqlite://furnizori.db".to_string(),
                attachments_dir: "data/attachments".to_string(),
                settings_path: "data/user-settings.json".to_string(),
            },
            smtp: SmtpConfig {
                server: "smtp.gmail.com".to_string(),
                port: 587,
                timeout_secs: 30,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                format: "pretty".to_string(),
            },
        }
    }
}
