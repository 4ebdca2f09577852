use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::atomic::{AtomicU8, Ordering};
use tracing::info;

use crate::application::ResultExt;
use learnhub_domain::shared::DomainError;
use learnhub_infrastructure::storage::StorageBackend;

/// Directory name under the platform config and data directories
pub const APP_DIR_NAME: &str = "learnhub";

const CONFIG_FILE_NAME: &str = "app_config.json";

/// Log level configuration
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error = 1,
    Warn = 2,
    #[default]
    Info = 3,
    Debug = 4,
    Trace = 5,
}

impl LogLevel {
    pub fn from_u8(value: u8) -> Self {
        match value {
            1 => LogLevel::Error,
            2 => LogLevel::Warn,
            4 => LogLevel::Debug,
            5 => LogLevel::Trace,
            _ => LogLevel::Info,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "error" => Ok(LogLevel::Error),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "info" => Ok(LogLevel::Info),
            "debug" => Ok(LogLevel::Debug),
            "trace" => Ok(LogLevel::Trace),
            _ => Err(format!("Unknown log level: {s}")),
        }
    }
}

/// Persistent configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub log_level: LogLevel,
    pub storage: StorageBackend,
    /// Overrides the platform data directory
    pub data_dir: Option<PathBuf>,
}

/// Application configuration service
pub struct ConfigService {
    log_level: AtomicU8,
    storage: StorageBackend,
    data_dir: Option<PathBuf>,
    config_path: PathBuf,
    load_warning: Option<String>,
}

impl ConfigService {
    /// Load `app_config.json` from `config_dir`; missing or malformed files
    /// fall back to defaults.
    ///
    /// Runs before the logger exists, so a malformed file is reported
    /// through [`ConfigService::load_warning`] instead of being logged here.
    pub fn new(config_dir: &Path) -> Result<Self> {
        std::fs::create_dir_all(config_dir)?;
        let config_path = config_dir.join(CONFIG_FILE_NAME);

        let (config, load_warning) = if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            match serde_json::from_str::<AppConfig>(&content) {
                Ok(config) => (config, None),
                Err(e) => (
                    AppConfig::default(),
                    Some(format!("ignoring malformed {}: {}", config_path.display(), e)),
                ),
            }
        } else {
            (AppConfig::default(), None)
        };

        Ok(Self {
            log_level: AtomicU8::new(config.log_level as u8),
            storage: config.storage,
            data_dir: config.data_dir,
            config_path,
            load_warning,
        })
    }

    /// Load from `<config_dir>/learnhub/`
    pub fn from_default_location() -> Result<Self> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Failed to resolve the config directory"))?
            .join(APP_DIR_NAME);
        Self::new(&config_dir)
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Why the config file was ignored, if it was
    pub fn load_warning(&self) -> Option<&str> {
        self.load_warning.as_deref()
    }

    /// Get current log level
    pub fn get_log_level(&self) -> LogLevel {
        LogLevel::from_u8(self.log_level.load(Ordering::Relaxed))
    }

    pub fn storage(&self) -> StorageBackend {
        self.storage
    }

    /// Configured data directory, else `<data_dir>/learnhub/`
    pub fn data_dir(&self) -> Result<PathBuf> {
        match &self.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => dirs::data_dir()
                .map(|dir| dir.join(APP_DIR_NAME))
                .ok_or_else(|| anyhow::anyhow!("Failed to resolve the data directory")),
        }
    }

    /// Set log level and persist to disk
    pub fn set_log_level(&self, level: LogLevel) -> std::result::Result<(), DomainError> {
        self.log_level.store(level as u8, Ordering::Relaxed);
        self.persist()?;
        info!(
            "[config] log level set to {}, takes effect on next start",
            level.as_str()
        );
        Ok(())
    }

    fn persist(&self) -> std::result::Result<(), DomainError> {
        let config = AppConfig {
            log_level: self.get_log_level(),
            storage: self.storage,
            data_dir: self.data_dir.clone(),
        };
        let content = serde_json::to_string_pretty(&config).infra_context("Serialize config")?;
        std::fs::write(&self.config_path, content)
            .infra_context(&format!("Write {}", self.config_path.display()))?;
        Ok(())
    }
}
