use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::AppError;

/// Site configuration, loaded once at startup and injected from there.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Port the API listens on
    pub port: u16,
    /// Directory holding the site database and the photo store
    pub data_dir: PathBuf,
    pub chat: ChatConfig,
}

/// Connection settings for the external completion API
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct ChatConfig {
    pub api_url: String,
    pub api_key: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 5001,
            data_dir: PathBuf::from("./data"),
            chat: ChatConfig::default(),
        }
    }
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            api_url: "https://open.bigmodel.cn/api/paas/v4/chat/completions".to_string(),
            api_key: String::new(),
            model: "glm-4-flash-250414".to_string(),
            temperature: 0.7,
            max_tokens: 1500,
        }
    }
}

impl Config {
    /// Load from the TOML file at `path`, falling back to defaults when the
    /// file does not exist, then apply environment overrides.
    pub fn load(path: &Path) -> Result<Self, AppError> {
        let mut config = if path.exists() {
            let raw = std::fs::read_to_string(path).map_err(|e| {
                AppError::Storage(format!("cannot read config {:?}: {}", path, e))
            })?;
            toml::from_str(&raw).map_err(|e| {
                AppError::Validation(format!("invalid config {:?}: {}", path, e))
            })?
        } else {
            log::info!("config file {:?} not found, using defaults", path);
            Config::default()
        };

        if let Ok(key) = std::env::var("ZHIPUAI_API_KEY") {
            config.chat.api_key = key;
        }

        Ok(config)
    }

    /// Config file location, overridable via LOVENEST_CONFIG
    pub fn config_path() -> PathBuf {
        std::env::var("LOVENEST_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("lovenest.toml"))
    }

    pub fn site_db_path(&self) -> PathBuf {
        self.data_dir.join("lovenest.db")
    }

    pub fn photo_db_path(&self) -> PathBuf {
        self.data_dir.join("photos.db")
    }
}
