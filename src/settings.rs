//! # Settings Module
//!
//! ## Purpose
//! Application configuration: where the chemistry backend lives, the language the AI
//! assistant answers in, the request timeout and the log level.
//!
//! ## Key Features
//! - **Persistence**: JSON file (`chemlabkit_config.json` by default), pretty-printed
//! - **Defaults**: a missing file is not an error, defaults are used instead
//! - **Validation**: setters reject malformed URLs, unsupported languages and log levels
//! - **Explicit**: the config is passed to whoever needs it, there is no global instance
//!
//! ## Usage Pattern
//! ```rust, ignore
//! use ChemLabKit::settings::AppConfig;
//!
//! let mut config = AppConfig::load()?;
//! config.set_backend_url("http://lab-server:8000")?;
//! config.set_language("ar")?;
//! config.save()?;
//! ```
//!
//! ## Fields
//! | Field | Default |
//! |-------|---------|
//! | backend_url | http://localhost:8000 |
//! | language | en |
//! | timeout_secs | 30 |
//! | log_level | info |

use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;
use url::Url;

pub const DEFAULT_CONFIG_FILE: &str = "chemlabkit_config.json";
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_LOG_LEVEL: &str = "info";
const LOG_LEVELS: [&str; 6] = ["off", "error", "warn", "info", "debug", "trace"];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Malformed configuration file: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid backend URL '{0}'")]
    InvalidUrl(String),
    #[error("Unsupported language '{0}', expected 'en' or 'ar'")]
    UnsupportedLanguage(String),
    #[error("Unknown log level '{0}'")]
    InvalidLogLevel(String),
    #[error("Timeout must be at least one second")]
    InvalidTimeout,
}

/// answer language of the AI assistant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Ar,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Ar => "ar",
        }
    }
}

impl FromStr for Language {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "en" | "english" => Ok(Language::En),
            "ar" | "arabic" => Ok(Language::Ar),
            _ => Err(ConfigError::UnsupportedLanguage(s.to_string())),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub backend_url: String,
    pub language: Language,
    pub timeout_secs: u64,
    pub log_level: String,
    /// where `save` writes; not stored in the file itself
    #[serde(skip)]
    config_file: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            language: Language::En,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            config_file: PathBuf::from(DEFAULT_CONFIG_FILE),
        }
    }
}

impl AppConfig {
    /// Loads `chemlabkit_config.json` from the working directory, or defaults if absent.
    pub fn load() -> Result<Self, ConfigError> {
        Self::with_config_file(DEFAULT_CONFIG_FILE)
    }

    /// Loads the given file, or defaults bound to that file if it does not exist.
    /// A file that exists but does not parse or validate is an error.
    pub fn with_config_file<P: AsRef<Path>>(config_file: P) -> Result<Self, ConfigError> {
        let path = config_file.as_ref();
        let mut config = if path.exists() {
            let content = fs::read_to_string(path)?;
            let config: AppConfig = serde_json::from_str(&content)?;
            info!("configuration loaded from {}", path.display());
            config
        } else {
            warn!("{} not found, using default configuration", path.display());
            AppConfig::default()
        };
        config.config_file = path.to_path_buf();
        config.validate()?;
        Ok(config)
    }

    pub fn config_file(&self) -> &Path {
        &self.config_file
    }

    pub fn save(&self) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(&self.config_file, content)?;
        info!("configuration saved to {}", self.config_file.display());
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        check_url(&self.backend_url)?;
        check_log_level(&self.log_level)?;
        if self.timeout_secs == 0 {
            return Err(ConfigError::InvalidTimeout);
        }
        Ok(())
    }

    pub fn set_backend_url(&mut self, url: &str) -> Result<(), ConfigError> {
        let url = url.trim().trim_end_matches('/');
        check_url(url)?;
        self.backend_url = url.to_string();
        Ok(())
    }

    pub fn set_language(&mut self, language: &str) -> Result<(), ConfigError> {
        self.language = language.parse()?;
        Ok(())
    }

    pub fn set_timeout_secs(&mut self, timeout_secs: u64) -> Result<(), ConfigError> {
        if timeout_secs == 0 {
            return Err(ConfigError::InvalidTimeout);
        }
        self.timeout_secs = timeout_secs;
        Ok(())
    }

    pub fn set_log_level(&mut self, level: &str) -> Result<(), ConfigError> {
        let level = level.trim().to_lowercase();
        check_log_level(&level)?;
        self.log_level = level;
        Ok(())
    }

    pub fn reset_to_defaults(&mut self) {
        let config_file = std::mem::take(&mut self.config_file);
        *self = Self {
            config_file,
            ..Self::default()
        };
    }
}

fn check_url(url: &str) -> Result<(), ConfigError> {
    match Url::parse(url) {
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => Ok(()),
        _ => Err(ConfigError::InvalidUrl(url.to_string())),
    }
}

fn check_log_level(level: &str) -> Result<(), ConfigError> {
    if LOG_LEVELS.contains(&level.trim().to_lowercase().as_str()) {
        Ok(())
    } else {
        Err(ConfigError::InvalidLogLevel(level.to_string()))
    }
}
