//! Configuration management for the homework watcher
//!
//! Settings come from an optional TOML file and from environment variables,
//! environment taking precedence. The three credentials (API token, bot
//! token, chat id) have no defaults; a configuration lacking any of them
//! fails validation and the watcher never starts.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{Error, Result};

/// Default homework status endpoint
pub const DEFAULT_ENDPOINT: &str = "https://practicum.yandex.ru/api/user_api/homework_statuses/";

/// Default Telegram Bot API base URL
pub const DEFAULT_TELEGRAM_API: &str = "https://api.telegram.org";

/// Default delay between poll cycles in seconds
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 600;

/// Environment variable holding the homework API token
pub const PRACTICUM_TOKEN_VAR: &str = "PRACTICUM_TOKEN";

/// Environment variable holding the bot token
pub const TELEGRAM_TOKEN_VAR: &str = "TELEGRAM_TOKEN";

/// Environment variable holding the destination chat id
pub const TELEGRAM_CHAT_ID_VAR: &str = "TELEGRAM_CHAT_ID";

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Homework API configuration
    pub practicum: PracticumConfig,

    /// Telegram bot configuration
    pub telegram: TelegramConfig,

    /// Poll loop configuration
    pub watcher: WatcherConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Homework API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PracticumConfig {
    /// OAuth token for the homework API
    pub token: String,

    /// Status endpoint URL
    pub endpoint: String,

    /// Request timeout in seconds
    pub request_timeout_secs: u64,
}

/// Telegram bot configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TelegramConfig {
    /// Bot token
    pub token: String,

    /// Destination chat id
    pub chat_id: String,

    /// Bot API base URL
    pub api_base: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

/// Poll loop configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WatcherConfig {
    /// Delay between poll cycles in seconds
    pub poll_interval_secs: u64,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Console log format (text, json)
    pub format: String,

    /// Directory for the rotating log file
    pub directory: PathBuf,

    /// Log file name prefix
    pub file_name: String,

    /// Number of rotated log files to keep
    pub max_files: usize,
}

impl Default for PracticumConfig {
    fn default() -> Self {
        Self {
            token: String::new(),
            endpoint: String::from(DEFAULT_ENDPOINT),
            request_timeout_secs: 30,
        }
    }
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            token: String::new(),
            chat_id: String::new(),
            api_base: String::from(DEFAULT_TELEGRAM_API),
            timeout_secs: 10,
        }
    }
}

impl Default for WatcherConfig {
    fn default() -> Self {
        Self {
            poll_interval_secs: DEFAULT_POLL_INTERVAL_SECS,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: String::from("info"),
            format: String::from("text"),
            directory: PathBuf::from("logs"),
            file_name: String::from("hwbot.log"),
            max_files: 5,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] naming every missing credential, or any other
    /// validation failure.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        config.apply_env();
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    ///
    /// The file is not validated here, so credentials may still be supplied
    /// through [`Config::apply_env`].
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::with_source(format!("Failed to read config file: {}", path.display()), e)
        })?;

        toml::from_str(&content).map_err(|e| {
            Error::with_source(
                format!("Failed to parse TOML config file: {}", path.display()),
                e,
            )
        })
    }

    /// Load from an optional file and overlay the environment, without
    /// validating
    pub fn resolve(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env();
        Ok(config)
    }

    /// Load from an optional file, overlay the environment and validate
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = Self::resolve(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Override settings with any non-empty environment variables
    pub fn apply_env(&mut self) {
        if let Some(v) = env_var(PRACTICUM_TOKEN_VAR) {
            self.practicum.token = v;
        }
        if let Some(v) = env_var(TELEGRAM_TOKEN_VAR) {
            self.telegram.token = v;
        }
        if let Some(v) = env_var(TELEGRAM_CHAT_ID_VAR) {
            self.telegram.chat_id = v;
        }
        if let Some(v) = env_var("HWBOT_ENDPOINT") {
            self.practicum.endpoint = v;
        }
        if let Some(v) = env_var("HWBOT_TELEGRAM_API") {
            self.telegram.api_base = v;
        }
        if let Some(v) = env_var("HWBOT_POLL_INTERVAL").and_then(|v| v.parse::<u64>().ok()) {
            self.watcher.poll_interval_secs = v;
        }
        if let Some(v) = env_var("HWBOT_REQUEST_TIMEOUT").and_then(|v| v.parse::<u64>().ok()) {
            self.practicum.request_timeout_secs = v;
        }
        if let Some(v) = env_var("HWBOT_LOG_LEVEL") {
            self.logging.level = v;
        }
        if let Some(v) = env_var("HWBOT_LOG_FORMAT") {
            self.logging.format = v;
        }
        if let Some(v) = env_var("HWBOT_LOG_DIR") {
            self.logging.directory = v.into();
        }
    }

    /// Names of the required credentials that are not set
    pub fn missing_credentials(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.practicum.token.trim().is_empty() {
            missing.push(PRACTICUM_TOKEN_VAR);
        }
        if self.telegram.token.trim().is_empty() {
            missing.push(TELEGRAM_TOKEN_VAR);
        }
        if self.telegram.chat_id.trim().is_empty() {
            missing.push(TELEGRAM_CHAT_ID_VAR);
        }
        missing
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        let missing = self.missing_credentials();
        if !missing.is_empty() {
            return Err(Error::config(format!(
                "missing required environment variables: {}",
                missing.join(", ")
            )));
        }

        for (name, url) in [
            ("practicum.endpoint", &self.practicum.endpoint),
            ("telegram.api_base", &self.telegram.api_base),
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(Error::config(format!(
                    "{name} must start with http:// or https://"
                )));
            }
        }

        if self.watcher.poll_interval_secs == 0 {
            return Err(Error::config("poll_interval_secs must be greater than 0"));
        }

        if self.practicum.request_timeout_secs == 0 || self.telegram.timeout_secs == 0 {
            return Err(Error::config("timeouts must be greater than 0"));
        }

        Ok(())
    }

    /// Get homework API request timeout as Duration
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.practicum.request_timeout_secs)
    }

    /// Get delay between poll cycles as Duration
    #[must_use]
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.watcher.poll_interval_secs)
    }
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}
