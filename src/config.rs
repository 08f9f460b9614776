//! Configuration module for feedrelay.

use serde::Deserialize;
use std::path::Path;

use crate::{RelayError, Result};

/// Environment variable carrying the Telegram bot credential.
pub const TELEGRAM_API_KEY_ENV: &str = "TELEGRAM_API_KEY";

/// Feed source configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct FeedConfig {
    /// URL of the RSS/Atom feed to relay.
    #[serde(default = "default_feed_url")]
    pub url: String,
    /// Connection timeout in seconds.
    #[serde(default = "default_feed_connect_timeout")]
    pub connect_timeout_secs: u64,
    /// Read timeout in seconds.
    #[serde(default = "default_feed_read_timeout")]
    pub read_timeout_secs: u64,
    /// Total request timeout in seconds.
    #[serde(default = "default_feed_total_timeout")]
    pub total_timeout_secs: u64,
    /// Maximum number of redirects.
    #[serde(default = "default_feed_max_redirects")]
    pub max_redirects: usize,
    /// Maximum feed size in bytes.
    #[serde(default = "default_feed_max_size")]
    pub max_feed_size_bytes: u64,
}

fn default_feed_url() -> String {
    "https://www.standardmedia.co.ke/rss/sports.php".to_string()
}

fn default_feed_connect_timeout() -> u64 {
    10
}

fn default_feed_read_timeout() -> u64 {
    20
}

fn default_feed_total_timeout() -> u64 {
    30
}

fn default_feed_max_redirects() -> usize {
    5
}

fn default_feed_max_size() -> u64 {
    5 * 1024 * 1024 // 5MB
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            url: default_feed_url(),
            connect_timeout_secs: default_feed_connect_timeout(),
            read_timeout_secs: default_feed_read_timeout(),
            total_timeout_secs: default_feed_total_timeout(),
            max_redirects: default_feed_max_redirects(),
            max_feed_size_bytes: default_feed_max_size(),
        }
    }
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_db_path")]
    pub path: String,
}

fn default_db_path() -> String {
    "data/feedrelay.db".to_string()
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

/// Telegram delivery configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct TelegramConfig {
    /// Bot API token. Usually supplied through `TELEGRAM_API_KEY`.
    #[serde(default)]
    pub api_key: String,
    /// Destination chat or channel identifier.
    #[serde(default)]
    pub chat_id: String,
    /// Bot API base URL.
    #[serde(default = "default_telegram_api_base")]
    pub api_base: String,
    /// Text formatting mode passed as `parse_mode`.
    #[serde(default = "default_telegram_parse_mode")]
    pub parse_mode: String,
    /// Request timeout in seconds.
    #[serde(default = "default_telegram_timeout")]
    pub timeout_secs: u64,
}

fn default_telegram_api_base() -> String {
    "https://api.telegram.org".to_string()
}

fn default_telegram_parse_mode() -> String {
    "Markdown".to_string()
}

fn default_telegram_timeout() -> u64 {
    30
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            chat_id: String::new(),
            api_base: default_telegram_api_base(),
            parse_mode: default_telegram_parse_mode(),
            timeout_secs: default_telegram_timeout(),
        }
    }
}

/// When a post counts as sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryPolicy {
    /// Mark sent only after the notifier confirms delivery.
    #[default]
    Confirmed,
    /// Mark sent after every attempt, whatever the outcome.
    BestEffort,
}

/// Relay pipeline configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct RelayConfig {
    /// Delay between two consecutive messages in milliseconds.
    #[serde(default = "default_send_delay")]
    pub send_delay_ms: u64,
    /// Repeat interval in seconds (0 = run once and exit).
    #[serde(default)]
    pub interval_secs: u64,
    /// Maximum posts delivered per run (0 = unbounded).
    #[serde(default)]
    pub max_posts_per_run: usize,
    /// Delivery policy.
    #[serde(default)]
    pub delivery_policy: DeliveryPolicy,
}

fn default_send_delay() -> u64 {
    1000
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            send_delay_ms: default_send_delay(),
            interval_secs: 0,
            max_posts_per_run: 0,
            delivery_policy: DeliveryPolicy::default(),
        }
    }
}

/// Web API configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct WebConfig {
    /// Whether the chat API is served.
    #[serde(default)]
    pub enabled: bool,
    /// Host address to bind.
    #[serde(default = "default_web_host")]
    pub host: String,
    /// Port number for the API.
    #[serde(default = "default_web_port")]
    pub port: u16,
    /// CORS allowed origins.
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

fn default_web_host() -> String {
    "0.0.0.0".to_string()
}

fn default_web_port() -> u16 {
    8080
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            host: default_web_host(),
            port: default_web_port(),
            cors_origins: vec![],
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Path to the log file.
    #[serde(default = "default_log_file")]
    pub file: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_file() -> String {
    "logs/feedrelay.log".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: default_log_file(),
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    /// Feed source configuration.
    #[serde(default)]
    pub feed: FeedConfig,
    /// Database configuration.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Telegram configuration.
    #[serde(default)]
    pub telegram: TelegramConfig,
    /// Relay pipeline configuration.
    #[serde(default)]
    pub relay: RelayConfig,
    /// Web API configuration.
    #[serde(default)]
    pub web: WebConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(RelayError::Io)?;
        Self::parse(&content)
    }

    /// Load configuration from a TOML file and apply environment variable overrides.
    pub fn load_with_env<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| RelayError::Config(format!("config parse error: {e}")))
    }

    /// Apply environment variable overrides to the configuration.
    ///
    /// Supported environment variables:
    /// - `TELEGRAM_API_KEY`: Telegram bot token
    pub fn apply_env_overrides(&mut self) {
        if let Ok(api_key) = std::env::var(TELEGRAM_API_KEY_ENV) {
            if !api_key.is_empty() {
                self.telegram.api_key = api_key;
            }
        }
    }

    /// Validate the configuration.
    ///
    /// Returns an error if:
    /// - The Telegram API key or chat id is missing
    /// - The feed URL cannot be parsed
    pub fn validate(&self) -> Result<()> {
        if self.telegram.api_key.is_empty() {
            return Err(RelayError::Config(format!(
                "telegram api_key is not set. Set it in config.toml or via {} environment variable.",
                TELEGRAM_API_KEY_ENV
            )));
        }
        if self.telegram.chat_id.is_empty() {
            return Err(RelayError::Config(
                "telegram chat_id is not set".to_string(),
            ));
        }
        url::Url::parse(&self.feed.url)
            .map_err(|e| RelayError::Config(format!("invalid feed url: {e}")))?;
        Ok(())
    }
}
