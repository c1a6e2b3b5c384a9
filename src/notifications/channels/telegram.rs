//! Telegram notification channel
//!
//! Delivers messages through the Bot API `sendMessage` method.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::{Channel, ChannelError, ChannelResult, DeliveryStatus};
use crate::config::Config;
use crate::utils::truncate_utf16;

/// Maximum message length accepted by the Bot API, in UTF-16 code units
pub const MAX_MESSAGE_UNITS: usize = 4096;

/// Telegram channel configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelegramChannelConfig {
    /// Bot API base URL
    pub api_base: String,
    /// Bot token
    pub token: String,
    /// Destination chat id
    pub chat_id: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl TelegramChannelConfig {
    /// Create a new configuration against the public Bot API
    pub fn new(token: impl Into<String>, chat_id: impl Into<String>) -> Self {
        Self {
            api_base: crate::config::DEFAULT_TELEGRAM_API.to_string(),
            token: token.into(),
            chat_id: chat_id.into(),
            timeout_secs: 10,
        }
    }

    /// Set the Bot API base URL
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// Set request timeout
    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.token.is_empty() {
            return Err("Bot token cannot be empty".to_string());
        }

        if self.chat_id.is_empty() {
            return Err("Chat id cannot be empty".to_string());
        }

        if !self.api_base.starts_with("http://") && !self.api_base.starts_with("https://") {
            return Err("Bot API URL must start with http:// or https://".to_string());
        }

        if self.timeout_secs == 0 {
            return Err("Timeout must be greater than 0".to_string());
        }

        Ok(())
    }
}

impl From<&Config> for TelegramChannelConfig {
    fn from(config: &Config) -> Self {
        Self::new(&config.telegram.token, &config.telegram.chat_id)
            .with_api_base(&config.telegram.api_base)
            .with_timeout(config.telegram.timeout_secs)
    }
}

#[derive(Debug, Serialize)]
struct SendMessageRequest<'a> {
    chat_id: &'a str,
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct ApiReply {
    ok: bool,
    #[serde(default)]
    error_code: Option<u16>,
    #[serde(default)]
    description: Option<String>,
}

/// Telegram Bot API channel
///
/// # Example
///
/// ```rust,ignore
/// use hwbot::notifications::channels::telegram::{TelegramChannel, TelegramChannelConfig};
///
/// let channel = TelegramChannel::new(TelegramChannelConfig::new("123:abc", "42"))?;
/// channel.send("Hello").await?;
/// ```
pub struct TelegramChannel {
    config: TelegramChannelConfig,
    client: Client,
}

impl TelegramChannel {
    /// Create a new Telegram channel
    pub fn new(config: TelegramChannelConfig) -> ChannelResult<Self> {
        config.validate().map_err(ChannelError::InvalidConfig)?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }

    /// Create a channel from the application configuration
    pub fn from_config(config: &Config) -> ChannelResult<Self> {
        Self::new(TelegramChannelConfig::from(config))
    }

    /// URL of the `sendMessage` method
    fn send_message_url(&self) -> String {
        format!(
            "{}/bot{}/sendMessage",
            self.config.api_base.trim_end_matches('/'),
            self.config.token
        )
    }
}

/// The request URL carries the bot token and must not reach the logs
fn redact_url(err: reqwest::Error) -> ChannelError {
    ChannelError::HttpError(err.without_url())
}

#[async_trait]
impl Channel for TelegramChannel {
    fn name(&self) -> &str {
        "telegram"
    }

    fn destination(&self) -> &str {
        &self.config.chat_id
    }

    async fn send(&self, text: &str) -> ChannelResult<DeliveryStatus> {
        let text = truncate_utf16(text, MAX_MESSAGE_UNITS);
        let request = SendMessageRequest {
            chat_id: &self.config.chat_id,
            text: &text,
        };

        let response = self
            .client
            .post(self.send_message_url())
            .json(&request)
            .send()
            .await
            .map_err(redact_url)?;

        let status = response.status();
        let body = response.text().await.map_err(redact_url)?;

        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(ChannelError::RateLimited(body));
        }

        let reply: ApiReply = serde_json::from_str(&body)?;
        if !status.is_success() || !reply.ok {
            return Err(ChannelError::Api {
                code: reply.error_code.unwrap_or(status.as_u16()),
                description: reply
                    .description
                    .unwrap_or_else(|| "no description".to_string()),
            });
        }

        Ok(DeliveryStatus::success_with_message(
            self.name(),
            format!("Delivered to chat {}", self.config.chat_id),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_validation() {
        assert!(TelegramChannelConfig::new("123:abc", "42").validate().is_ok());
        assert!(TelegramChannelConfig::new("", "42").validate().is_err());
        assert!(TelegramChannelConfig::new("123:abc", "").validate().is_err());
        assert!(TelegramChannelConfig::new("123:abc", "42")
            .with_api_base("api.telegram.org")
            .validate()
            .is_err());
        assert!(TelegramChannelConfig::new("123:abc", "42")
            .with_timeout(0)
            .validate()
            .is_err());
    }

    #[test]
    fn test_channel_creation() {
        let channel = TelegramChannel::new(TelegramChannelConfig::new("123:abc", "42")).unwrap();
        assert_eq!(channel.name(), "telegram");
        assert_eq!(channel.destination(), "42");
        assert_eq!(
            channel.send_message_url(),
            "https://api.telegram.org/bot123:abc/sendMessage"
        );
    }

    #[test]
    fn test_invalid_config_rejected() {
        let result = TelegramChannel::new(TelegramChannelConfig::new("", "42"));
        assert!(matches!(result, Err(ChannelError::InvalidConfig(_))));
    }

    #[test]
    fn test_trailing_slash_in_api_base() {
        let config = TelegramChannelConfig::new("t", "1").with_api_base("http://localhost:9000/");
        let channel = TelegramChannel::new(config).unwrap();
        assert_eq!(
            channel.send_message_url(),
            "http://localhost:9000/bott/sendMessage"
        );
    }

    #[test]
    fn test_from_app_config() {
        let mut config = Config::default();
        config.telegram.token = "123:abc".to_string();
        config.telegram.chat_id = "42".to_string();
        config.telegram.timeout_secs = 3;

        let channel_config = TelegramChannelConfig::from(&config);
        assert_eq!(channel_config.chat_id, "42");
        assert_eq!(channel_config.timeout_secs, 3);
        assert_eq!(channel_config.api_base, crate::config::DEFAULT_TELEGRAM_API);
    }

    #[tokio::test]
    async fn test_transport_error_hides_token() {
        let config = TelegramChannelConfig::new("123456:SECRET-BOT-TOKEN", "42")
            .with_api_base("http://127.0.0.1:1")
            .with_timeout(2);
        let channel = TelegramChannel::new(config).unwrap();

        let err = channel.send("hi").await.unwrap_err();
        assert!(matches!(err, ChannelError::HttpError(_)));
        assert!(!err.to_string().contains("SECRET-BOT-TOKEN"));
    }
}
