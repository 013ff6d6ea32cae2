use anyhow::{Context, Result};
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    // Telegram
    pub bot_token: String,
    pub telegram_api_url: String,

    // Webhook
    pub webhook_url: String,
    pub webhook_path: String,
    pub webhook_secret: Option<String>,
    pub port: u16,

    // Translation service
    pub translate_api_url: String,
    pub translate_api_key: Option<String>,
    pub translate_timeout_secs: u64,

    // Static replies
    pub admin_username: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            // Telegram
            bot_token: std::env::var("BOT_TOKEN").context("BOT_TOKEN not set")?,
            telegram_api_url: std::env::var("TELEGRAM_API_URL")
                .unwrap_or_else(|_| "https://api.telegram.org".to_string()),

            // Webhook
            webhook_url: std::env::var("WEBHOOK_URL").context("WEBHOOK_URL not set")?,
            webhook_path: normalize_path(
                &std::env::var("WEBHOOK_PATH").unwrap_or_else(|_| "/webhook".to_string()),
            ),
            webhook_secret: non_empty_var("WEBHOOK_SECRET"),
            port: std::env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(8000),

            // Translation service
            translate_api_url: std::env::var("TRANSLATE_API_URL")
                .unwrap_or_else(|_| "https://libretranslate.com/translate".to_string()),
            translate_api_key: non_empty_var("TRANSLATE_API_KEY"),
            translate_timeout_secs: std::env::var("TRANSLATE_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|secs| *secs > 0)
                .unwrap_or(5),

            // Static replies
            admin_username: std::env::var("ADMIN_USERNAME")
                .unwrap_or_else(|_| "@your_admin_username".to_string()),
        })
    }

    /// Upper bound for a single translation request
    pub fn translate_timeout(&self) -> Duration {
        Duration::from_secs(self.translate_timeout_secs)
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Axum routes must start with a slash
fn normalize_path(path: &str) -> String {
    let trimmed = path.trim();
    if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{}", trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const ALL_VARS: [&str; 10] = [
        "BOT_TOKEN",
        "TELEGRAM_API_URL",
        "WEBHOOK_URL",
        "WEBHOOK_PATH",
        "WEBHOOK_SECRET",
        "PORT",
        "TRANSLATE_API_URL",
        "TRANSLATE_API_KEY",
        "TRANSLATE_TIMEOUT_SECS",
        "ADMIN_USERNAME",
    ];

    fn clear_env() {
        for key in ALL_VARS {
            std::env::remove_var(key);
        }
    }

    fn set_required() {
        std::env::set_var("BOT_TOKEN", "123:abc");
        std::env::set_var("WEBHOOK_URL", "https://example.com/webhook");
    }

    // ==================== from_env Tests ====================

    #[test]
    #[serial]
    fn test_from_env_defaults() {
        clear_env();
        set_required();

        let config = Config::from_env().expect("config should load");
        assert_eq!(config.bot_token, "123:abc");
        assert_eq!(config.webhook_url, "https://example.com/webhook");
        assert_eq!(config.webhook_path, "/webhook");
        assert_eq!(config.webhook_secret, None);
        assert_eq!(config.port, 8000);
        assert_eq!(config.telegram_api_url, "https://api.telegram.org");
        assert_eq!(config.translate_api_url, "https://libretranslate.com/translate");
        assert_eq!(config.translate_api_key, None);
        assert_eq!(config.translate_timeout(), Duration::from_secs(5));
        assert_eq!(config.admin_username, "@your_admin_username");

        clear_env();
    }

    #[test]
    #[serial]
    fn test_from_env_missing_token() {
        clear_env();
        std::env::set_var("WEBHOOK_URL", "https://example.com/webhook");

        let err = Config::from_env().unwrap_err();
        assert!(err.to_string().contains("BOT_TOKEN"));

        clear_env();
    }

    #[test]
    #[serial]
    fn test_from_env_missing_webhook_url() {
        clear_env();
        std::env::set_var("BOT_TOKEN", "123:abc");

        let err = Config::from_env().unwrap_err();
        assert!(err.to_string().contains("WEBHOOK_URL"));

        clear_env();
    }

    #[test]
    #[serial]
    fn test_from_env_overrides() {
        clear_env();
        set_required();
        std::env::set_var("WEBHOOK_PATH", "tg/hook");
        std::env::set_var("WEBHOOK_SECRET", "s3cret");
        std::env::set_var("PORT", "9090");
        std::env::set_var("TRANSLATE_TIMEOUT_SECS", "12");
        std::env::set_var("TRANSLATE_API_KEY", "key");
        std::env::set_var("ADMIN_USERNAME", "@boss");

        let config = Config::from_env().expect("config should load");
        assert_eq!(config.webhook_path, "/tg/hook");
        assert_eq!(config.webhook_secret.as_deref(), Some("s3cret"));
        assert_eq!(config.port, 9090);
        assert_eq!(config.translate_timeout(), Duration::from_secs(12));
        assert_eq!(config.translate_api_key.as_deref(), Some("key"));
        assert_eq!(config.admin_username, "@boss");

        clear_env();
    }

    #[test]
    #[serial]
    fn test_from_env_invalid_numbers_fall_back() {
        clear_env();
        set_required();
        std::env::set_var("PORT", "not-a-port");
        std::env::set_var("TRANSLATE_TIMEOUT_SECS", "0");

        let config = Config::from_env().expect("config should load");
        assert_eq!(config.port, 8000);
        assert_eq!(config.translate_timeout_secs, 5);

        clear_env();
    }

    #[test]
    #[serial]
    fn test_blank_secret_is_none() {
        clear_env();
        set_required();
        std::env::set_var("WEBHOOK_SECRET", "   ");

        let config = Config::from_env().expect("config should load");
        assert_eq!(config.webhook_secret, None);

        clear_env();
    }

    // ==================== normalize_path Tests ====================

    #[test]
    fn test_normalize_path() {
        assert_eq!(normalize_path("/webhook"), "/webhook");
        assert_eq!(normalize_path("webhook"), "/webhook");
        assert_eq!(normalize_path("  /a/b "), "/a/b");
    }
}
