use crate::config::Config;
use crate::gateway::Translator;
use crate::i18n::Language;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// Why a translation request produced no text.
#[derive(Debug, Error)]
pub enum TranslationError {
    #[error("translation request timed out after {0:?}")]
    Timeout(Duration),

    #[error("failed to reach translation service: {0}")]
    Network(#[source] reqwest::Error),

    #[error("translation service error ({status}): {body}")]
    Api { status: u16, body: String },

    #[error("failed to parse translation response: {0}")]
    InvalidResponse(String),

    #[error("translation service returned an empty result")]
    EmptyResult,
}

/// LibreTranslate-compatible request body
#[derive(Debug, Serialize)]
struct TranslateRequest<'a> {
    q: &'a str,
    source: &'a str,
    target: &'a str,
    format: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    api_key: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct TranslateResponse {
    #[serde(rename = "translatedText")]
    translated_text: String,
}

/// HTTP client for a LibreTranslate-compatible `/translate` endpoint.
///
/// Every request is bounded by the configured timeout and is never retried.
#[derive(Debug, Clone)]
pub struct HttpTranslator {
    client: reqwest::Client,
    api_url: String,
    api_key: Option<String>,
    timeout: Duration,
}

impl HttpTranslator {
    pub fn new(api_url: impl Into<String>, api_key: Option<String>, timeout: Duration) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url: api_url.into(),
            api_key,
            timeout,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.translate_api_url.clone(),
            config.translate_api_key.clone(),
            config.translate_timeout(),
        )
    }

    fn map_send_error(&self, err: reqwest::Error) -> TranslationError {
        if err.is_timeout() {
            TranslationError::Timeout(self.timeout)
        } else {
            TranslationError::Network(err)
        }
    }

    async fn request(&self, text: &str, target: Language) -> Result<String, TranslationError> {
        let request = TranslateRequest {
            q: text,
            source: "auto",
            target: target.code(),
            format: "text",
            api_key: self.api_key.as_deref(),
        };

        debug!("Requesting translation to {} ({} chars)", target.code(), text.len());

        let response = self
            .client
            .post(&self.api_url)
            .timeout(self.timeout)
            .json(&request)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response
                .text()
                .await
                .unwrap_or_else(|e| format!("<failed to read body: {}>", e));
            return Err(TranslationError::Api { status, body });
        }

        let parsed: TranslateResponse = response.json().await.map_err(|e| {
            if e.is_timeout() {
                TranslationError::Timeout(self.timeout)
            } else {
                TranslationError::InvalidResponse(e.to_string())
            }
        })?;

        let translated = parsed.translated_text.trim();
        if translated.is_empty() {
            return Err(TranslationError::EmptyResult);
        }

        Ok(translated.to_string())
    }
}

impl Translator for HttpTranslator {
    async fn translate(&self, text: &str, target: Language) -> Result<String, TranslationError> {
        self.request(text, target).await
    }
}
