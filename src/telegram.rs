use crate::config::Config;
use crate::gateway::{ChatId, InboundEvent, Keyboard, Messenger, OutboundReply, TextFormat};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

// Telegram webhook types
#[derive(Debug, Deserialize)]
pub struct Update {
    pub update_id: i64,
    pub message: Option<Message>,
}

#[derive(Debug, Deserialize)]
pub struct Message {
    pub message_id: i64,
    pub from: Option<User>,
    pub chat: Chat,
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: Option<String>,
    pub first_name: String,
}

#[derive(Debug, Deserialize)]
pub struct Chat {
    pub id: i64,
    #[allow(dead_code)]
    pub r#type: String,
}

impl Update {
    /// Convert to a router event.
    ///
    /// Updates that are not messages, and messages with no sender (channel
    /// posts), carry nothing the router can act on.
    pub fn into_event(self) -> Option<InboundEvent> {
        let message = self.message?;
        let user = message.from?;
        Some(InboundEvent {
            user_id: user.id,
            chat_id: message.chat.id,
            text: message.text,
        })
    }
}

#[derive(Debug, Serialize)]
struct SendMessageRequest<'a> {
    chat_id: ChatId,
    text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    parse_mode: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reply_markup: Option<ReplyMarkup>,
}

#[derive(Debug, Serialize, PartialEq)]
#[serde(untagged)]
enum ReplyMarkup {
    Keyboard {
        keyboard: Vec<Vec<KeyboardButton>>,
        resize_keyboard: bool,
    },
    Remove {
        remove_keyboard: bool,
    },
}

#[derive(Debug, Serialize, PartialEq)]
struct KeyboardButton {
    text: String,
}

impl From<&Keyboard> for ReplyMarkup {
    fn from(keyboard: &Keyboard) -> Self {
        match keyboard {
            Keyboard::Buttons(rows) => ReplyMarkup::Keyboard {
                keyboard: rows
                    .iter()
                    .map(|row| {
                        row.iter()
                            .map(|label| KeyboardButton {
                                text: label.clone(),
                            })
                            .collect()
                    })
                    .collect(),
                resize_keyboard: true,
            },
            Keyboard::Remove => ReplyMarkup::Remove {
                remove_keyboard: true,
            },
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatActionRequest {
    chat_id: ChatId,
    action: &'static str,
}

#[derive(Debug, Serialize)]
struct SetWebhookRequest<'a> {
    url: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    secret_token: Option<&'a str>,
    allowed_updates: [&'static str; 1],
}

/// Telegram's limit on one message text, in UTF-16 code units
pub const MAX_MESSAGE_LEN: usize = 4096;

const CODE_OPEN: &str = "<code>";
const CODE_CLOSE: &str = "</code>";

// Only `<`, `>` and `&` are special in Telegram HTML.
fn escape_char(c: char) -> Option<&'static str> {
    match c {
        '<' => Some("&lt;"),
        '>' => Some("&gt;"),
        '&' => Some("&amp;"),
        _ => None,
    }
}

/// Escape text for Telegram's HTML parse mode.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match escape_char(c) {
            Some(entity) => escaped.push_str(entity),
            None => escaped.push(c),
        }
    }
    escaped
}

/// Escape `text` and wrap it in `<code>` blocks, one per message.
///
/// Each block, tags included, fits in `MAX_MESSAGE_LEN`. Escape sequences are
/// never split across blocks. Empty text yields no blocks.
pub fn code_blocks(text: &str) -> Vec<String> {
    let budget = MAX_MESSAGE_LEN - CODE_OPEN.len() - CODE_CLOSE.len();
    let mut blocks = Vec::new();
    let mut current = String::new();
    let mut used = 0;

    for c in text.chars() {
        let mut buf = [0u8; 4];
        let piece: &str = match escape_char(c) {
            Some(entity) => entity,
            None => c.encode_utf8(&mut buf),
        };
        let width = piece.encode_utf16().count();

        if used + width > budget && !current.is_empty() {
            blocks.push(format!("{}{}{}", CODE_OPEN, current, CODE_CLOSE));
            current.clear();
            used = 0;
        }
        current.push_str(piece);
        used += width;
    }

    if !current.is_empty() {
        blocks.push(format!("{}{}{}", CODE_OPEN, current, CODE_CLOSE));
    }
    blocks
}

/// Thin Telegram Bot API client over reqwest.
#[derive(Debug, Clone)]
pub struct TelegramClient {
    client: reqwest::Client,
    api_base: String,
}

impl TelegramClient {
    pub fn new(api_url: &str, bot_token: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_base: format!("{}/bot{}", api_url.trim_end_matches('/'), bot_token),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.telegram_api_url, &config.bot_token)
    }

    async fn call<T: Serialize + ?Sized>(&self, method: &str, body: &T) -> Result<()> {
        let url = format!("{}/{}", self.api_base, method);

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .with_context(|| format!("Failed to send {} request to Telegram API", method))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Telegram API error in {} ({}): {}", method, status, body);
        }

        Ok(())
    }

    /// Register the public webhook URL with Telegram
    pub async fn set_webhook(&self, url: &str, secret_token: Option<&str>) -> Result<()> {
        let request = SetWebhookRequest {
            url,
            secret_token,
            allowed_updates: ["message"],
        };
        self.call("setWebhook", &request).await?;
        info!("Webhook registered: {}", url);
        Ok(())
    }

    pub async fn delete_webhook(&self) -> Result<()> {
        self.call("deleteWebhook", &serde_json::json!({})).await?;
        info!("Webhook deleted");
        Ok(())
    }
}

impl Messenger for TelegramClient {
    async fn send_reply(&self, reply: OutboundReply) -> Result<()> {
        let request = SendMessageRequest {
            chat_id: reply.chat_id,
            text: &reply.text,
            parse_mode: match reply.format {
                TextFormat::Plain => None,
                TextFormat::Html => Some("HTML"),
            },
            reply_markup: reply.keyboard.as_ref().map(ReplyMarkup::from),
        };
        self.call("sendMessage", &request).await
    }

    async fn send_typing(&self, chat_id: ChatId) {
        let request = ChatActionRequest {
            chat_id,
            action: "typing",
        };
        if let Err(e) = self.call("sendChatAction", &request).await {
            warn!("Failed to send typing indicator to {}: {:#}", chat_id, e);
        }
    }
}
