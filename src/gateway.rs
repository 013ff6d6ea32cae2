//! Narrow contracts between the router and the outside world.
//!
//! The router only ever sees these types; the Telegram and translation HTTP
//! clients implement the traits, and tests substitute recording fakes.

use crate::i18n::{Language, UZBEK_STRINGS};
use crate::session::UserId;
use crate::translation::TranslationError;
use anyhow::Result;
use std::future::Future;

/// Telegram chat identifier (negative for groups)
pub type ChatId = i64;

/// A message delivered to the bot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundEvent {
    pub user_id: UserId,
    pub chat_id: ChatId,
    /// `None` for stickers, photos and other non-text messages
    pub text: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextFormat {
    Plain,
    /// Telegram HTML parse mode
    Html,
}

/// Reply-keyboard directive attached to an outbound message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Keyboard {
    /// Rows of button labels
    Buttons(Vec<Vec<String>>),
    /// Hide the current reply keyboard
    Remove,
}

impl Keyboard {
    /// One row with every language button, in registry order.
    pub fn languages() -> Self {
        Keyboard::Buttons(vec![Language::ALL
            .iter()
            .map(|l| l.button_label().to_string())
            .collect()])
    }

    /// Static menu buttons shown with /help.
    pub fn main_menu() -> Self {
        let strings = &UZBEK_STRINGS;
        Keyboard::Buttons(vec![
            vec![strings.button_start_lesson.to_string(), strings.button_random_word.to_string()],
            vec![strings.button_contact_admin.to_string()],
        ])
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundReply {
    pub chat_id: ChatId,
    pub text: String,
    pub format: TextFormat,
    pub keyboard: Option<Keyboard>,
}

impl OutboundReply {
    pub fn plain(chat_id: ChatId, text: impl Into<String>) -> Self {
        Self {
            chat_id,
            text: text.into(),
            format: TextFormat::Plain,
            keyboard: None,
        }
    }

    pub fn html(chat_id: ChatId, text: impl Into<String>) -> Self {
        Self {
            format: TextFormat::Html,
            ..Self::plain(chat_id, text)
        }
    }

    pub fn with_keyboard(mut self, keyboard: Keyboard) -> Self {
        self.keyboard = Some(keyboard);
        self
    }
}

/// Outbound side of the messaging platform.
pub trait Messenger: Send + Sync {
    fn send_reply(&self, reply: OutboundReply) -> impl Future<Output = Result<()>> + Send;

    /// Show a typing indicator. Fire-and-forget: implementations log
    /// failures instead of returning them.
    fn send_typing(&self, chat_id: ChatId) -> impl Future<Output = ()> + Send;
}

/// Machine-translation service.
pub trait Translator: Send + Sync {
    fn translate(
        &self,
        text: &str,
        target: Language,
    ) -> impl Future<Output = Result<String, TranslationError>> + Send;
}
