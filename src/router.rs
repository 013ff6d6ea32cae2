//! Command router: turns one inbound event into its reply. A long translation
//! is the only reply sent as several messages.
//!
//! The router owns the session store. Translation failures are handled here
//! and never reach the caller; only messenger (Telegram send) failures are
//! returned.

use crate::command::{classify, Command, MenuCommand};
use crate::config::Config;
use crate::gateway::{ChatId, InboundEvent, Keyboard, Messenger, OutboundReply, Translator};
use crate::i18n::{Language, UZBEK_STRINGS, VOCABULARY};
use crate::session::{SessionStore, UserId};
use crate::stats;
use crate::telegram::{code_blocks, escape_html};
use crate::translation::TranslationError;
use anyhow::Result;
use chrono::{DateTime, Utc};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Router knobs that come from configuration.
#[derive(Debug, Clone)]
pub struct RouterSettings {
    /// Hard upper bound on one translation call
    pub translate_timeout: Duration,
    /// Shown by /admin and the contact-admin button
    pub admin_username: String,
}

impl RouterSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            translate_timeout: config.translate_timeout(),
            admin_username: config.admin_username.clone(),
        }
    }
}

impl Default for RouterSettings {
    fn default() -> Self {
        Self {
            translate_timeout: Duration::from_secs(5),
            admin_username: "@your_admin_username".to_string(),
        }
    }
}

pub struct CommandRouter<M, T> {
    sessions: SessionStore,
    messenger: M,
    translator: T,
    settings: RouterSettings,
}

impl<M: Messenger, T: Translator> CommandRouter<M, T> {
    pub fn new(sessions: SessionStore, messenger: M, translator: T, settings: RouterSettings) -> Self {
        Self {
            sessions,
            messenger,
            translator,
            settings,
        }
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    /// Handle one event using the current time.
    pub async fn handle(&self, event: InboundEvent) -> Result<()> {
        self.handle_at(event, Utc::now()).await
    }

    /// Handle one event as if it arrived at `now`.
    pub async fn handle_at(&self, event: InboundEvent, now: DateTime<Utc>) -> Result<()> {
        let InboundEvent {
            user_id,
            chat_id,
            text,
        } = event;

        let command = classify(text.as_deref());
        if command == Command::Ignore {
            debug!("Ignoring non-text message from {}", user_id);
            return Ok(());
        }

        info!("Received {} from user {} in chat {}", kind(&command), user_id, chat_id);

        match command {
            Command::Start => self.start(user_id, chat_id, now).await,
            Command::SelectLanguage(language) => {
                self.select_language(user_id, chat_id, language).await
            }
            Command::Menu(menu) => self.menu(chat_id, menu, now).await,
            Command::UnknownCommand => {
                self.reply(OutboundReply::plain(chat_id, UZBEK_STRINGS.unknown_command))
                    .await
            }
            Command::Translate(text) => self.translate(user_id, chat_id, text).await,
            Command::Ignore => Ok(()),
        }
    }

    async fn reply(&self, reply: OutboundReply) -> Result<()> {
        self.messenger.send_reply(reply).await
    }

    async fn start(&self, user_id: UserId, chat_id: ChatId, now: DateTime<Utc>) -> Result<()> {
        if self.sessions.touch_first_seen(user_id, now) {
            info!("New user {}", user_id);
        }

        self.reply(
            OutboundReply::plain(chat_id, UZBEK_STRINGS.greeting)
                .with_keyboard(Keyboard::languages()),
        )
        .await
    }

    async fn select_language(
        &self,
        user_id: UserId,
        chat_id: ChatId,
        language: Language,
    ) -> Result<()> {
        self.sessions.set_language(user_id, language);
        info!(
            "User {} selected language {} ({})",
            user_id,
            language.name(),
            language.code()
        );

        let text = UZBEK_STRINGS
            .language_selected
            .replace("{language}", language.native_name());
        self.reply(OutboundReply::html(chat_id, text).with_keyboard(Keyboard::Remove))
            .await
    }

    async fn menu(&self, chat_id: ChatId, menu: MenuCommand, now: DateTime<Utc>) -> Result<()> {
        let strings = &UZBEK_STRINGS;
        let reply = match menu {
            MenuCommand::Admin => OutboundReply::html(
                chat_id,
                strings
                    .admin_contact
                    .replace("{admin}", &escape_html(&self.settings.admin_username)),
            ),
            MenuCommand::Help => {
                OutboundReply::html(chat_id, strings.help).with_keyboard(Keyboard::main_menu())
            }
            MenuCommand::Statistics => {
                OutboundReply::html(chat_id, format_statistics(&stats::compute(&self.sessions, now)))
            }
            MenuCommand::ChooseLanguage => OutboundReply::plain(chat_id, strings.choose_language)
                .with_keyboard(Keyboard::languages()),
            MenuCommand::StartLesson => OutboundReply::html(chat_id, strings.lesson_intro),
            MenuCommand::RandomWord => OutboundReply::html(chat_id, random_word(now)),
        };
        self.reply(reply).await
    }

    async fn translate(&self, user_id: UserId, chat_id: ChatId, text: &str) -> Result<()> {
        let Some(language) = self.sessions.get_language(user_id) else {
            debug!("User {} has no language yet, prompting", user_id);
            return self
                .reply(
                    OutboundReply::plain(chat_id, UZBEK_STRINGS.choose_language_first)
                        .with_keyboard(Keyboard::languages()),
                )
                .await;
        };

        debug!("Translating for {} to {}: {}", user_id, language.code(), text);

        let (_, result) = futures::join!(
            self.messenger.send_typing(chat_id),
            self.translate_bounded(text, language)
        );

        match result {
            Ok(translated) => {
                let blocks = code_blocks(&translated);
                if blocks.len() > 1 {
                    debug!("Splitting translation for {} into {} messages", user_id, blocks.len());
                }
                for block in blocks {
                    self.reply(OutboundReply::html(chat_id, block)).await?;
                }
                Ok(())
            }
            Err(e) => {
                warn!("Translation for user {} failed: {}", user_id, e);
                self.reply(OutboundReply::plain(chat_id, UZBEK_STRINGS.translation_failed))
                    .await
            }
        }
    }

    /// Translation bounded by `translate_timeout`.
    async fn translate_bounded(
        &self,
        text: &str,
        language: Language,
    ) -> Result<String, TranslationError> {
        let limit = self.settings.translate_timeout;
        let translated =
            match tokio::time::timeout(limit, self.translator.translate(text, language)).await {
                Ok(result) => result?,
                Err(_) => return Err(TranslationError::Timeout(limit)),
            };

        if translated.trim().is_empty() {
            return Err(TranslationError::EmptyResult);
        }
        Ok(translated)
    }
}

/// Short label for logs; never includes user text.
fn kind(command: &Command<'_>) -> &'static str {
    match command {
        Command::Start => "start",
        Command::SelectLanguage(_) => "language selection",
        Command::Menu(_) => "menu command",
        Command::UnknownCommand => "unknown command",
        Command::Translate(_) => "translation request",
        Command::Ignore => "ignored message",
    }
}

pub fn format_statistics(stats: &stats::UsageStats) -> String {
    UZBEK_STRINGS
        .statistics
        .replace("{total}", &stats.total.to_string())
        .replace("{today}", &stats.today.to_string())
        .replace("{week}", &stats.this_week.to_string())
        .replace("{month}", &stats.this_month.to_string())
}

/// Pick a vocabulary entry from the event time.
fn random_word(now: DateTime<Utc>) -> String {
    let seed = now.timestamp().unsigned_abs() ^ u64::from(now.timestamp_subsec_nanos());
    let (uz, en, ru) = VOCABULARY[(seed % VOCABULARY.len() as u64) as usize];
    UZBEK_STRINGS
        .random_word
        .replace("{uz}", uz)
        .replace("{en}", en)
        .replace("{ru}", ru)
}
