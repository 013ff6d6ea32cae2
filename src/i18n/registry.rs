//! Language registry: single source of truth for the supported target languages.
//!
//! Every language the bot can translate into has exactly one row here. The
//! row carries the keyboard label shown to users, so mapping a pressed button
//! back to a language code is a table lookup rather than scattered string
//! comparisons.

use crate::i18n::Language;

/// Configuration for a supported target language.
#[derive(Debug, Clone, Copy)]
pub struct LanguageConfig {
    pub language: Language,

    /// ISO 639-1 language code sent to the translation service (e.g., "uz", "ru")
    pub code: &'static str,

    /// English name of the language (e.g., "Uzbek", "Russian")
    pub name: &'static str,

    /// Native name of the language (e.g., "O'zbekcha", "Русский")
    pub native_name: &'static str,

    /// Text of the reply-keyboard button that selects this language
    pub button_label: &'static str,
}

/// Supported languages, in keyboard order.
pub const LANGUAGES: [LanguageConfig; 3] = [
    LanguageConfig {
        language: Language::Uzbek,
        code: "uz",
        name: "Uzbek",
        native_name: "O'zbekcha",
        button_label: "🇺🇿 O'zbekcha",
    },
    LanguageConfig {
        language: Language::Russian,
        code: "ru",
        name: "Russian",
        native_name: "Русский",
        button_label: "🇷🇺 Русский",
    },
    LanguageConfig {
        language: Language::English,
        code: "en",
        name: "English",
        native_name: "English",
        button_label: "🇬🇧 English",
    },
];

/// Get a language configuration by the text a user sent.
///
/// Accepts the exact button label, or the bare native name typed by hand
/// (trimmed, case-insensitive).
pub fn get_by_label(text: &str) -> Option<&'static LanguageConfig> {
    let text = text.trim();
    LANGUAGES.iter().find(|lang| {
        lang.button_label == text || lang.native_name.to_lowercase() == text.to_lowercase()
    })
}
