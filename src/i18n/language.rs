//! Language type: closed set of translation targets.

use crate::i18n::registry::{self, LanguageConfig, LANGUAGES};
use std::fmt;

/// A target language the user can pick.
///
/// Every variant has exactly one row in the registry; `config()` is the only
/// way to reach its metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    Uzbek,
    Russian,
    English,
}

impl Language {
    /// All languages, in keyboard order.
    pub const ALL: [Language; 3] = [Language::Uzbek, Language::Russian, Language::English];

    /// Resolve a keyboard label (or a typed native name) to a language.
    pub fn from_label(text: &str) -> Option<Language> {
        registry::get_by_label(text).map(|config| config.language)
    }

    /// Get the full language configuration from the registry.
    pub fn config(&self) -> &'static LanguageConfig {
        match self {
            Language::Uzbek => &LANGUAGES[0],
            Language::Russian => &LANGUAGES[1],
            Language::English => &LANGUAGES[2],
        }
    }

    pub fn code(&self) -> &'static str {
        self.config().code
    }

    pub fn name(&self) -> &'static str {
        self.config().name
    }

    pub fn native_name(&self) -> &'static str {
        self.config().native_name
    }

    pub fn button_label(&self) -> &'static str {
        self.config().button_label
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
