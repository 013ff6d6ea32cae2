//! Language handling for the bot.
//!
//! # Architecture
//!
//! - `registry`: static table of supported target languages and their button labels
//! - `language`: closed `Language` enum backed by the registry
//! - `strings`: user-facing reply texts (Uzbek UI)
//!
//! # Example
//!
//! ```rust,ignore
//! use crate::i18n::Language;
//!
//! let picked = Language::from_label("🇬🇧 English");
//! ```

mod language;
mod registry;
mod strings;

pub use language::Language;
pub use registry::{LanguageConfig, LANGUAGES};
pub use strings::{UiStrings, UZBEK_STRINGS, VOCABULARY};
