//! Classification of inbound message text.
//!
//! Priority order, first match wins: slash commands (unknown ones included),
//! language button, menu button, free text. Messages with no (or blank) text
//! are ignored.

use crate::i18n::{Language, UZBEK_STRINGS};

/// Static commands and menu buttons that never touch the translator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuCommand {
    Admin,
    Help,
    Statistics,
    ChooseLanguage,
    StartLesson,
    RandomWord,
}

/// What an inbound message asks the bot to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command<'a> {
    Start,
    SelectLanguage(Language),
    Menu(MenuCommand),
    UnknownCommand,
    Translate(&'a str),
    Ignore,
}

/// Slash commands, matched on the first token with any `@botname` suffix removed
const SLASH_COMMANDS: [(&str, MenuCommand); 4] = [
    ("/admin", MenuCommand::Admin),
    ("/help", MenuCommand::Help),
    ("/statistics", MenuCommand::Statistics),
    ("/language", MenuCommand::ChooseLanguage),
];

fn menu_button(text: &str) -> Option<MenuCommand> {
    let strings = &UZBEK_STRINGS;
    if text == strings.button_contact_admin {
        Some(MenuCommand::Admin)
    } else if text == strings.button_start_lesson {
        Some(MenuCommand::StartLesson)
    } else if text == strings.button_random_word {
        Some(MenuCommand::RandomWord)
    } else {
        None
    }
}

/// `/help@MyBot extra` -> `/help`
fn command_token(text: &str) -> Option<&str> {
    if !text.starts_with('/') {
        return None;
    }
    let token = text.split_whitespace().next().unwrap_or(text);
    Some(token.split('@').next().unwrap_or(token))
}

pub fn classify(text: Option<&str>) -> Command<'_> {
    let text = match text.map(str::trim) {
        Some(t) if !t.is_empty() => t,
        _ => return Command::Ignore,
    };

    if let Some(token) = command_token(text) {
        // Only a bare /start is the start trigger; deep-link payloads are not
        if token == "/start" && text.split_whitespace().nth(1).is_none() {
            return Command::Start;
        }
        return SLASH_COMMANDS
            .iter()
            .find(|(name, _)| *name == token)
            .map(|(_, cmd)| Command::Menu(*cmd))
            .unwrap_or(Command::UnknownCommand);
    }

    if let Some(language) = Language::from_label(text) {
        return Command::SelectLanguage(language);
    }

    if let Some(cmd) = menu_button(text) {
        return Command::Menu(cmd);
    }

    Command::Translate(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Ignore Tests ====================

    #[test]
    fn test_no_text_is_ignored() {
        assert_eq!(classify(None), Command::Ignore);
    }

    #[test]
    fn test_blank_text_is_ignored() {
        assert_eq!(classify(Some("")), Command::Ignore);
        assert_eq!(classify(Some("   \n")), Command::Ignore);
    }

    // ==================== Start Tests ====================

    #[test]
    fn test_start_command() {
        assert_eq!(classify(Some("/start")), Command::Start);
        assert_eq!(classify(Some("/start@TarjimonBot")), Command::Start);
    }

    #[test]
    fn test_start_with_payload_is_not_start() {
        assert_eq!(classify(Some("/start ref123")), Command::UnknownCommand);
        assert_eq!(classify(Some("/start@TarjimonBot ref123")), Command::UnknownCommand);
    }

    #[test]
    fn test_start_prefix_is_not_start() {
        assert_eq!(classify(Some("/starting")), Command::UnknownCommand);
    }

    // ==================== Language Tests ====================

    #[test]
    fn test_language_buttons() {
        assert_eq!(
            classify(Some("🇬🇧 English")),
            Command::SelectLanguage(Language::English)
        );
        assert_eq!(
            classify(Some("🇷🇺 Русский")),
            Command::SelectLanguage(Language::Russian)
        );
        assert_eq!(
            classify(Some("🇺🇿 O'zbekcha")),
            Command::SelectLanguage(Language::Uzbek)
        );
    }

    #[test]
    fn test_typed_language_name() {
        assert_eq!(
            classify(Some("English")),
            Command::SelectLanguage(Language::English)
        );
    }

    // ==================== Menu Tests ====================

    #[test]
    fn test_slash_commands() {
        assert_eq!(classify(Some("/admin")), Command::Menu(MenuCommand::Admin));
        assert_eq!(classify(Some("/help")), Command::Menu(MenuCommand::Help));
        assert_eq!(
            classify(Some("/statistics")),
            Command::Menu(MenuCommand::Statistics)
        );
        assert_eq!(
            classify(Some("/language")),
            Command::Menu(MenuCommand::ChooseLanguage)
        );
    }

    #[test]
    fn test_slash_command_with_bot_suffix() {
        assert_eq!(
            classify(Some("/statistics@TarjimonBot")),
            Command::Menu(MenuCommand::Statistics)
        );
    }

    #[test]
    fn test_menu_buttons() {
        assert_eq!(
            classify(Some(UZBEK_STRINGS.button_contact_admin)),
            Command::Menu(MenuCommand::Admin)
        );
        assert_eq!(
            classify(Some(UZBEK_STRINGS.button_start_lesson)),
            Command::Menu(MenuCommand::StartLesson)
        );
        assert_eq!(
            classify(Some(UZBEK_STRINGS.button_random_word)),
            Command::Menu(MenuCommand::RandomWord)
        );
    }

    #[test]
    fn test_unknown_slash_command() {
        assert_eq!(classify(Some("/foo")), Command::UnknownCommand);
        assert_eq!(classify(Some("/")), Command::UnknownCommand);
    }

    // ==================== Free Text Tests ====================

    #[test]
    fn test_free_text() {
        assert_eq!(classify(Some("salom")), Command::Translate("salom"));
        assert_eq!(
            classify(Some("  qalaysiz?  ")),
            Command::Translate("qalaysiz?")
        );
    }

    #[test]
    fn test_text_mentioning_command_is_free_text() {
        assert_eq!(
            classify(Some("what does /start do")),
            Command::Translate("what does /start do")
        );
    }
}
