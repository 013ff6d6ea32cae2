/// All user-facing reply texts.
///
/// Strings are written for Telegram's HTML parse mode: the only markup they
/// contain is intentional tags, and they contain no bare `<`, `>` or `&`.
/// Values substituted into placeholders must be HTML-escaped first.
#[derive(Debug, Clone)]
pub struct UiStrings {
    // ==================== Start / Language ====================
    /// Greeting sent on /start, followed by the language keyboard
    pub greeting: &'static str,

    /// Sent with the language keyboard on /language
    pub choose_language: &'static str,

    /// Confirmation after a language button is pressed
    /// Placeholders: {language}
    pub language_selected: &'static str,

    /// Free text arrived before any language was picked
    pub choose_language_first: &'static str,

    // ==================== Translation ====================
    /// Fixed apology when the translation service fails
    pub translation_failed: &'static str,

    // ==================== Static Commands ====================
    /// Placeholders: {admin}
    pub admin_contact: &'static str,

    pub help: &'static str,

    /// Placeholders: {total}, {today}, {week}, {month}
    pub statistics: &'static str,

    pub lesson_intro: &'static str,

    /// Placeholders: {uz}, {en}, {ru}
    pub random_word: &'static str,

    pub unknown_command: &'static str,

    // ==================== Menu Buttons ====================
    pub button_contact_admin: &'static str,
    pub button_start_lesson: &'static str,
    pub button_random_word: &'static str,
}

pub const UZBEK_STRINGS: UiStrings = UiStrings {
    // Start / Language
    greeting: "Salom! Bot ishga tushdi.\n\n\
Tarjima qilinadigan tilni tanlang, so'ng menga istalgan matnni yuboring.\n\
/statistics buyrug'i orqali statistikani ko'rishingiz mumkin.",
    choose_language: "🌐 Tarjima tilini tanlang:",
    language_selected: "✅ Tanlangan til: <b>{language}</b>\nEndi tarjima uchun matn yuboring.",
    choose_language_first: "⚠️ Avval tarjima tilini tanlang.",

    // Translation
    translation_failed: "❌ Kechirasiz, tarjima qilib bo'lmadi. Birozdan so'ng qayta urinib ko'ring.",

    // Static commands
    admin_contact: "<b>👨‍💻 Admin:</b> {admin}",
    help: "<b>ℹ️ Yordam</b>\n\n\
/start - Botni ishga tushirish va tilni tanlash\n\
/language - Tarjima tilini o'zgartirish\n\
/statistics - Foydalanuvchilar statistikasi\n\
/admin - Admin bilan bog'lanish\n\
/help - Ushbu yordam\n\n\
Til tanlangandan so'ng yuborilgan har qanday matn tarjima qilinadi.",
    statistics: "<b>📊 Statistika:</b>\n\n\
Total foydalanuvchilar: {total}\n\
Bugun: {today}\n\
Bu hafta: {week}\n\
Bu oy: {month}",
    lesson_intro: "<b>📚 Dars</b>\n\n\
Har kuni bir nechta yangi so'z o'rganing: 🎲 Tasodifiy so'z tugmasini bosing \
yoki istalgan jumlani yuborib, uning tarjimasini ko'ring.",
    random_word: "<b>🎲 Tasodifiy so'z</b>\n\n\
🇺🇿 {uz}\n\
🇬🇧 {en}\n\
🇷🇺 {ru}",
    unknown_command: "Noma'lum buyruq. /help orqali mavjud buyruqlarni ko'ring.",

    // Menu buttons
    button_contact_admin: "📞 Admin bilan bog'lanish",
    button_start_lesson: "📚 Darsni boshlash",
    button_random_word: "🎲 Tasodifiy so'z",
};

/// Word list for the random-word button: (Uzbek, English, Russian)
pub const VOCABULARY: [(&str, &str, &str); 12] = [
    ("kitob", "book", "книга"),
    ("suv", "water", "вода"),
    ("non", "bread", "хлеб"),
    ("uy", "house", "дом"),
    ("do'st", "friend", "друг"),
    ("maktab", "school", "школа"),
    ("quyosh", "sun", "солнце"),
    ("yo'l", "road", "дорога"),
    ("bozor", "market", "рынок"),
    ("shahar", "city", "город"),
    ("vaqt", "time", "время"),
    ("til", "language", "язык"),
];
