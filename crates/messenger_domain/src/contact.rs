use crate::conversation::Conversation;
use unicode_width::UnicodeWidthChar as _;

// General category Nl: alphabetic, but numbers rather than letters.
const LETTER_NUMBERS: &[(char, char)] = &[
    ('\u{16EE}', '\u{16F0}'),
    ('\u{2160}', '\u{2182}'),
    ('\u{2185}', '\u{2188}'),
    ('\u{3007}', '\u{3007}'),
    ('\u{3021}', '\u{3029}'),
    ('\u{3038}', '\u{303A}'),
    ('\u{A6E6}', '\u{A6EF}'),
    ('\u{10140}', '\u{10174}'),
    ('\u{10341}', '\u{10341}'),
    ('\u{1034A}', '\u{1034A}'),
    ('\u{103D1}', '\u{103D5}'),
    ('\u{12400}', '\u{1246E}'),
];

/// Whether the avatar should show the first letter of the title.
///
/// Only single-recipient conversations qualify, and only when the title
/// starts with a letter in any script.
pub fn should_display_contact_letter(conversation: &Conversation) -> bool {
    if conversation.is_group() {
        return false;
    }

    conversation
        .title
        .as_deref()
        .and_then(|title| title.chars().next())
        .is_some_and(is_letter)
}

/// Alphabetic characters minus letter numbers and zero-width combining marks.
fn is_letter(ch: char) -> bool {
    ch.is_alphabetic()
        && ch.width() != Some(0)
        && !LETTER_NUMBERS
            .iter()
            .any(|(start, end)| (*start..=*end).contains(&ch))
}
