//! Character escape table for printable symbols that are not a single key.
//!
//! On a US layout most symbols are produced by holding Shift over a base key
//! (`!` is Shift+1, `{` is Shift+`[`).  A client asking to "press `!`" cannot
//! be served by a single evdev code, so these characters are routed through
//! the direct-type path instead.  The table records how each one is formed so
//! callers can still reason about the underlying chord.
//!
//! Characters that are neither in this table nor [directly
//! typeable](is_direct_typeable) are passed through literally.

use super::KeyCode;

/// How a printable character that needs special handling is produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharacterEscape {
    /// Sent as-is through the type command.
    Direct(char),
    /// Produced by holding Shift while pressing the base key.
    Shifted(KeyCode),
}

const ESCAPE_TABLE: &[(char, CharacterEscape)] = &[
    ('<', CharacterEscape::Shifted(KeyCode(51))), // comma
    ('>', CharacterEscape::Shifted(KeyCode(52))), // dot
    ('\'', CharacterEscape::Direct('\'')),
    ('"', CharacterEscape::Shifted(KeyCode(40))), // apostrophe
    ('!', CharacterEscape::Shifted(KeyCode(2))),
    ('@', CharacterEscape::Shifted(KeyCode(3))),
    ('#', CharacterEscape::Shifted(KeyCode(4))),
    ('$', CharacterEscape::Shifted(KeyCode(5))),
    ('%', CharacterEscape::Shifted(KeyCode(6))),
    ('^', CharacterEscape::Shifted(KeyCode(7))),
    ('&', CharacterEscape::Shifted(KeyCode(8))),
    ('*', CharacterEscape::Shifted(KeyCode(9))),
    ('(', CharacterEscape::Shifted(KeyCode(10))),
    (')', CharacterEscape::Shifted(KeyCode(11))),
    ('_', CharacterEscape::Shifted(KeyCode(12))), // minus
    ('+', CharacterEscape::Shifted(KeyCode(13))), // equal
    ('{', CharacterEscape::Shifted(KeyCode(26))), // leftbrace
    ('}', CharacterEscape::Shifted(KeyCode(27))), // rightbrace
    ('|', CharacterEscape::Shifted(KeyCode(43))), // backslash
    (':', CharacterEscape::Shifted(KeyCode(39))), // semicolon
    ('?', CharacterEscape::Shifted(KeyCode(53))), // slash
    ('~', CharacterEscape::Shifted(KeyCode(41))), // grave
];

/// Looks up the escape entry for `ch`.  Exact match; no case folding.
pub fn lookup_escape(ch: char) -> Option<CharacterEscape> {
    ESCAPE_TABLE
        .iter()
        .find(|(entry, _)| *entry == ch)
        .map(|&(_, escape)| escape)
}

/// Returns `true` for characters the type command handles without help:
/// ASCII letters, digits and space.
pub fn is_direct_typeable(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == ' '
}

/// Iterates over every character in the escape table.
pub fn escaped_chars() -> impl Iterator<Item = char> {
    ESCAPE_TABLE.iter().map(|&(ch, _)| ch)
}
