//! Key code and character escape tables.
//!
//! The canonical key representation is the Linux evdev key code
//! (`linux/input-event-codes.h`), which is what `ydotool key <code>:<state>`
//! consumes.  Human-readable names sent by clients are resolved through
//! [`lookup_key`]; printable symbols that need a modifier are described by
//! [`lookup_escape`].

pub mod escape;
pub mod evdev;

use serde::{Deserialize, Serialize};

pub use escape::{escaped_chars, is_direct_typeable, lookup_escape, CharacterEscape};
pub use evdev::{key_names, lookup_key};

/// A Linux evdev key code.
///
/// The inner value is the numeric code from `linux/input-event-codes.h`
/// (e.g. `KEY_A` = 30, `KEY_LEFTCTRL` = 29).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeyCode(pub u16);

impl KeyCode {
    pub const LEFT_CTRL: KeyCode = KeyCode(29);
    pub const LEFT_SHIFT: KeyCode = KeyCode(42);
    pub const LEFT_ALT: KeyCode = KeyCode(56);
    pub const LEFT_META: KeyCode = KeyCode(125);

    // Directional keys used to emulate scrolling.
    pub const UP: KeyCode = KeyCode(103);
    pub const LEFT: KeyCode = KeyCode(105);
    pub const RIGHT: KeyCode = KeyCode(106);
    pub const DOWN: KeyCode = KeyCode(108);

    /// Returns the raw evdev code.
    pub fn code(self) -> u16 {
        self.0
    }
}

impl std::fmt::Display for KeyCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
