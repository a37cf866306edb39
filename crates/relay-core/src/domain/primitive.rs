//! Primitive input events: the unit handed to the injection backend.
//!
//! A command is translated into an ordered `Vec<Primitive>`; each primitive
//! is one indivisible action that the backend performs with a single call.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::keymap::KeyCode;

/// Whether a key is being pressed or released.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyDirection {
    Down,
    Up,
}

/// A single key press or release.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KeyTransition {
    pub code: KeyCode,
    pub direction: KeyDirection,
}

/// Mouse buttons that a `click` command can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerButton {
    #[default]
    Left,
    Right,
    Middle,
}

impl PointerButton {
    /// Maps a client-supplied button name to a button.
    ///
    /// Missing or unrecognised names fall back to [`PointerButton::Left`].
    /// Matching is exact, as sent by the client.
    pub fn from_name(name: Option<&str>) -> Self {
        match name {
            Some("right") => PointerButton::Right,
            Some("middle") => PointerButton::Middle,
            _ => PointerButton::Left,
        }
    }

    /// Lowercase name used in response messages.
    pub fn name(self) -> &'static str {
        match self {
            PointerButton::Left => "left",
            PointerButton::Right => "right",
            PointerButton::Middle => "middle",
        }
    }
}

/// One indivisible injected action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Primitive {
    /// Press or release one key.
    Key(KeyTransition),
    /// Type one character through the backend's text-entry command.
    Type(char),
    /// Move the pointer relative to its current position.
    PointerMove { dx: i32, dy: i32 },
    /// Press and release a mouse button.
    PointerClick(PointerButton),
    /// Launch a command line with a display environment.
    ProcessExec(String),
}

impl Primitive {
    pub fn key_down(code: KeyCode) -> Self {
        Primitive::Key(KeyTransition {
            code,
            direction: KeyDirection::Down,
        })
    }

    pub fn key_up(code: KeyCode) -> Self {
        Primitive::Key(KeyTransition {
            code,
            direction: KeyDirection::Up,
        })
    }

    /// The backend mode this primitive is executed in.
    pub fn mode(&self) -> InjectionMode {
        match self {
            Primitive::Key(_) => InjectionMode::KeyTransition,
            Primitive::Type(_) => InjectionMode::Text,
            Primitive::PointerMove { .. } => InjectionMode::PointerMove,
            Primitive::PointerClick(_) => InjectionMode::PointerClick,
            Primitive::ProcessExec(_) => InjectionMode::ProcessExec,
        }
    }
}

/// Tag identifying which backend operation a primitive maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InjectionMode {
    KeyTransition,
    Text,
    PointerMove,
    PointerClick,
    ProcessExec,
}

impl fmt::Display for InjectionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            InjectionMode::KeyTransition => "key-transition",
            InjectionMode::Text => "text",
            InjectionMode::PointerMove => "pointer-move",
            InjectionMode::PointerClick => "pointer-click",
            InjectionMode::ProcessExec => "process-exec",
        };
        f.write_str(name)
    }
}
