//! The validated command model.
//!
//! A [`Command`] is built from a command name and a [`CommandArgs`] bag.
//! Building checks that required arguments are present; it does not resolve
//! key names (that happens in [`crate::domain::sequence`]).

use crate::domain::error::CommandError;
use crate::domain::primitive::PointerButton;
use crate::protocol::messages::CommandArgs;

/// Largest accepted `|clicks|` for `scroll` and `hscroll`.
pub const MAX_SCROLL_CLICKS: u32 = 1000;

/// The fixed set of command names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    Type,
    Press,
    Hotkey,
    KeyDown,
    KeyUp,
    Move,
    Click,
    Scroll,
    HScroll,
    Exec,
}

impl CommandKind {
    /// Every kind, in protocol order.
    pub const ALL: [CommandKind; 10] = [
        CommandKind::Type,
        CommandKind::Press,
        CommandKind::Hotkey,
        CommandKind::KeyDown,
        CommandKind::KeyUp,
        CommandKind::Move,
        CommandKind::Click,
        CommandKind::Scroll,
        CommandKind::HScroll,
        CommandKind::Exec,
    ];

    /// Parses a wire name.  `open_terminal_and_exec` is accepted as the legacy
    /// spelling of `exec`.
    pub fn from_name(name: &str) -> Option<Self> {
        let kind = match name {
            "type" => CommandKind::Type,
            "press" => CommandKind::Press,
            "hotkey" => CommandKind::Hotkey,
            "keydown" => CommandKind::KeyDown,
            "keyup" => CommandKind::KeyUp,
            "move" => CommandKind::Move,
            "click" => CommandKind::Click,
            "scroll" => CommandKind::Scroll,
            "hscroll" => CommandKind::HScroll,
            "exec" | "open_terminal_and_exec" => CommandKind::Exec,
            _ => return None,
        };
        Some(kind)
    }

    /// Canonical wire name.
    pub fn name(self) -> &'static str {
        match self {
            CommandKind::Type => "type",
            CommandKind::Press => "press",
            CommandKind::Hotkey => "hotkey",
            CommandKind::KeyDown => "keydown",
            CommandKind::KeyUp => "keyup",
            CommandKind::Move => "move",
            CommandKind::Click => "click",
            CommandKind::Scroll => "scroll",
            CommandKind::HScroll => "hscroll",
            CommandKind::Exec => "exec",
        }
    }
}

/// A command with its arguments checked for presence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Type { text: String },
    Press { key: String },
    Hotkey { keys: Vec<String> },
    KeyDown { key: String },
    KeyUp { key: String },
    Move { x: i32, y: i32 },
    Click { button: PointerButton },
    Scroll { clicks: i32 },
    HScroll { clicks: i32 },
    Exec { command_line: String },
}

impl Command {
    /// Builds a command of `kind` from `args`, naming it by its canonical
    /// name in error messages.
    ///
    /// Defaults: `text` → empty, `x`/`y` → 0, `clicks` → 0, `button` → left.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError::MissingArgument`] when `press`, `keydown` or
    /// `keyup` lack a non-empty `key`, `hotkey` lacks a non-empty `keys`
    /// list, or `exec` lacks a non-empty `command`.  Returns
    /// [`CommandError::InvalidArgument`] when `scroll` or `hscroll` asks for
    /// more than [`MAX_SCROLL_CLICKS`] clicks in either direction.
    pub fn from_args(kind: CommandKind, args: CommandArgs) -> Result<Self, CommandError> {
        Self::from_named_args(kind, kind.name(), args)
    }

    /// Like [`Command::from_args`], but errors name the command as `name`,
    /// the spelling the client actually sent (e.g. `open_terminal_and_exec`).
    pub fn from_named_args(
        kind: CommandKind,
        name: &str,
        args: CommandArgs,
    ) -> Result<Self, CommandError> {
        let command = match kind {
            CommandKind::Type => Command::Type {
                text: args.text.unwrap_or_default(),
            },
            CommandKind::Press => Command::Press {
                key: required_key(name, args.key)?,
            },
            CommandKind::Hotkey => {
                let keys = args.keys.unwrap_or_default();
                if keys.is_empty() {
                    return Err(missing(name, "Keys"));
                }
                Command::Hotkey { keys }
            }
            CommandKind::KeyDown => Command::KeyDown {
                key: required_key(name, args.key)?,
            },
            CommandKind::KeyUp => Command::KeyUp {
                key: required_key(name, args.key)?,
            },
            CommandKind::Move => Command::Move {
                x: args.x.unwrap_or(0),
                y: args.y.unwrap_or(0),
            },
            CommandKind::Click => Command::Click {
                button: PointerButton::from_name(args.button.as_deref()),
            },
            CommandKind::Scroll => Command::Scroll {
                clicks: checked_scroll_clicks(name, args.clicks.unwrap_or(0))?,
            },
            CommandKind::HScroll => Command::HScroll {
                clicks: checked_scroll_clicks(name, args.clicks.unwrap_or(0))?,
            },
            CommandKind::Exec => match args.command {
                Some(command_line) if !command_line.is_empty() => Command::Exec { command_line },
                _ => return Err(missing(name, "Command")),
            },
        };
        Ok(command)
    }

    pub fn kind(&self) -> CommandKind {
        match self {
            Command::Type { .. } => CommandKind::Type,
            Command::Press { .. } => CommandKind::Press,
            Command::Hotkey { .. } => CommandKind::Hotkey,
            Command::KeyDown { .. } => CommandKind::KeyDown,
            Command::KeyUp { .. } => CommandKind::KeyUp,
            Command::Move { .. } => CommandKind::Move,
            Command::Click { .. } => CommandKind::Click,
            Command::Scroll { .. } => CommandKind::Scroll,
            Command::HScroll { .. } => CommandKind::HScroll,
            Command::Exec { .. } => CommandKind::Exec,
        }
    }
}

/// Rejects scroll amounts beyond [`MAX_SCROLL_CLICKS`].
pub(crate) fn checked_scroll_clicks(name: &str, clicks: i32) -> Result<i32, CommandError> {
    if clicks.unsigned_abs() > MAX_SCROLL_CLICKS {
        return Err(CommandError::InvalidArgument {
            command: name.to_string(),
            reason: format!(
                "clicks must be between -{MAX_SCROLL_CLICKS} and {MAX_SCROLL_CLICKS}, got {clicks}"
            ),
        });
    }
    Ok(clicks)
}

fn required_key(name: &str, key: Option<String>) -> Result<String, CommandError> {
    match key {
        Some(key) if !key.is_empty() => Ok(key),
        _ => Err(missing(name, "Key")),
    }
}

fn missing(name: &str, argument: &'static str) -> CommandError {
    CommandError::MissingArgument {
        command: name.to_string(),
        argument,
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
