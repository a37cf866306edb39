//! Event sequence builder: translates a [`Command`] into ordered primitives.
//!
//! This is pure logic with no I/O.  The output is executed front to back by
//! an injection backend, so ordering here is the ordering the host sees.
//!
//! # Chord ordering
//!
//! A hotkey presses its keys in the order given and releases them in reverse,
//! the way fingers leave a physical chord:
//!
//! ```text
//! hotkey [ctrl, shift, a]
//!   ctrl↓ shift↓ a↓ a↑ shift↑ ctrl↑
//! ```
//!
//! # Scrolling
//!
//! Scrolling is emulated with directional key taps: `scroll` uses up/down,
//! `hscroll` uses right/left, one tap per click.  Zero clicks degrades to a
//! plain left click.

use tracing::trace;

use crate::domain::command::{checked_scroll_clicks, Command, CommandKind};
use crate::domain::error::CommandError;
use crate::domain::primitive::{PointerButton, Primitive};
use crate::keymap::{lookup_escape, lookup_key, KeyCode};

/// The host family, for commands that only work on some systems.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostPlatform {
    /// Linux, macOS, BSD.
    Posix,
    Other,
}

impl HostPlatform {
    /// The platform this binary was compiled for.
    pub fn current() -> Self {
        if cfg!(unix) {
            HostPlatform::Posix
        } else {
            HostPlatform::Other
        }
    }
}

/// Builds the primitive sequence for `command`.
///
/// Nothing is emitted on error; a command either yields its full sequence or
/// fails before producing anything.
///
/// # Errors
///
/// - [`CommandError::UnresolvedKey`] if a key name is not in the tables.
/// - [`CommandError::InvalidArgument`] for a scroll beyond
///   [`MAX_SCROLL_CLICKS`](crate::domain::command::MAX_SCROLL_CLICKS).
/// - [`CommandError::UnsupportedPlatform`] for `exec` on a non-POSIX host.
pub fn build_sequence(command: &Command, host: HostPlatform) -> Result<Vec<Primitive>, CommandError> {
    let sequence = match command {
        Command::Type { text } => Ok(type_text(text)),
        Command::Press { key } => press(key),
        Command::Hotkey { keys } => hotkey(keys),
        Command::KeyDown { key } => Ok(vec![Primitive::key_down(resolve(key)?)]),
        Command::KeyUp { key } => Ok(vec![Primitive::key_up(resolve(key)?)]),
        Command::Move { x, y } => Ok(vec![Primitive::PointerMove { dx: *x, dy: *y }]),
        Command::Click { button } => Ok(vec![Primitive::PointerClick(*button)]),
        Command::Scroll { clicks } => scroll(CommandKind::Scroll, *clicks, KeyCode::UP, KeyCode::DOWN),
        Command::HScroll { clicks } => {
            scroll(CommandKind::HScroll, *clicks, KeyCode::RIGHT, KeyCode::LEFT)
        }
        Command::Exec { command_line } => match host {
            HostPlatform::Posix => Ok(vec![Primitive::ProcessExec(command_line.clone())]),
            HostPlatform::Other => Err(CommandError::UnsupportedPlatform(CommandKind::Exec.name())),
        },
    }?;
    trace!(
        command = command.kind().name(),
        primitives = sequence.len(),
        "built event sequence"
    );
    Ok(sequence)
}

/// One `Type` per character.  Escaped symbols and plain characters take the
/// same path; nothing is rejected.
fn type_text(text: &str) -> Vec<Primitive> {
    text.chars().map(Primitive::Type).collect()
}

fn press(key: &str) -> Result<Vec<Primitive>, CommandError> {
    if let Some(ch) = single_char(key) {
        if lookup_escape(ch).is_some() {
            return Ok(vec![Primitive::Type(ch)]);
        }
    }
    let code = resolve(key)?;
    Ok(vec![Primitive::key_down(code), Primitive::key_up(code)])
}

fn hotkey(keys: &[String]) -> Result<Vec<Primitive>, CommandError> {
    // Resolve everything before emitting so a bad name never leaves a key held.
    let codes = keys
        .iter()
        .map(|key| resolve(key))
        .collect::<Result<Vec<_>, _>>()?;

    let downs = codes.iter().copied().map(Primitive::key_down);
    let ups = codes.iter().rev().copied().map(Primitive::key_up);
    Ok(downs.chain(ups).collect())
}

fn scroll(
    kind: CommandKind,
    clicks: i32,
    positive: KeyCode,
    negative: KeyCode,
) -> Result<Vec<Primitive>, CommandError> {
    let clicks = checked_scroll_clicks(kind.name(), clicks)?;
    let key = match clicks.signum() {
        1 => positive,
        -1 => negative,
        _ => return Ok(vec![Primitive::PointerClick(PointerButton::Left)]),
    };
    Ok((0..clicks.unsigned_abs())
        .flat_map(|_| [Primitive::key_down(key), Primitive::key_up(key)])
        .collect())
}

fn resolve(key: &str) -> Result<KeyCode, CommandError> {
    lookup_key(key).ok_or_else(|| CommandError::UnresolvedKey(key.to_string()))
}

fn single_char(s: &str) -> Option<char> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(ch), None) => Some(ch),
        _ => None,
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
