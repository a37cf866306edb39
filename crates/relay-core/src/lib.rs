//! # relay-core
//!
//! Shared library for the input relay: key tables, the JSON wire messages,
//! and the translation from client commands to primitive input events.
//!
//! It has no dependencies on OS input APIs, sockets, or async runtimes.
//!
//! # Architecture overview
//!
//! A remote client (a phone or browser UI) sends commands such as
//! "press ctrl+shift+t" or "scroll 3 clicks".  The relay turns each command
//! into an ordered list of [`Primitive`]s (key down/up, typed character,
//! pointer motion, click, process launch) that an injection backend replays
//! on the host.
//!
//! - **`keymap`** – key name → evdev code table and the escape table for
//!   shifted symbols.
//! - **`protocol`** – request/response JSON types.
//! - **`domain`** – the [`Command`] model, errors, primitives and the
//!   sequence builder.

pub mod domain;
pub mod keymap;
pub mod protocol;

pub use domain::{
    build_sequence, Command, CommandError, CommandKind, HostPlatform, InjectionError, Primitive,
    MAX_SCROLL_CLICKS,
};
pub use keymap::{lookup_escape, lookup_key, CharacterEscape, KeyCode};
pub use protocol::{CommandArgs, Request, Response, Status};
