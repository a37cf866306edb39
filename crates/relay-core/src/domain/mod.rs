//! Command model and translation logic.
//!
//! Everything here is pure: no I/O, no async, no process spawning.  The
//! server crate feeds these types to an injection backend.

pub mod command;
pub mod error;
pub mod primitive;
pub mod sequence;

pub use command::{Command, CommandKind, MAX_SCROLL_CLICKS};
pub use error::{CommandError, InjectionError};
pub use primitive::{InjectionMode, KeyDirection, KeyTransition, PointerButton, Primitive};
pub use sequence::{build_sequence, HostPlatform};
