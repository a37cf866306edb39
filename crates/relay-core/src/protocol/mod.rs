//! Client-facing JSON wire protocol.

pub mod messages;

pub use messages::{CommandArgs, Request, Response, Status};
