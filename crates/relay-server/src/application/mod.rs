//! Application layer for relay-server.
//!
//! Knows *what* to do with a request: parse it, translate it with
//! `relay-core`, run the resulting primitives through an
//! [`InjectionGateway`], and word the response.  It does not know how
//! primitives reach the host.
//!
//! # What does NOT belong here?
//!
//! - Sockets and WebSocket framing (infrastructure)
//! - Process spawning (infrastructure)

pub mod dispatcher;
pub mod injection;

pub use dispatcher::Dispatcher;
pub use injection::InjectionGateway;
