//! Domain layer for relay-server.
//!
//! Plain configuration types with no I/O.  Loading them from disk happens in
//! the infrastructure layer.

pub mod config;

pub use config::{ConfigError, ExecConfig, RelayConfig, YdotoolConfig, DEFAULT_PORT};
