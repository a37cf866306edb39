//! Infrastructure layer for relay-server.
//!
//! Everything that touches the outside world lives here.
//!
//! # Responsibilities
//!
//! - Binding the WebSocket listener and running per-session tasks
//! - Launching `ydotool` and `exec` processes
//! - Reading the TOML config file
//!
//! # What does NOT belong here?
//!
//! - Command parsing and translation (that is `relay-core`)
//! - Response wording (that is the application layer)

pub mod config_file;
pub mod injection;
pub mod ws_server;

pub use config_file::load_config;
pub use injection::{MockInjectionGateway, YdotoolGateway};
pub use ws_server::{run_server, RelayServer};
