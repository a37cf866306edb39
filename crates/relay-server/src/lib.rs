//! relay-server library crate.
//!
//! Accepts JSON commands over WebSocket and injects them into the host as
//! keyboard and mouse events through `ydotool`.
//!
//! # Architecture (clean architecture)
//!
//! ```text
//! Phone / browser (JSON over WebSocket)
//!         ↕
//! [relay-server]
//!   ├── domain/           RelayConfig and its defaults
//!   ├── application/      Dispatcher, InjectionGateway port
//!   └── infrastructure/
//!         ├── ws_server/  WebSocket accept loop (tokio-tungstenite)
//!         ├── injection/  ydotool adapter, recording mock
//!         └── config_file/ TOML loader
//!         ↓
//! ydotool → ydotoold → uinput
//! ```
//!
//! # Layer rules
//!
//! - `domain` has no I/O.
//! - `application` depends on `domain` and `relay-core` only.
//! - `infrastructure` depends on all other layers plus `tokio` and `tungstenite`.

/// Domain layer: configuration types (no I/O).
pub mod domain;

/// Application layer: request dispatch.
pub mod application;

/// Infrastructure layer: WebSocket server, injection adapters, config file.
pub mod infrastructure;
