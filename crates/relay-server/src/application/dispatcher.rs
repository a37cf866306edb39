//! Command dispatcher: one inbound frame in, one [`Response`] out.
//!
//! ```text
//! raw JSON ─► Request ─► Command ─► Vec<Primitive> ─► gateway (in order) ─► Response
//! ```
//!
//! Every failure along the way becomes an error response; nothing here
//! returns `Err` to the connection loop.

use std::sync::Arc;

use relay_core::{
    build_sequence, Command, CommandError, CommandKind, HostPlatform, InjectionError, Primitive,
    Request, Response,
};
use tracing::{debug, warn};

use crate::application::injection::InjectionGateway;

/// Routes decoded commands to the sequence builder and the gateway.
pub struct Dispatcher {
    gateway: Arc<dyn InjectionGateway>,
    host: HostPlatform,
}

impl Dispatcher {
    /// Creates a dispatcher for the platform this binary runs on.
    pub fn new(gateway: Arc<dyn InjectionGateway>) -> Self {
        Self::with_host(gateway, HostPlatform::current())
    }

    /// Creates a dispatcher that behaves as if running on `host`.
    pub fn with_host(gateway: Arc<dyn InjectionGateway>, host: HostPlatform) -> Self {
        Self { gateway, host }
    }

    /// Handles one inbound text frame.
    ///
    /// The returned response's `command` field is the name exactly as the
    /// client sent it, or `None` when the frame could not be decoded.
    pub async fn dispatch(&self, raw: &str) -> Response {
        let request = match Request::from_json(raw) {
            Ok(request) => request,
            Err(e) => {
                warn!("rejecting malformed request: {e}");
                return Response::error(None, e.to_string());
            }
        };

        let name = request.command.clone();
        match self.handle(&request).await {
            Ok(response) => response,
            Err(e) => {
                warn!(command = name.as_deref().unwrap_or("null"), "command failed: {e}");
                Response::error(name, e.to_string())
            }
        }
    }

    async fn handle(&self, request: &Request) -> Result<Response, CommandError> {
        let name = request.command.as_deref().unwrap_or("null");
        let kind = CommandKind::from_name(name)
            .ok_or_else(|| CommandError::UnknownCommand(name.to_string()))?;
        let command = Command::from_named_args(kind, name, request.args()?)?;

        debug!(command = name, "dispatching");

        let sequence = build_sequence(&command, self.host)?;
        self.execute(&sequence).await?;

        Ok(success_response(&command, request.command.clone()))
    }

    /// Executes `sequence` front to back, stopping at the first failure.
    ///
    /// # Errors
    ///
    /// Returns the first [`InjectionError`]; later primitives are not
    /// attempted.
    pub async fn execute(&self, sequence: &[Primitive]) -> Result<(), InjectionError> {
        for (index, primitive) in sequence.iter().enumerate() {
            if let Err(e) = self.gateway.inject(primitive).await {
                debug!(
                    mode = %primitive.mode(),
                    index,
                    total = sequence.len(),
                    "primitive failed; abandoning the rest of the sequence"
                );
                return Err(e);
            }
        }
        Ok(())
    }
}

/// Builds the success response for a completed command.
fn success_response(command: &Command, name: Option<String>) -> Response {
    match command {
        Command::Type { text } => Response::success(name, format!("Typed text: '{text}'")),
        Command::Press { key } => {
            Response::success(name, format!("Pressed key: {key}")).with_field("key", key.as_str())
        }
        Command::Hotkey { keys } => Response::success(
            name,
            format!("Pressed hotkey combination: {}", keys.join("+")),
        )
        .with_field("keys", keys.clone()),
        Command::KeyDown { key } => {
            Response::success(name, format!("Key down: {key}")).with_field("key", key.as_str())
        }
        Command::KeyUp { key } => {
            Response::success(name, format!("Key up: {key}")).with_field("key", key.as_str())
        }
        Command::Move { x, y } => Response::success(name, format!("Moved mouse by ({x}, {y})")),
        Command::Click { button } => Response::success(
            name,
            format!("Clicked with button '{}'", button.name()),
        ),
        Command::Scroll { clicks } => {
            Response::success(name, format!("Scrolled by {clicks} clicks"))
        }
        Command::HScroll { clicks } => {
            Response::success(name, format!("Scrolled horizontally by {clicks} clicks"))
        }
        Command::Exec { command_line } => {
            Response::success(name, format!("Executed command: {command_line}"))
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
