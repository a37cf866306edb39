//! JSON message types for the client-facing WebSocket protocol.
//!
//! # Requests
//!
//! ```json
//! {"command":"hotkey","args":{"keys":["ctrl","shift","t"]}}
//! {"command":"move","args":{"x":10,"y":-5}}
//! {"command":"type","text":"Hi!"}
//! ```
//!
//! Arguments normally live under `"args"`.  Simple clients may also put them
//! at the top level of the request; when a key appears in both places the
//! value under `"args"` wins.
//!
//! # Responses
//!
//! ```json
//! {"status":"success","message":"Key down: ctrl","command":"keydown","key":"ctrl"}
//! {"status":"error","message":"Unknown command: jump","command":"jump"}
//! ```
//!
//! Exactly one response is sent per request.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::error::CommandError;

// ── Requests ──────────────────────────────────────────────────────────────────

/// A decoded request whose arguments have not been validated yet.
///
/// Splitting decoding from argument validation lets the dispatcher echo the
/// command name even when the arguments turn out to be unusable.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    /// The `"command"` field, if present.
    pub command: Option<String>,
    raw_args: Map<String, Value>,
}

impl Request {
    /// Decodes one inbound text frame.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError::MalformedRequest`] if the text is not JSON, is
    /// not a JSON object, or has an `"args"` value that is neither an object
    /// nor `null`.  A non-string `"command"` is kept as its JSON text.
    pub fn from_json(raw: &str) -> Result<Self, CommandError> {
        let value: Value =
            serde_json::from_str(raw).map_err(|e| CommandError::MalformedRequest(e.to_string()))?;

        let Value::Object(mut object) = value else {
            return Err(CommandError::MalformedRequest(
                "expected a JSON object".to_string(),
            ));
        };

        let command = match object.remove("command") {
            None | Some(Value::Null) => None,
            Some(Value::String(name)) => Some(name),
            // Echoed back as JSON text; no command has such a name.
            Some(other) => Some(other.to_string()),
        };

        let nested = match object.remove("args") {
            None | Some(Value::Null) => Map::new(),
            Some(Value::Object(map)) => map,
            Some(other) => {
                return Err(CommandError::MalformedRequest(format!(
                    "\"args\" must be an object, got {other}"
                )))
            }
        };

        // Top-level fields first, then `args` on top so nested values win.
        let mut raw_args = object;
        raw_args.extend(nested);

        Ok(Self { command, raw_args })
    }

    /// Validates the argument map into [`CommandArgs`].
    ///
    /// Unrecognised keys are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError::InvalidArgument`] if a recognised key holds a
    /// value of the wrong type (e.g. `"x": "ten"`).
    pub fn args(&self) -> Result<CommandArgs, CommandError> {
        serde_json::from_value(Value::Object(self.raw_args.clone())).map_err(|e| {
            CommandError::InvalidArgument {
                command: self.command.clone().unwrap_or_default(),
                reason: e.to_string(),
            }
        })
    }
}

/// All argument keys any command accepts.  Every field is optional here;
/// per-command requirements are checked when the command is built.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommandArgs {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keys: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub button: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clicks: Option<i32>,
    /// Command line for `exec`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
}

// ── Responses ─────────────────────────────────────────────────────────────────

/// Outcome of one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Error,
}

/// The reply sent for every request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    pub status: Status,
    pub message: String,
    /// The command name exactly as received; `null` when the request had none.
    pub command: Option<String>,
    /// Command-specific fields such as `"key"`.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Response {
    pub fn success(command: Option<String>, message: impl Into<String>) -> Self {
        Self {
            status: Status::Success,
            message: message.into(),
            command,
            extra: Map::new(),
        }
    }

    pub fn error(command: Option<String>, message: impl Into<String>) -> Self {
        Self {
            status: Status::Error,
            message: message.into(),
            command,
            extra: Map::new(),
        }
    }

    /// Adds an extra field to the response.
    pub fn with_field(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.extra.insert(name.to_string(), value.into());
        self
    }

    pub fn is_success(&self) -> bool {
        self.status == Status::Success
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
