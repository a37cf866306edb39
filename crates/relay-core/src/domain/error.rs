//! Error types for command handling and injection.
//!
//! Every variant is recoverable: the dispatcher turns each one into an error
//! response and keeps the connection open.

use thiserror::Error;

/// Why a command could not be completed.
#[derive(Debug, Error)]
pub enum CommandError {
    /// The inbound message was not a JSON object.
    #[error("Invalid JSON format: {0}")]
    MalformedRequest(String),

    /// The command name is not one the relay understands.
    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    /// A required argument was absent or empty.
    #[error("{argument} not specified for '{command}' command.")]
    MissingArgument {
        command: String,
        argument: &'static str,
    },

    /// An argument was present but had the wrong JSON type or range.
    #[error("Invalid arguments for '{command}' command: {reason}")]
    InvalidArgument { command: String, reason: String },

    /// A key name is in neither the key table nor the escape table.
    #[error("Key not found: '{0}'")]
    UnresolvedKey(String),

    /// The command needs a POSIX host.
    #[error("Command '{0}' is only supported on Linux/macOS.")]
    UnsupportedPlatform(&'static str),

    /// The injection backend rejected a primitive.
    #[error(transparent)]
    Injection(#[from] InjectionError),
}

/// Failure reported by an injection backend.
#[derive(Debug, Error)]
pub enum InjectionError {
    /// The backend executable is not installed or not on `PATH`.
    #[error("{program} is not installed or not in PATH")]
    ToolNotFound { program: String },

    /// The backend process could not be started.
    #[error("failed to launch {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The backend ran but exited unsuccessfully.
    #[error("{program} exited with {status}: {stderr}")]
    CommandFailed {
        program: String,
        status: String,
        stderr: String,
    },

    /// Any other backend failure.
    #[error("platform error: {0}")]
    Platform(String),
}
