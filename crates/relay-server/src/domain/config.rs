//! Relay configuration types.
//!
//! [`RelayConfig`] is the single source of truth for all runtime settings.
//! It is assembled at startup from, lowest precedence first: built-in
//! defaults, an optional TOML file, and CLI flags / environment variables.
//!
//! # TOML layout
//!
//! ```toml
//! bind_addr = "0.0.0.0:8765"
//!
//! [ydotool]
//! program = "ydotool"
//! socket = "/run/user/1000/.ydotool_socket"
//!
//! [exec]
//! shell = "/bin/sh"
//! display = ":0"
//! terminal = "xterm"
//! ```
//!
//! Every field is optional; missing fields take their default.

use std::net::{Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default WebSocket port.
pub const DEFAULT_PORT: u16 = 8765;

/// Error type for configuration parsing and loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("I/O error reading config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TOML content could not be parsed.
    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),
}

/// All runtime configuration for the relay.
///
/// Build this once at startup and share it read-only.
///
/// # Example
///
/// ```rust
/// use relay_server::domain::RelayConfig;
///
/// let cfg = RelayConfig::default();
/// assert_eq!(cfg.bind_addr.port(), 8765);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RelayConfig {
    /// Address the WebSocket server binds to.
    ///
    /// `0.0.0.0` accepts connections from any interface.  The relay has no
    /// authentication, so bind to `127.0.0.1` or a trusted LAN address.
    pub bind_addr: SocketAddr,

    /// How to invoke `ydotool`.
    pub ydotool: YdotoolConfig,

    /// How `exec` commands are launched.
    pub exec: ExecConfig,
}

impl Default for RelayConfig {
    /// | Field            | Default          |
    /// |------------------|------------------|
    /// | bind_addr        | `0.0.0.0:8765`   |
    /// | ydotool.program  | `ydotool`        |
    /// | ydotool.socket   | unset            |
    /// | exec.shell       | `/bin/sh`        |
    /// | exec.display     | `:0`             |
    /// | exec.terminal    | unset            |
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from((Ipv4Addr::UNSPECIFIED, DEFAULT_PORT)),
            ydotool: YdotoolConfig::default(),
            exec: ExecConfig::default(),
        }
    }
}

impl RelayConfig {
    /// Parses a TOML document, filling missing fields with defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] if the document is not valid TOML or a
    /// field has the wrong type.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }
}

/// Settings for the `ydotool` client binary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct YdotoolConfig {
    /// Program name or path.
    pub program: String,

    /// `ydotoold` socket path, exported as `YDOTOOL_SOCKET` when set.
    pub socket: Option<PathBuf>,
}

impl Default for YdotoolConfig {
    fn default() -> Self {
        Self {
            program: "ydotool".to_string(),
            socket: None,
        }
    }
}

/// Settings for `exec` commands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExecConfig {
    /// Shell that interprets the command line (`<shell> -c <line>`).
    pub shell: String,

    /// Value of `DISPLAY` in the launched process.
    pub display: String,

    /// Terminal emulator to open the command in (`<terminal> -e ...`).
    /// When unset the command runs without a terminal window.
    pub terminal: Option<String>,
}

impl Default for ExecConfig {
    fn default() -> Self {
        Self {
            shell: "/bin/sh".to_string(),
            display: ":0".to_string(),
            terminal: None,
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_port_is_8765() {
        // Arrange / Act
        let cfg = RelayConfig::default();
        // Assert
        assert_eq!(cfg.bind_addr.port(), 8765);
    }

    #[test]
    fn test_default_binds_all_interfaces() {
        let cfg = RelayConfig::default();
        assert_eq!(cfg.bind_addr.ip().to_string(), "0.0.0.0");
    }

    #[test]
    fn test_default_exec_settings() {
        let cfg = RelayConfig::default();
        assert_eq!(cfg.exec.shell, "/bin/sh");
        assert_eq!(cfg.exec.display, ":0");
        assert!(cfg.exec.terminal.is_none());
    }

    #[test]
    fn test_empty_toml_yields_defaults() {
        let cfg = RelayConfig::from_toml_str("").unwrap();
        assert_eq!(cfg, RelayConfig::default());
    }

    #[test]
    fn test_partial_toml_keeps_other_defaults() {
        // Arrange: only override the terminal
        let text = r#"
            [exec]
            terminal = "xterm"
        "#;

        // Act
        let cfg = RelayConfig::from_toml_str(text).unwrap();

        // Assert
        assert_eq!(cfg.exec.terminal.as_deref(), Some("xterm"));
        assert_eq!(cfg.exec.shell, "/bin/sh");
        assert_eq!(cfg.ydotool.program, "ydotool");
        assert_eq!(cfg.bind_addr.port(), DEFAULT_PORT);
    }

    #[test]
    fn test_full_toml() {
        let text = r#"
            bind_addr = "127.0.0.1:9000"

            [ydotool]
            program = "/usr/local/bin/ydotool"
            socket = "/tmp/.ydotool_socket"

            [exec]
            shell = "/bin/bash"
            display = ":1"
        "#;
        let cfg = RelayConfig::from_toml_str(text).unwrap();
        assert_eq!(cfg.bind_addr.to_string(), "127.0.0.1:9000");
        assert_eq!(cfg.ydotool.program, "/usr/local/bin/ydotool");
        assert_eq!(
            cfg.ydotool.socket,
            Some(PathBuf::from("/tmp/.ydotool_socket"))
        );
        assert_eq!(cfg.exec.shell, "/bin/bash");
        assert_eq!(cfg.exec.display, ":1");
    }

    #[test]
    fn test_invalid_bind_addr_is_parse_error() {
        let err = RelayConfig::from_toml_str(r#"bind_addr = "not-an-address""#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_config_round_trips_through_toml() {
        let cfg = RelayConfig::default();
        let text = toml::to_string(&cfg).unwrap();
        assert_eq!(RelayConfig::from_toml_str(&text).unwrap(), cfg);
    }
}
