//! Loading [`RelayConfig`] from a TOML file on disk.
//!
//! Only used when `--config` (or `RELAY_CONFIG`) is given.  A path the
//! operator names explicitly must exist, so "not found" is an error here.

use std::path::Path;

use crate::domain::{ConfigError, RelayConfig};

/// Reads and parses the config file at `path`.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] if the file cannot be read and
/// [`ConfigError::Parse`] if the TOML is malformed.
pub fn load_config(path: &Path) -> Result<RelayConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let config = RelayConfig::from_toml_str(&content)?;
    tracing::debug!("loaded config from {}", path.display());
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use uuid::Uuid;

    fn temp_file(content: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("relay_test_{}", Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("relay.toml");
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_load_config_reads_file() {
        // Arrange
        let path = temp_file(
            r#"
            bind_addr = "127.0.0.1:9000"

            [ydotool]
            socket = "/tmp/.ydotool_socket"
            "#,
        );

        // Act
        let cfg = load_config(&path).unwrap();

        // Assert
        assert_eq!(cfg.bind_addr.to_string(), "127.0.0.1:9000");
        assert_eq!(
            cfg.ydotool.socket.as_deref(),
            Some(Path::new("/tmp/.ydotool_socket"))
        );
        assert_eq!(cfg.exec.display, ":0");
    }

    #[test]
    fn test_load_config_missing_file_is_io_error() {
        let path = PathBuf::from("/nonexistent/path/that/cannot/exist/relay.toml");
        let err = load_config(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_load_config_malformed_toml_is_parse_error() {
        let path = temp_file("[[[ not valid toml");
        let err = load_config(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
