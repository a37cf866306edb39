//! Input relay: entry point.
//!
//! Listens for WebSocket connections from a phone or browser remote and turns
//! each JSON command (type text, press keys, hotkeys, pointer motion, clicks,
//! scrolling, launching a command) into input events on this machine via
//! `ydotool`.
//!
//! # Usage
//!
//! ```text
//! input-relay [OPTIONS]
//!
//! Options:
//!   --config         <PATH>  TOML config file
//!   --bind           <IP>    Listen address [default: 0.0.0.0]
//!   --port           <PORT>  Listen port [default: 8765]
//!   --ydotool        <PATH>  ydotool client binary [default: ydotool]
//!   --ydotool-socket <PATH>  ydotoold socket
//!   --display        <DISP>  DISPLAY for exec commands [default: :0]
//!   --shell          <PATH>  Shell for exec commands [default: /bin/sh]
//!   --terminal       <PROG>  Open exec commands in this terminal emulator
//! ```
//!
//! # Precedence
//!
//! Built-in defaults, then the `--config` file, then flags and environment
//! variables.  A flag wins over its environment variable.
//!
//! | Variable         | Flag               |
//! |------------------|--------------------|
//! | `RELAY_CONFIG`   | `--config`         |
//! | `RELAY_BIND`     | `--bind`           |
//! | `RELAY_PORT`     | `--port`           |
//! | `RELAY_YDOTOOL`  | `--ydotool`        |
//! | `YDOTOOL_SOCKET` | `--ydotool-socket` |
//! | `RELAY_DISPLAY`  | `--display`        |
//! | `RELAY_SHELL`    | `--shell`          |
//! | `RELAY_TERMINAL` | `--terminal`       |
//!
//! Log verbosity follows `RUST_LOG` (default `info`).

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use relay_server::domain::RelayConfig;
use relay_server::infrastructure::{load_config, run_server, YdotoolGateway};

// ── CLI argument definitions ──────────────────────────────────────────────────

/// WebSocket input relay.
///
/// Every option is optional; unset options keep the value from the config
/// file, or the built-in default.
#[derive(Debug, Parser)]
#[command(
    name = "input-relay",
    about = "Drive this machine's keyboard and mouse over WebSocket via ydotool",
    version
)]
struct Cli {
    /// TOML config file.
    #[arg(long, env = "RELAY_CONFIG")]
    config: Option<PathBuf>,

    /// IP address to listen on.
    ///
    /// The relay has no authentication; prefer `127.0.0.1` or a trusted
    /// LAN address over `0.0.0.0`.
    #[arg(long, env = "RELAY_BIND")]
    bind: Option<String>,

    /// TCP port to listen on.
    #[arg(long, env = "RELAY_PORT")]
    port: Option<u16>,

    /// `ydotool` client program.
    #[arg(long, env = "RELAY_YDOTOOL")]
    ydotool: Option<String>,

    /// `ydotoold` socket path.
    #[arg(long, env = "YDOTOOL_SOCKET")]
    ydotool_socket: Option<PathBuf>,

    /// `DISPLAY` value for processes launched by `exec`.
    #[arg(long, env = "RELAY_DISPLAY")]
    display: Option<String>,

    /// Shell used to interpret `exec` command lines.
    #[arg(long, env = "RELAY_SHELL")]
    shell: Option<String>,

    /// Terminal emulator that `exec` commands open in.
    #[arg(long, env = "RELAY_TERMINAL")]
    terminal: Option<String>,
}

impl Cli {
    /// Merges the config file (if any) and the CLI overrides into a
    /// [`RelayConfig`].
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be loaded or `--bind` is
    /// not an IP address.
    fn into_relay_config(self) -> anyhow::Result<RelayConfig> {
        let mut config = match &self.config {
            Some(path) => load_config(path)
                .with_context(|| format!("failed to load config file {}", path.display()))?,
            None => RelayConfig::default(),
        };

        if let Some(bind) = &self.bind {
            let ip: IpAddr = bind
                .parse()
                .with_context(|| format!("invalid bind address: '{bind}'"))?;
            config.bind_addr = SocketAddr::new(ip, config.bind_addr.port());
        }
        if let Some(port) = self.port {
            config.bind_addr.set_port(port);
        }
        if let Some(program) = self.ydotool {
            config.ydotool.program = program;
        }
        if let Some(socket) = self.ydotool_socket {
            config.ydotool.socket = Some(socket);
        }
        if let Some(display) = self.display {
            config.exec.display = display;
        }
        if let Some(shell) = self.shell {
            config.exec.shell = shell;
        }
        if let Some(terminal) = self.terminal {
            config.exec.terminal = Some(terminal);
        }

        Ok(config)
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Cli::parse().into_relay_config()?;

    info!(
        "input relay starting: bind={}, ydotool={}, display={}",
        config.bind_addr, config.ydotool.program, config.exec.display
    );

    let running = Arc::new(AtomicBool::new(true));
    let running_clone = Arc::clone(&running);

    // The accept loop polls this flag every 200 ms.
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("received Ctrl+C, shutting down");
                running_clone.store(false, Ordering::Relaxed);
            }
            Err(e) => {
                tracing::error!("failed to listen for Ctrl+C signal: {e}");
            }
        }
    });

    let gateway = Arc::new(YdotoolGateway::new(
        config.ydotool.clone(),
        config.exec.clone(),
    ));
    run_server(config, gateway, running).await?;

    info!("input relay stopped");
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
