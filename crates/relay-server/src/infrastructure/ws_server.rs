//! WebSocket server: accept loop and per-session task management.
//!
//! This module is responsible for:
//!
//! 1. Binding a TCP listener on the configured address.
//! 2. Upgrading each accepted connection to a WebSocket session.
//! 3. Feeding every text frame of a session to the [`Dispatcher`] and
//!    writing exactly one JSON response frame back per request.
//! 4. Stopping the accept loop when the `running` flag is cleared.
//!
//! # Ordering
//!
//! Within one session, requests are handled strictly one at a time: the next
//! frame is not read until the previous response has been sent.  Responses
//! therefore arrive in request order and the injected events of two requests
//! on the same connection never interleave.  Separate sessions run in
//! separate Tokio tasks and are not ordered relative to each other.
//!
//! # Failure isolation
//!
//! A malformed or failing request produces an error response; it never
//! closes the session.  A session that errors or disconnects never affects
//! the accept loop or other sessions.

use std::io;
use std::net::SocketAddr;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};
use std::time::Duration;

use anyhow::Context;
use futures_util::{SinkExt, StreamExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::time::timeout;
use tokio_tungstenite::{
    accept_async,
    tungstenite::{Error as WsError, Message as WsMessage},
};
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::application::{Dispatcher, InjectionGateway};
use crate::domain::RelayConfig;

/// How long a single `accept()` may block before the shutdown flag is
/// checked again.
const ACCEPT_POLL_INTERVAL: Duration = Duration::from_millis(200);

// ── Public API ────────────────────────────────────────────────────────────────

/// A bound relay listener, ready to accept sessions.
///
/// Binding and running are separate steps so callers (and tests) can bind
/// port `0` and read back the real port with [`RelayServer::local_addr`].
pub struct RelayServer {
    listener: TcpListener,
    dispatcher: Arc<Dispatcher>,
}

impl RelayServer {
    /// Binds the WebSocket listener on `addr`.
    ///
    /// # Errors
    ///
    /// Returns an error if the address is in use or the process lacks
    /// permission to bind it.
    pub async fn bind(addr: SocketAddr, dispatcher: Dispatcher) -> anyhow::Result<Self> {
        let listener = TcpListener::bind(addr)
            .await
            .with_context(|| format!("failed to bind WebSocket listener on {addr}"))?;
        Ok(Self {
            listener,
            dispatcher: Arc::new(dispatcher),
        })
    }

    /// The address the listener is actually bound to.
    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Accepts sessions until `running` is set to `false`.
    ///
    /// Sessions already in progress keep running on their own tasks after
    /// the accept loop stops.
    pub async fn run(self, running: Arc<AtomicBool>) -> anyhow::Result<()> {
        if let Ok(addr) = self.local_addr() {
            info!("input relay listening on ws://{addr}");
        }

        loop {
            if !running.load(Ordering::Relaxed) {
                info!("shutdown flag set; stopping accept loop");
                break;
            }

            match timeout(ACCEPT_POLL_INTERVAL, self.listener.accept()).await {
                Ok(Ok((stream, peer_addr))) => {
                    let dispatcher = Arc::clone(&self.dispatcher);
                    tokio::spawn(async move {
                        handle_connection(stream, peer_addr, dispatcher).await;
                    });
                }
                Ok(Err(e)) => {
                    // Transient (e.g. EMFILE); keep serving.
                    error!("accept error: {e}");
                }
                Err(_) => {
                    // Timeout: loop back and re-check the flag.
                }
            }
        }

        Ok(())
    }
}

/// Binds `config.bind_addr` and serves until `running` is cleared.
///
/// # Errors
///
/// Returns an error if the listener cannot be bound.
pub async fn run_server(
    config: RelayConfig,
    gateway: Arc<dyn InjectionGateway>,
    running: Arc<AtomicBool>,
) -> anyhow::Result<()> {
    let server = RelayServer::bind(config.bind_addr, Dispatcher::new(gateway)).await?;
    server.run(running).await
}

// ── Per-session handler ───────────────────────────────────────────────────────

/// Entry point of each per-session task; logs how the session ended.
async fn handle_connection(stream: TcpStream, peer_addr: SocketAddr, dispatcher: Arc<Dispatcher>) {
    let session_id = Uuid::new_v4();
    info!("session {session_id}: connection from {peer_addr}");

    match run_session(stream, peer_addr, session_id, dispatcher).await {
        Ok(()) => info!("session {session_id}: closed"),
        Err(e) => warn!("session {session_id}: closed with error: {e:#}"),
    }
}

/// Runs one WebSocket session: handshake, then a strict
/// read → dispatch → reply loop until the client goes away.
async fn run_session(
    stream: TcpStream,
    peer_addr: SocketAddr,
    session_id: Uuid,
    dispatcher: Arc<Dispatcher>,
) -> anyhow::Result<()> {
    let ws_stream = accept_async(stream)
        .await
        .with_context(|| format!("WebSocket handshake failed with {peer_addr}"))?;

    let (mut ws_tx, mut ws_rx) = ws_stream.split();

    loop {
        let frame = match ws_rx.next().await {
            Some(Ok(frame)) => frame,
            Some(Err(WsError::ConnectionClosed | WsError::Protocol(_))) => {
                debug!("session {session_id}: connection closed");
                break;
            }
            Some(Err(e)) => {
                return Err(e).context("WebSocket read failed");
            }
            None => {
                debug!("session {session_id}: stream ended");
                break;
            }
        };

        match frame {
            WsMessage::Text(text) => {
                let response = dispatcher.dispatch(&text).await;

                let json = match serde_json::to_string(&response) {
                    Ok(json) => json,
                    Err(e) => {
                        error!("session {session_id}: failed to serialize response: {e}");
                        continue;
                    }
                };

                if let Err(e) = ws_tx.send(WsMessage::Text(json)).await {
                    debug!("session {session_id}: send failed (client disconnected): {e}");
                    break;
                }
            }
            WsMessage::Binary(data) => {
                warn!(
                    "session {session_id}: unexpected binary frame ({} bytes, ignored)",
                    data.len()
                );
            }
            WsMessage::Ping(data) => {
                // tungstenite queues the Pong reply itself.
                debug!("session {session_id}: ping ({} bytes)", data.len());
            }
            WsMessage::Pong(_) => {
                debug!("session {session_id}: pong");
            }
            WsMessage::Close(_) => {
                debug!("session {session_id}: close frame received");
                break;
            }
            WsMessage::Frame(_) => {
                debug!("session {session_id}: raw frame (ignored)");
            }
        }
    }

    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::injection::MockInjectionGateway;
    use relay_core::HostPlatform;

    fn dispatcher() -> Dispatcher {
        Dispatcher::with_host(Arc::new(MockInjectionGateway::new()), HostPlatform::Posix)
    }

    #[tokio::test]
    async fn test_bind_port_zero_reports_real_port() {
        // Arrange / Act
        let server = RelayServer::bind("127.0.0.1:0".parse().unwrap(), dispatcher())
            .await
            .unwrap();

        // Assert
        assert_ne!(server.local_addr().unwrap().port(), 0);
    }

    #[tokio::test]
    async fn test_bind_in_use_address_fails() {
        let first = RelayServer::bind("127.0.0.1:0".parse().unwrap(), dispatcher())
            .await
            .unwrap();
        let addr = first.local_addr().unwrap();

        let second = RelayServer::bind(addr, dispatcher()).await;

        assert!(second.is_err());
    }

    #[tokio::test]
    async fn test_run_returns_when_flag_cleared() {
        // Arrange: flag already cleared before the loop starts
        let server = RelayServer::bind("127.0.0.1:0".parse().unwrap(), dispatcher())
            .await
            .unwrap();
        let running = Arc::new(AtomicBool::new(false));

        // Act
        let result = timeout(Duration::from_secs(2), server.run(running)).await;

        // Assert
        assert!(matches!(result, Ok(Ok(()))));
    }
}
