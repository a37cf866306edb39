//! End-to-end tests for WebSocket sessions.
//!
//! A real [`RelayServer`] is bound on `127.0.0.1:0` and driven through a real
//! `tokio-tungstenite` client.  Injection goes to a [`MockInjectionGateway`],
//! so nothing touches the machine running the tests.
//!
//! Verified here:
//!
//! - every text frame gets exactly one response frame, in request order;
//! - bad requests produce error responses and the session stays open;
//! - primitives reach the gateway in the order the commands were sent;
//! - independent sessions are served concurrently;
//! - a client vanishing without a Close frame ends only its own session.

use std::sync::{atomic::AtomicBool, Arc};
use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use relay_core::{HostPlatform, KeyCode, Primitive};
use relay_server::application::Dispatcher;
use relay_server::infrastructure::{MockInjectionGateway, RelayServer};
use serde_json::Value;
use tokio::net::TcpStream;
use tokio::time::timeout;
use tokio_tungstenite::{
    connect_async, tungstenite::Message as WsMessage, MaybeTlsStream, WebSocketStream,
};

type Client = WebSocketStream<MaybeTlsStream<TcpStream>>;

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Starts a server backed by `gateway` and returns its `ws://` URL.
async fn start_server(gateway: Arc<MockInjectionGateway>) -> String {
    let dispatcher = Dispatcher::with_host(gateway, HostPlatform::Posix);
    let server = RelayServer::bind("127.0.0.1:0".parse().unwrap(), dispatcher)
        .await
        .unwrap();
    let addr = server.local_addr().unwrap();
    tokio::spawn(server.run(Arc::new(AtomicBool::new(true))));
    format!("ws://{addr}")
}

async fn connect(url: &str) -> Client {
    let (client, _) = connect_async(url).await.unwrap();
    client
}

/// Sends one text frame and waits for the next text frame in reply.
async fn round_trip(client: &mut Client, request: &str) -> Value {
    client
        .send(WsMessage::Text(request.to_string()))
        .await
        .unwrap();
    loop {
        let frame = timeout(Duration::from_secs(5), client.next())
            .await
            .expect("timed out waiting for a response")
            .expect("connection closed")
            .unwrap();
        if let WsMessage::Text(text) = frame {
            return serde_json::from_str(&text).unwrap();
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_type_command_round_trip() {
    // Arrange
    let gateway = Arc::new(MockInjectionGateway::new());
    let url = start_server(Arc::clone(&gateway)).await;
    let mut client = connect(&url).await;

    // Act
    let response = round_trip(&mut client, r#"{"command":"type","text":"Hi!"}"#).await;

    // Assert
    assert_eq!(response["status"], "success");
    assert_eq!(response["command"], "type");
    assert_eq!(response["message"], "Typed text: 'Hi!'");
    assert_eq!(
        gateway.recorded(),
        vec![Primitive::Type('H'), Primitive::Type('i'), Primitive::Type('!')]
    );
}

#[tokio::test]
async fn test_session_survives_bad_requests() {
    // Arrange
    let gateway = Arc::new(MockInjectionGateway::new());
    let url = start_server(Arc::clone(&gateway)).await;
    let mut client = connect(&url).await;

    // Act: malformed JSON, unknown command, missing argument, then a valid one
    let malformed = round_trip(&mut client, "{not json").await;
    let unknown = round_trip(&mut client, r#"{"command":"dance"}"#).await;
    let missing = round_trip(&mut client, r#"{"command":"press","args":{}}"#).await;
    let valid = round_trip(&mut client, r#"{"command":"press","args":{"key":"enter"}}"#).await;

    // Assert
    assert_eq!(malformed["status"], "error");
    assert!(malformed["message"]
        .as_str()
        .unwrap()
        .starts_with("Invalid JSON format"));

    assert_eq!(unknown["status"], "error");
    assert_eq!(unknown["message"], "Unknown command: dance");
    assert_eq!(unknown["command"], "dance");

    assert_eq!(missing["status"], "error");
    assert_eq!(missing["message"], "Key not specified for 'press' command.");

    assert_eq!(valid["status"], "success");
    assert_eq!(valid["key"], "enter");
    assert_eq!(gateway.recorded().len(), 2);
}

#[tokio::test]
async fn test_responses_follow_request_order() {
    let gateway = Arc::new(MockInjectionGateway::new());
    let url = start_server(Arc::clone(&gateway)).await;
    let mut client = connect(&url).await;

    let requests = [
        r#"{"command":"keydown","args":{"key":"ctrl"}}"#,
        r#"{"command":"move","args":{"x":10,"y":-5}}"#,
        r#"{"command":"click","args":{"button":"right"}}"#,
        r#"{"command":"keyup","args":{"key":"ctrl"}}"#,
    ];
    for request in requests {
        client
            .send(WsMessage::Text(request.to_string()))
            .await
            .unwrap();
    }

    let mut commands = Vec::new();
    while commands.len() < requests.len() {
        let frame = timeout(Duration::from_secs(5), client.next())
            .await
            .unwrap()
            .unwrap()
            .unwrap();
        if let WsMessage::Text(text) = frame {
            let response: Value = serde_json::from_str(&text).unwrap();
            assert_eq!(response["status"], "success");
            commands.push(response["command"].as_str().unwrap().to_string());
        }
    }

    assert_eq!(commands, ["keydown", "move", "click", "keyup"]);
    assert_eq!(
        gateway.recorded(),
        vec![
            Primitive::key_down(KeyCode::LEFT_CTRL),
            Primitive::PointerMove { dx: 10, dy: -5 },
            Primitive::PointerClick(relay_core::domain::PointerButton::Right),
            Primitive::key_up(KeyCode::LEFT_CTRL),
        ]
    );
}

#[tokio::test]
async fn test_injection_failure_is_reported_not_fatal() {
    // Arrange: every injection fails
    let gateway = Arc::new(MockInjectionGateway::failing());
    let url = start_server(gateway).await;
    let mut client = connect(&url).await;

    // Act
    let first = round_trip(&mut client, r#"{"command":"press","args":{"key":"a"}}"#).await;
    let second = round_trip(&mut client, r#"{"command":"scroll","args":{"clicks":2}}"#).await;

    // Assert
    assert_eq!(first["status"], "error");
    assert_eq!(second["status"], "error");
    assert_eq!(second["command"], "scroll");
}

#[tokio::test]
async fn test_two_sessions_are_independent() {
    let gateway = Arc::new(MockInjectionGateway::new());
    let url = start_server(Arc::clone(&gateway)).await;
    let mut alice = connect(&url).await;
    let mut bob = connect(&url).await;

    // Closing one session must not affect the other.
    alice.close(None).await.unwrap();
    let response = round_trip(&mut bob, r#"{"command":"hotkey","args":{"keys":["ctrl","c"]}}"#).await;

    assert_eq!(response["status"], "success");
    assert_eq!(response["message"], "Pressed hotkey combination: ctrl+c");
    assert_eq!(response["keys"], serde_json::json!(["ctrl", "c"]));
}

#[tokio::test]
async fn test_binary_frames_get_no_response() {
    let gateway = Arc::new(MockInjectionGateway::new());
    let url = start_server(Arc::clone(&gateway)).await;
    let mut client = connect(&url).await;

    client
        .send(WsMessage::Binary(vec![1, 2, 3]))
        .await
        .unwrap();
    let response = round_trip(&mut client, r#"{"command":"click"}"#).await;

    // The first text reply belongs to the click, not the binary frame.
    assert_eq!(response["command"], "click");
    assert_eq!(response["message"], "Clicked with button 'left'");
}

#[tokio::test]
async fn test_abrupt_disconnect_leaves_server_serving() {
    // Arrange: one session that stays, one that vanishes mid-request
    let gateway = Arc::new(MockInjectionGateway::new());
    let url = start_server(Arc::clone(&gateway)).await;
    let mut bystander = connect(&url).await;
    let mut vanishing = connect(&url).await;

    // Act: send a request, then drop the socket without a Close frame
    vanishing
        .send(WsMessage::Text(
            r#"{"command":"press","args":{"key":"a"}}"#.to_string(),
        ))
        .await
        .unwrap();
    drop(vanishing);

    // A bare TCP connection that never finishes the handshake.
    let addr = url.trim_start_matches("ws://");
    drop(TcpStream::connect(addr).await.unwrap());

    tokio::time::sleep(Duration::from_millis(100)).await;

    // Assert: the existing session and a new one are both served
    let response = round_trip(&mut bystander, r#"{"command":"click"}"#).await;
    assert_eq!(response["status"], "success");

    let mut late = connect(&url).await;
    let response = round_trip(&mut late, r#"{"command":"move","args":{"x":1,"y":1}}"#).await;
    assert_eq!(response["status"], "success");
    assert_eq!(response["message"], "Moved mouse by (1, 1)");
}
