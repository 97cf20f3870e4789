// SPDX-License-Identifier: MIT

use super::*;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::UnixListener;

fn temp_socket_path(name: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!(
        "cog-debug-listener-test-{name}-{}.sock",
        std::process::id()
    ))
}

#[tokio::test]
async fn bind_removes_a_stale_socket_file() {
    let path = temp_socket_path("stale");
    std::fs::write(&path, b"not a socket").unwrap();
    let listener = bind(&path).unwrap();
    drop(listener);
    let _ = std::fs::remove_file(&path);
}

#[tokio::test]
async fn one_request_gets_one_response_and_a_dashboard_event() {
    let socket_path = temp_socket_path("rpc");
    let dashboard_path = temp_socket_path("dash");
    let _ = std::fs::remove_file(&socket_path);
    let _ = std::fs::remove_file(&dashboard_path);

    // A fake dashboard listening on the emitter's target socket.
    let dashboard_listener = UnixListener::bind(&dashboard_path).unwrap();

    let listener = bind(&socket_path).unwrap();
    let sessions = Arc::new(SessionManager::new());
    let events = EventEmitter::new(dashboard_path.clone());
    events.connect().await;
    let (mut dashboard_stream, _) = dashboard_listener.accept().await.unwrap();

    let sessions_clone = sessions.clone();
    let events_clone = events.clone();
    let server = tokio::spawn(async move {
        let (stream, _addr) = listener.accept().await.unwrap();
        handle_connection(stream, &sessions_clone, &events_clone)
            .await
            .unwrap();
    });

    let mut client = tokio::net::UnixStream::connect(&socket_path).await.unwrap();
    let request = serde_json::json!({"tool": "debug_launch", "args": {"program": "/bin/true"}});
    let mut line = serde_json::to_vec(&request).unwrap();
    line.push(b'\n');
    client.write_all(&line).await.unwrap();

    let mut reader = BufReader::new(client);
    let mut response_line = String::new();
    reader.read_line(&mut response_line).await.unwrap();
    let response: serde_json::Value = serde_json::from_str(&response_line).unwrap();
    assert_eq!(response["ok"], true);
    assert_eq!(response["result"]["session_id"], "session-1");

    server.await.unwrap();
    assert_eq!(sessions.count(), 1);

    let mut dashboard_reader = BufReader::new(&mut dashboard_stream);
    let mut first_event = String::new();
    dashboard_reader.read_line(&mut first_event).await.unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&first_event).unwrap();
    assert_eq!(parsed["type"], "launch");

    let _ = std::fs::remove_file(&socket_path);
    let _ = std::fs::remove_file(&dashboard_path);
}

#[tokio::test]
async fn malformed_json_still_gets_exactly_one_error_response() {
    let socket_path = temp_socket_path("malformed");
    let _ = std::fs::remove_file(&socket_path);
    let listener = bind(&socket_path).unwrap();
    let sessions = SessionManager::new();
    let events = EventEmitter::new(temp_socket_path("malformed-dash"));

    let server = tokio::spawn(async move {
        let (stream, _addr) = listener.accept().await.unwrap();
        handle_connection(stream, &sessions, &events).await
    });

    let mut client = tokio::net::UnixStream::connect(&socket_path).await.unwrap();
    client.write_all(b"not json\n").await.unwrap();

    let mut reader = BufReader::new(client);
    let mut response_line = String::new();
    reader.read_line(&mut response_line).await.unwrap();
    let response: serde_json::Value = serde_json::from_str(&response_line).unwrap();
    assert_eq!(response["ok"], false);
    assert_eq!(response["error"]["code"], -32700);

    assert!(server.await.unwrap().is_ok());
    let _ = std::fs::remove_file(&socket_path);
}

#[tokio::test]
async fn connection_closed_before_any_bytes_is_not_an_error() {
    let socket_path = temp_socket_path("empty");
    let _ = std::fs::remove_file(&socket_path);
    let listener = bind(&socket_path).unwrap();
    let sessions = SessionManager::new();
    let events = EventEmitter::new(temp_socket_path("empty-dash"));

    let server = tokio::spawn(async move {
        let (stream, _addr) = listener.accept().await.unwrap();
        handle_connection(stream, &sessions, &events).await
    });

    let client = tokio::net::UnixStream::connect(&socket_path).await.unwrap();
    drop(client);

    let result = server.await.unwrap();
    assert!(result.is_ok());
    let _ = std::fs::remove_file(&socket_path);
}
