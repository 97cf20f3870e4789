use super::*;
use serde_json::json;
use tokio::io::{AsyncBufReadExt as _, AsyncWriteExt as _, BufReader};
use tokio::net::UnixListener;

#[tokio::test]
async fn connect_fails_when_nothing_is_listening() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nope.sock");
    let err = DaemonClient::connect(&path).await.unwrap_err();
    assert!(matches!(err, ClientError::DaemonNotRunning));
}

#[tokio::test]
async fn call_round_trips_a_request_and_response() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("daemon.sock");
    let listener = UnixListener::bind(&path).unwrap();

    tokio::spawn(async move {
        let (stream, _) = listener.accept().await.unwrap();
        let mut reader = BufReader::new(stream);
        let mut line = String::new();
        reader.read_line(&mut line).await.unwrap();
        let request: ToolRequest = serde_json::from_str(line.trim_end()).unwrap();
        assert_eq!(request.tool, "list_sessions");

        let response = ToolResponse::ok(json!({"sessions": []}));
        let mut out = serde_json::to_vec(&response).unwrap();
        out.push(b'\n');
        reader.get_mut().write_all(&out).await.unwrap();
    });

    let client = DaemonClient::connect(&path).await.unwrap();
    let request = ToolRequest {
        tool: "list_sessions".to_owned(),
        args: serde_json::Value::Null,
    };
    let response = client.call(&request).await.unwrap();
    assert!(response.is_ok());
}
