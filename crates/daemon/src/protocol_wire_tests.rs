// SPDX-License-Identifier: MIT

use super::*;
use cogdbg_core::ToolResponse;
use tokio::io::BufReader;

#[tokio::test]
async fn reads_one_newline_terminated_request() {
    let input = b"{\"tool\":\"debug_launch\",\"args\":{}}\n".to_vec();
    let mut reader = BufReader::new(&input[..]);
    let request = read_request(&mut reader).await.unwrap();
    assert_eq!(request.tool, "debug_launch");
}

#[tokio::test]
async fn eof_without_any_bytes_is_connection_closed() {
    let input: Vec<u8> = vec![];
    let mut reader = BufReader::new(&input[..]);
    let err = read_request(&mut reader).await.unwrap_err();
    assert!(matches!(err, ProtocolError::ConnectionClosed));
}

#[tokio::test]
async fn accepts_a_request_terminated_by_eof_instead_of_newline() {
    let input = b"{\"tool\":\"debug_status\",\"args\":{}}".to_vec();
    let mut reader = BufReader::new(&input[..]);
    let request = read_request(&mut reader).await.unwrap();
    assert_eq!(request.tool, "debug_status");
}

#[tokio::test]
async fn malformed_json_is_a_parse_error() {
    let input = b"not json at all\n".to_vec();
    let mut reader = BufReader::new(&input[..]);
    let err = read_request(&mut reader).await.unwrap_err();
    assert!(matches!(err, ProtocolError::Json(_)));
}

#[tokio::test]
async fn a_json_array_is_a_shape_error_not_a_parse_error() {
    let input = b"[1,2,3]\n".to_vec();
    let mut reader = BufReader::new(&input[..]);
    let err = read_request(&mut reader).await.unwrap_err();
    assert!(matches!(err, ProtocolError::InvalidShape(_)));
}

#[tokio::test]
async fn a_missing_tool_field_is_a_bad_argument() {
    let input = b"{\"args\":{}}\n".to_vec();
    let mut reader = BufReader::new(&input[..]);
    let err = read_request(&mut reader).await.unwrap_err();
    assert!(matches!(err, ProtocolError::BadArgument(_)));
}

#[tokio::test]
async fn a_non_string_tool_field_is_a_bad_argument() {
    let input = b"{\"tool\":7,\"args\":{}}\n".to_vec();
    let mut reader = BufReader::new(&input[..]);
    let err = read_request(&mut reader).await.unwrap_err();
    assert!(matches!(err, ProtocolError::BadArgument(_)));
}

#[tokio::test]
async fn write_response_appends_newline() {
    let mut out = Vec::new();
    let response = ToolResponse::ok(serde_json::json!({"session_id": "session-1"}));
    write_response(&mut out, &response).await.unwrap();
    assert_eq!(out.last(), Some(&b'\n'));
    let body = &out[..out.len() - 1];
    let parsed: serde_json::Value = serde_json::from_slice(body).unwrap();
    assert_eq!(parsed["ok"], true);
}
