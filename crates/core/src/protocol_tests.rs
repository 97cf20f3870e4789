// SPDX-License-Identifier: MIT

use super::*;

#[test]
fn request_decodes_tool_and_args() {
    let json = r#"{"tool":"debug_launch","args":{"program":"/bin/true"}}"#;
    let req: ToolRequest = serde_json::from_str(json).expect("decode");
    assert_eq!(req.tool, "debug_launch");
    assert_eq!(req.args["program"], "/bin/true");
}

#[test]
fn ok_response_serializes_expected_shape() {
    let resp = ToolResponse::ok(serde_json::json!({"session_id": "session-1"}));
    let json = serde_json::to_value(&resp).expect("serialize");
    assert_eq!(json["ok"], true);
    assert_eq!(json["result"]["session_id"], "session-1");
}

#[test]
fn err_response_serializes_expected_shape() {
    let resp = ToolResponse::err(-32602, "missing tool");
    let json = serde_json::to_value(&resp).expect("serialize");
    assert_eq!(json["ok"], false);
    assert_eq!(json["error"]["code"], -32602);
    assert_eq!(json["error"]["message"], "missing tool");
}

#[test]
fn err_response_round_trips() {
    let resp = ToolResponse::err(-32603, "boom");
    let json = serde_json::to_string(&resp).expect("serialize");
    let back: ToolResponse = serde_json::from_str(&json).expect("deserialize");
    assert!(!back.is_ok());
}
