// SPDX-License-Identifier: MIT

use super::*;
use cogdbg_core::{DriverKind, ErrorCode, SessionStatus, StopReason, StopState};
use cogdbg_drivers::FakeDriver;
use std::sync::Arc;

fn manager_with_fake_session() -> (SessionManager, SessionId, Arc<FakeDriver>) {
    let manager = SessionManager::new();
    let driver = Arc::new(FakeDriver::new(DriverKind::Native));
    let id = manager.create(driver.clone());
    (manager, id, driver)
}

#[tokio::test]
async fn launch_creates_session_one_on_a_fresh_manager() {
    let sessions = SessionManager::new();
    let result = dispatch(
        "debug_launch",
        serde_json::json!({"program": "/bin/true", "driver": "native"}),
        &sessions,
    )
    .await
    .unwrap();
    assert_eq!(result["session_id"], "session-1");
    assert_eq!(sessions.count(), 1);
}

#[tokio::test]
async fn launch_rejects_unknown_driver_kind() {
    let sessions = SessionManager::new();
    let err = dispatch(
        "debug_launch",
        serde_json::json!({"program": "/bin/true", "driver": "quantum"}),
        &sessions,
    )
    .await
    .unwrap_err();
    assert!(matches!(err, DispatchError::BadArgument(_)));
    assert_eq!(err.code().as_i32(), ErrorCode::InvalidParams.as_i32());
}

#[tokio::test]
async fn unknown_tool_is_invalid_params() {
    let sessions = SessionManager::new();
    let err = dispatch("bogus", serde_json::json!({}), &sessions)
        .await
        .unwrap_err();
    assert!(matches!(err, DispatchError::UnknownTool(_)));
    assert_eq!(err.code().as_i32(), -32602);
}

#[tokio::test]
async fn operations_against_an_unknown_session_fail_cleanly() {
    let sessions = SessionManager::new();
    let err = dispatch(
        "debug_run",
        serde_json::json!({"session_id": "session-404", "action": "continue"}),
        &sessions,
    )
    .await
    .unwrap_err();
    assert!(matches!(err, DispatchError::UnknownSession(_)));
}

#[tokio::test]
async fn breakpoint_set_returns_verified_info() {
    let (sessions, id, _driver) = manager_with_fake_session();
    let result = dispatch(
        "debug_breakpoint",
        serde_json::json!({
            "session_id": id.as_str(),
            "action": "set",
            "file": "/tmp/a.c",
            "line": 4,
        }),
        &sessions,
    )
    .await
    .unwrap();
    assert_eq!(result["id"], 1);
    assert_eq!(result["verified"], true);
    assert_eq!(result["line"], 4);
}

#[tokio::test]
async fn breakpoint_remove_of_unknown_id_is_not_an_error() {
    let (sessions, id, _driver) = manager_with_fake_session();
    let result = dispatch(
        "debug_breakpoint",
        serde_json::json!({"session_id": id.as_str(), "action": "remove", "id": 999}),
        &sessions,
    )
    .await;
    assert!(result.is_ok());
}

#[tokio::test]
async fn run_continue_transitions_session_to_stopped() {
    let (sessions, id, driver) = manager_with_fake_session();
    driver.push_run_result(Ok(StopState {
        reason: StopReason::Breakpoint,
        location: None,
        exit_code: None,
        locals: vec![],
        log_messages: vec![],
    }));
    dispatch(
        "debug_run",
        serde_json::json!({"session_id": id.as_str(), "action": "continue"}),
        &sessions,
    )
    .await
    .unwrap();
    assert_eq!(sessions.status(&id), Some(SessionStatus::Stopped));
}

#[tokio::test]
async fn run_exit_transitions_session_to_terminated() {
    let (sessions, id, driver) = manager_with_fake_session();
    driver.push_run_result(Ok(StopState {
        reason: StopReason::Exit,
        location: None,
        exit_code: Some(0),
        locals: vec![],
        log_messages: vec![],
    }));
    dispatch(
        "debug_run",
        serde_json::json!({"session_id": id.as_str(), "action": "continue"}),
        &sessions,
    )
    .await
    .unwrap();
    assert_eq!(sessions.status(&id), Some(SessionStatus::Terminated));
}

#[tokio::test]
async fn run_rejects_unknown_action_name() {
    let (sessions, id, _driver) = manager_with_fake_session();
    let err = dispatch(
        "debug_run",
        serde_json::json!({"session_id": id.as_str(), "action": "levitate"}),
        &sessions,
    )
    .await
    .unwrap_err();
    assert!(matches!(err, DispatchError::BadArgument(_)));
}

#[tokio::test]
async fn stop_destroys_the_session() {
    let (sessions, id, _driver) = manager_with_fake_session();
    dispatch(
        "debug_stop",
        serde_json::json!({"session_id": id.as_str()}),
        &sessions,
    )
    .await
    .unwrap();
    assert_eq!(sessions.count(), 0);
}

#[tokio::test]
async fn inspect_defaults_to_locals_request() {
    let (sessions, id, _driver) = manager_with_fake_session();
    let result = dispatch(
        "debug_inspect",
        serde_json::json!({"session_id": id.as_str()}),
        &sessions,
    )
    .await
    .unwrap();
    assert_eq!(result["kind"], "locals");
}

#[tokio::test]
async fn inspect_with_expression_is_an_evaluate_request() {
    let (sessions, id, _driver) = manager_with_fake_session();
    let result = dispatch(
        "debug_inspect",
        serde_json::json!({"session_id": id.as_str(), "expression": "x + 1"}),
        &sessions,
    )
    .await
    .unwrap();
    assert_eq!(result["kind"], "evaluate");
}

#[tokio::test]
async fn get_pid_is_callable_independent_of_a_blocked_run() {
    let (sessions, id, driver) = manager_with_fake_session();
    driver.set_pid(777);
    let result = dispatch(
        "debug_get_pid",
        serde_json::json!({"session_id": id.as_str()}),
        &sessions,
    )
    .await
    .unwrap();
    assert_eq!(result["pid"], 777);
}

#[tokio::test]
async fn capability_probe_surfaces_not_supported_distinctly() {
    // FakeDriver never overrides stack_trace, so it falls through to the
    // trait default.
    let (sessions, id, _driver) = manager_with_fake_session();
    let err = dispatch(
        "debug_stack_trace",
        serde_json::json!({"session_id": id.as_str()}),
        &sessions,
    )
    .await
    .unwrap_err();
    assert!(matches!(err, DispatchError::NotSupported(_)));
    assert!(err.message().contains("not supported"));
}

#[tokio::test]
async fn debug_list_reflects_every_live_session() {
    let sessions = SessionManager::new();
    dispatch(
        "debug_launch",
        serde_json::json!({"program": "/bin/true"}),
        &sessions,
    )
    .await
    .unwrap();
    dispatch(
        "debug_launch",
        serde_json::json!({"program": "/bin/false", "driver": "dap"}),
        &sessions,
    )
    .await
    .unwrap();
    let result = dispatch("debug_list", serde_json::json!({}), &sessions)
        .await
        .unwrap();
    assert_eq!(result.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn stop_on_a_live_session_clears_its_running_pid_marker() {
    let (sessions, id, driver) = manager_with_fake_session();
    driver.set_pid(999999); // almost certainly not a real pid; kill is best-effort
    sessions.mark_running(&id, 999999);
    dispatch(
        "debug_stop",
        serde_json::json!({"session_id": id.as_str()}),
        &sessions,
    )
    .await
    .unwrap();
    assert_eq!(sessions.count(), 0);
}

#[tokio::test]
async fn missing_required_argument_is_invalid_params() {
    let sessions = SessionManager::new();
    let err = dispatch("debug_launch", serde_json::json!({}), &sessions)
        .await
        .unwrap_err();
    assert!(matches!(err, DispatchError::BadArgument(_)));
    assert_eq!(err.code().as_i32(), -32602);
}
