// SPDX-License-Identifier: MIT

use super::*;

#[test]
fn launch_event_round_trips() {
    let event = DashboardEvent::Launch {
        session_id: SessionId::new("session-1"),
        program: "/bin/true".to_owned(),
        driver: DriverKind::Native,
    };
    let json = serde_json::to_string(&event).expect("serialize");
    assert!(json.contains("\"type\":\"launch\""));
    let back: DashboardEvent = serde_json::from_str(&json).expect("deserialize");
    match back {
        DashboardEvent::Launch { session_id, .. } => assert_eq!(session_id, "session-1"),
        other => panic!("unexpected variant: {other:?}"),
    }
}

#[test]
fn unknown_type_deserializes_to_unknown_variant() {
    let json = r#"{"type":"future_event","whatever":1}"#;
    let event: DashboardEvent = serde_json::from_str(json).expect("deserialize");
    assert!(matches!(event, DashboardEvent::Unknown));
}

#[test]
fn error_event_session_id_is_optional() {
    let json = r#"{"type":"error","method":"debug_run","message":"boom"}"#;
    let event: DashboardEvent = serde_json::from_str(json).expect("deserialize");
    match event {
        DashboardEvent::Error {
            session_id,
            method,
            message,
        } => {
            assert_eq!(session_id, None);
            assert_eq!(method, "debug_run");
            assert_eq!(message, "boom");
        }
        other => panic!("unexpected variant: {other:?}"),
    }
}
