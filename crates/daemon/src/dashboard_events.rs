// SPDX-License-Identifier: MIT

//! Translates a dispatched tool call into the [`DashboardEvent`]s the event
//! emitter should push.
//!
//! On success, the dispatcher's own domain event (`launch`, `breakpoint`,
//! `run`+`stop`, `session_end`, `inspect`) is emitted first so the
//! dashboard's view model stays in sync, followed by one `activity` entry.
//! On failure exactly one `error` event is emitted — this module never
//! emits both for the same call.

use cogdbg_core::{
    BreakpointAction, BreakpointInfo, DashboardEvent, DispatchError, DriverKind, Location,
    SessionId, StackFrame, Variable,
};
use serde_json::Value;

use crate::session_manager::SessionManager;

/// Build the dashboard events for one completed dispatch.
pub async fn events_for(
    tool: &str,
    args: &Value,
    outcome: &Result<Value, DispatchError>,
    sessions: &SessionManager,
) -> Vec<DashboardEvent> {
    let session_id = args
        .get("session_id")
        .and_then(Value::as_str)
        .map(SessionId::new);

    let result = match outcome {
        Ok(result) => result,
        Err(err) => {
            return vec![DashboardEvent::Error {
                session_id,
                method: tool.to_owned(),
                message: err.message(),
            }];
        }
    };

    let mut events = Vec::new();
    match tool {
        "debug_launch" => {
            if let Some(sid) = result.get("session_id").and_then(Value::as_str) {
                let driver = result
                    .get("driver")
                    .and_then(Value::as_str)
                    .unwrap_or("native");
                events.push(DashboardEvent::Launch {
                    session_id: SessionId::new(sid),
                    program: args
                        .get("program")
                        .and_then(Value::as_str)
                        .unwrap_or_default()
                        .to_owned(),
                    driver: if driver == "dap" {
                        DriverKind::Dap
                    } else {
                        DriverKind::Native
                    },
                });
            }
        }
        "debug_breakpoint" => {
            if let Some(sid) = session_id.clone() {
                let action_name = args.get("action").and_then(Value::as_str).unwrap_or("list");
                let action = match action_name {
                    "set" => BreakpointAction::Set,
                    "remove" => BreakpointAction::Remove,
                    _ => BreakpointAction::List,
                };
                let bp: Option<BreakpointInfo> = if action_name == "set" {
                    serde_json::from_value(result.clone()).ok()
                } else {
                    None
                };
                events.push(DashboardEvent::Breakpoint {
                    session_id: sid,
                    action,
                    bp,
                });
            }
        }
        "debug_run" => {
            if let Some(sid) = session_id.clone() {
                let run_action = args
                    .get("action")
                    .and_then(Value::as_str)
                    .unwrap_or("continue")
                    .to_owned();
                events.push(DashboardEvent::Run {
                    session_id: sid.clone(),
                    action: run_action,
                });

                let reason = result
                    .get("reason")
                    .and_then(Value::as_str)
                    .unwrap_or("pause")
                    .to_owned();
                let location: Option<Location> = result
                    .get("location")
                    .cloned()
                    .filter(|v| !v.is_null())
                    .and_then(|v| serde_json::from_value(v).ok());
                let locals: Vec<Variable> = result
                    .get("locals")
                    .cloned()
                    .and_then(|v| serde_json::from_value(v).ok())
                    .unwrap_or_default();

                // Best-effort: stack_trace is an optional capability, so a
                // driver that doesn't implement it simply yields an empty
                // frame list here.
                let stack_trace: Vec<StackFrame> = match sessions.driver(&sid) {
                    Some(driver) => driver.stack_trace().await.unwrap_or_default(),
                    None => Vec::new(),
                };

                events.push(DashboardEvent::Stop {
                    session_id: sid,
                    reason,
                    location,
                    stack_trace,
                    locals,
                });
            }
        }
        "debug_stop" => {
            if let Some(sid) = session_id.clone() {
                events.push(DashboardEvent::SessionEnd { session_id: sid });
            }
        }
        "debug_inspect" => {
            if let Some(sid) = session_id.clone() {
                events.push(DashboardEvent::Inspect {
                    session_id: sid,
                    summary: summarize_inspect(result),
                });
            }
        }
        _ => {}
    }

    events.push(DashboardEvent::Activity {
        session_id,
        tool: tool.to_owned(),
        summary: summarize(tool, result),
    });
    events
}

fn summarize(tool: &str, result: &Value) -> String {
    match tool {
        "debug_launch" => format!(
            "launched {}",
            result.get("session_id").and_then(Value::as_str).unwrap_or("?")
        ),
        "debug_run" => format!(
            "{} ({})",
            tool,
            result.get("reason").and_then(Value::as_str).unwrap_or("?")
        ),
        "debug_breakpoint" => "breakpoint updated".to_owned(),
        "debug_stop" => "session stopped".to_owned(),
        _ => format!("{tool} ok"),
    }
}

fn summarize_inspect(result: &Value) -> String {
    match result.get("kind").and_then(Value::as_str) {
        Some("evaluate") => format!(
            "= {}",
            result.get("result").and_then(Value::as_str).unwrap_or("")
        ),
        _ => {
            let count = result
                .get("variables")
                .and_then(Value::as_array)
                .map(Vec::len)
                .unwrap_or(0);
            format!("{count} locals")
        }
    }
}

#[cfg(test)]
#[path = "dashboard_events_tests.rs"]
mod tests;
