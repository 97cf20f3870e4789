// SPDX-License-Identifier: MIT

//! Tool dispatcher: maps `(tool_name, args)` to typed driver
//! calls and renders results as JSON, with a stable JSON-RPC-adjacent error
//! taxonomy.

use std::sync::Arc;

use cogdbg_core::{
    BreakpointSpec, Driver, DriverKind, DispatchError, InspectRequest,
    LaunchConfig, RunAction, RunOptions, SessionId, SessionStatus,
};
use cogdbg_drivers::{DapDriver, NativeDriver};
use serde_json::Value;

use crate::session_manager::SessionManager;

/// Dispatch one tool call against `sessions`. A pure function of
/// `(tool, args, &SessionManager)`: it never touches the socket or the
/// event emitter directly (the listener wires those up around it).
pub async fn dispatch(
    tool: &str,
    args: Value,
    sessions: &SessionManager,
) -> Result<Value, DispatchError> {
    match tool {
        "debug_launch" => launch(args, sessions).await,
        "debug_breakpoint" => breakpoint(args, sessions).await,
        "debug_run" => run(args, sessions).await,
        "debug_stop" => stop(args, sessions).await,
        "debug_inspect" => inspect(args, sessions).await,
        "debug_list" => Ok(serde_json::to_value(sessions.list()).map_err(internal)?),
        "debug_stack_trace" => stack_trace(args, sessions).await,
        "debug_threads" => threads(args, sessions).await,
        "debug_get_pid" => get_pid(args, sessions),
        _ => Err(DispatchError::UnknownTool(tool.to_owned())),
    }
}

fn internal(err: impl std::fmt::Display) -> DispatchError {
    DispatchError::Internal(err.to_string())
}

fn field<'a>(args: &'a Value, name: &'static str) -> Result<&'a Value, DispatchError> {
    args.get(name)
        .ok_or_else(|| DispatchError::BadArgument(name.to_owned()))
}

fn str_field(args: &Value, name: &'static str) -> Result<String, DispatchError> {
    field(args, name)?
        .as_str()
        .map(str::to_owned)
        .ok_or_else(|| DispatchError::BadArgument(name.to_owned()))
}

fn session_id_field(args: &Value, name: &'static str) -> Result<SessionId, DispatchError> {
    Ok(SessionId::new(str_field(args, name)?))
}

fn session_driver(
    sessions: &SessionManager,
    id: &SessionId,
) -> Result<Arc<dyn Driver>, DispatchError> {
    sessions
        .driver(id)
        .ok_or_else(|| DispatchError::UnknownSession(id.as_str().to_owned()))
}

async fn launch(args: Value, sessions: &SessionManager) -> Result<Value, DispatchError> {
    let program = str_field(&args, "program")?;
    let driver_kind = args
        .get("driver")
        .and_then(Value::as_str)
        .unwrap_or("native");

    let config = LaunchConfig {
        program: program.clone(),
        args: Vec::new(),
        cwd: None,
        env: Vec::new(),
        stop_on_entry: false,
    };

    let driver: Arc<dyn Driver> = match driver_kind {
        "native" => Arc::new(NativeDriver::new()),
        "dap" => Arc::new(DapDriver::new()),
        other => return Err(DispatchError::BadArgument(format!("driver: {other}"))),
    };
    driver.launch(config).await?;

    let id = sessions.create(driver);
    sessions.set_status(&id, SessionStatus::Running);

    Ok(serde_json::json!({
        "session_id": id.as_str(),
        "driver": driver_kind_name(driver_kind_from(driver_kind)),
    }))
}

fn driver_kind_from(name: &str) -> DriverKind {
    if name == "dap" {
        DriverKind::Dap
    } else {
        DriverKind::Native
    }
}

fn driver_kind_name(kind: DriverKind) -> &'static str {
    match kind {
        DriverKind::Native => "native",
        DriverKind::Dap => "dap",
    }
}

async fn breakpoint(args: Value, sessions: &SessionManager) -> Result<Value, DispatchError> {
    let session_id = session_id_field(&args, "session_id")?;
    let driver = session_driver(sessions, &session_id)?;
    let action = str_field(&args, "action")?;

    match action.as_str() {
        "set" => {
            let file = str_field(&args, "file")?;
            let line = field(&args, "line")?
                .as_u64()
                .ok_or_else(|| DispatchError::BadArgument("line".to_owned()))? as u32;
            let spec = BreakpointSpec {
                file: file.into(),
                line,
                condition: args
                    .get("condition")
                    .and_then(Value::as_str)
                    .map(str::to_owned),
                hit_condition: args
                    .get("hit_condition")
                    .and_then(Value::as_str)
                    .map(str::to_owned),
                log_message: args
                    .get("log_message")
                    .and_then(Value::as_str)
                    .map(str::to_owned),
            };
            let info = driver.set_breakpoint(spec).await?;
            Ok(serde_json::to_value(info).map_err(internal)?)
        }
        "remove" => {
            let id = field(&args, "id")?
                .as_u64()
                .ok_or_else(|| DispatchError::BadArgument("id".to_owned()))?;
            driver.remove_breakpoint(id).await?;
            Ok(serde_json::json!({}))
        }
        "list" => {
            let list = driver.list_breakpoints().await?;
            Ok(serde_json::to_value(list).map_err(internal)?)
        }
        other => Err(DispatchError::BadArgument(format!(
            "action: {other} (expected set|remove|list)"
        ))),
    }
}

async fn run(args: Value, sessions: &SessionManager) -> Result<Value, DispatchError> {
    let session_id = session_id_field(&args, "session_id")?;
    let driver = session_driver(sessions, &session_id)?;
    let action = parse_run_action(&str_field(&args, "action")?)?;
    let options = RunOptions {
        thread_id: args.get("thread_id").and_then(Value::as_u64),
        single_thread: args
            .get("single_thread")
            .and_then(Value::as_bool)
            .unwrap_or(false),
        timeout_ms: args.get("timeout_ms").and_then(Value::as_u64),
    };

    // Record the backing pid before the call blocks, so a concurrent
    // `debug_stop` on another connection can signal it.
    if let Ok(pid) = driver.get_pid() {
        sessions.mark_running(&session_id, pid);
    }
    let result = driver.run(action, options).await;
    sessions.clear_running(&session_id);
    let stop_state = result?;

    if stop_state.reason == cogdbg_core::StopReason::Exit {
        sessions.set_status(&session_id, SessionStatus::Terminated);
    } else {
        sessions.set_status(&session_id, SessionStatus::Stopped);
    }
    Ok(serde_json::to_value(stop_state).map_err(internal)?)
}

fn parse_run_action(name: &str) -> Result<RunAction, DispatchError> {
    Ok(match name {
        "continue" => RunAction::Continue,
        "step_over" => RunAction::StepOver,
        "step_in" => RunAction::StepIn,
        "step_out" => RunAction::StepOut,
        "reverse_continue" => RunAction::ReverseContinue,
        "reverse_step_over" => RunAction::ReverseStepOver,
        "pause" => RunAction::Pause,
        other => return Err(DispatchError::BadArgument(format!("action: {other}"))),
    })
}

async fn stop(args: Value, sessions: &SessionManager) -> Result<Value, DispatchError> {
    let session_id = session_id_field(&args, "session_id")?;
    let driver = session_driver(sessions, &session_id)?;

    // If a `run` is blocked in the driver, force it to unblock before
    // calling `stop`/`deinit`.
    if let Some(pid) = sessions.running_pid(&session_id) {
        let _ = nix::sys::signal::kill(
            nix::unistd::Pid::from_raw(pid as i32),
            nix::sys::signal::Signal::SIGTERM,
        );
    }

    driver.stop().await?;
    driver.deinit().await?;
    sessions.destroy(&session_id);
    Ok(serde_json::json!({}))
}

async fn inspect(args: Value, sessions: &SessionManager) -> Result<Value, DispatchError> {
    let session_id = session_id_field(&args, "session_id")?;
    let driver = session_driver(sessions, &session_id)?;
    let request = if let Some(expr) = args.get("expression").and_then(Value::as_str) {
        InspectRequest::Evaluate {
            expression: expr.to_owned(),
            frame_index: args.get("frame_index").and_then(Value::as_u64).unwrap_or(0) as u32,
        }
    } else {
        InspectRequest::Locals {
            frame_index: args.get("frame_index").and_then(Value::as_u64).unwrap_or(0) as u32,
        }
    };
    let result = driver.inspect(request).await?;
    Ok(serde_json::to_value(result).map_err(internal)?)
}

fn get_pid(args: Value, sessions: &SessionManager) -> Result<Value, DispatchError> {
    let session_id = session_id_field(&args, "session_id")?;
    let driver = session_driver(sessions, &session_id)?;
    let pid = driver.get_pid()?;
    Ok(serde_json::json!({ "pid": pid }))
}

async fn stack_trace(args: Value, sessions: &SessionManager) -> Result<Value, DispatchError> {
    let session_id = session_id_field(&args, "session_id")?;
    let driver = session_driver(sessions, &session_id)?;
    let frames = driver.stack_trace().await?;
    Ok(serde_json::to_value(frames).map_err(internal)?)
}

async fn threads(args: Value, sessions: &SessionManager) -> Result<Value, DispatchError> {
    let session_id = session_id_field(&args, "session_id")?;
    let driver = session_driver(sessions, &session_id)?;
    let raw = driver.threads().await?;
    Ok(raw)
}

#[cfg(test)]
#[path = "dispatcher_tests.rs"]
mod tests;
