// SPDX-License-Identifier: MIT

//! Accept loop for the rendezvous socket.
//!
//! Each connection gets its own spawned task so a blocked `run` on one
//! session never stalls a `debug_stop` arriving on another connection. The
//! daemon shuts itself down after [`DAEMON_IDLE_TIMEOUT`] of no accepted
//! connections while no session is live.

use std::io;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use cogdbg_core::{DAEMON_IDLE_TIMEOUT, DAEMON_POLL_TIMEOUT, ErrorCode, ToolRequest, ToolResponse};
use tokio::net::{UnixListener, UnixStream};
use tracing::{info, warn};

use crate::dashboard_events;
use crate::dispatcher;
use crate::event_emitter::EventEmitter;
use crate::protocol_wire::{self, ProtocolError};
use crate::session_manager::SessionManager;

/// Remove a stale socket file, if any, then bind a fresh listener.
pub fn bind(socket_path: &Path) -> io::Result<UnixListener> {
    if socket_path.exists() {
        std::fs::remove_file(socket_path)?;
    }
    UnixListener::bind(socket_path)
}

/// Run the accept loop until idle shutdown. Returns once the daemon has
/// decided to exit on its own; callers still own final file cleanup.
pub async fn serve(listener: UnixListener, sessions: Arc<SessionManager>, events: EventEmitter) {
    let mut last_activity = Instant::now();
    loop {
        let accept = tokio::time::timeout(DAEMON_POLL_TIMEOUT, listener.accept()).await;
        match accept {
            Ok(Ok((stream, _addr))) => {
                last_activity = Instant::now();
                let sessions = sessions.clone();
                let events = events.clone();
                tokio::spawn(async move {
                    if let Err(e) = handle_connection(stream, &sessions, &events).await {
                        warn!(error = %e, "connection handling failed");
                    }
                });
            }
            Ok(Err(e)) => {
                warn!(error = %e, "accept failed");
            }
            Err(_timeout) => {
                if sessions.count() == 0 && last_activity.elapsed() >= DAEMON_IDLE_TIMEOUT {
                    info!("idle with no live sessions, shutting down");
                    return;
                }
            }
        }
    }
}

/// Handle exactly one request/response exchange on `stream`, emitting the
/// corresponding dashboard event(s) after the result is known.
async fn handle_connection(
    stream: UnixStream,
    sessions: &SessionManager,
    events: &EventEmitter,
) -> Result<(), ProtocolError> {
    let (read_half, mut write_half) = stream.into_split();
    let mut reader = tokio::io::BufReader::new(read_half);

    let request = match protocol_wire::read_request(&mut reader).await {
        Ok(request) => request,
        Err(ProtocolError::ConnectionClosed) => return Ok(()),
        // Parse/shape/framing errors still owe the client exactly one
        // response; only a genuine I/O failure gives up on writing back.
        Err(
            e
            @ (ProtocolError::Json(_)
            | ProtocolError::InvalidShape(_)
            | ProtocolError::BadArgument(_)
            | ProtocolError::TooLarge(_)),
        ) => {
            let (code, message) = match &e {
                ProtocolError::Json(err) => (ErrorCode::ParseError, err.to_string()),
                ProtocolError::InvalidShape(msg) => (ErrorCode::InvalidRequest, msg.clone()),
                ProtocolError::BadArgument(msg) => (ErrorCode::InvalidParams, msg.clone()),
                ProtocolError::TooLarge(limit) => (
                    ErrorCode::InvalidRequest,
                    format!("request exceeded {limit} bytes before a newline"),
                ),
                _ => unreachable!(),
            };
            let response = ToolResponse::err(code.as_i32(), message);
            protocol_wire::write_response(&mut write_half, &response).await?;
            return Ok(());
        }
        Err(e) => return Err(e),
    };
    let ToolRequest { tool, args } = request;

    let outcome = dispatcher::dispatch(&tool, args.clone(), sessions).await;
    let response = match &outcome {
        Ok(result) => ToolResponse::ok(result.clone()),
        Err(e) => ToolResponse::err(e.code().as_i32(), e.message()),
    };
    protocol_wire::write_response(&mut write_half, &response).await?;

    for event in dashboard_events::events_for(&tool, &args, &outcome, sessions).await {
        events.emit(event).await;
    }
    Ok(())
}

#[cfg(test)]
#[path = "listener_tests.rs"]
mod tests;
