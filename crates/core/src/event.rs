// SPDX-License-Identifier: MIT

//! The dashboard event frame: one JSON object per line, pushed best-effort
//! from the daemon's event emitter to a connected dashboard.
//!
//! Unknown `type` tags and unknown fields must be ignored by the dashboard
//! (see `cogdbg-dashboard::events`); this enum only needs to model the
//! recognized shapes.

use serde::{Deserialize, Serialize};

use crate::driver::{BreakpointInfo, DriverKind, Location, StackFrame, Variable};
use crate::session::SessionId;

/// Action taken on a breakpoint, carried by the `breakpoint` event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BreakpointAction {
    Set,
    Remove,
    List,
}

/// Events pushed over the dashboard socket.
///
/// Serializes as `{"type": "...", ...}`. Any other `type` value should
/// deserialize as `Unknown` on the receiving side rather than fail the
/// whole line.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DashboardEvent {
    Launch {
        session_id: SessionId,
        program: String,
        driver: DriverKind,
    },
    Breakpoint {
        session_id: SessionId,
        action: BreakpointAction,
        #[serde(default)]
        bp: Option<BreakpointInfo>,
    },
    Stop {
        session_id: SessionId,
        reason: String,
        #[serde(default)]
        location: Option<Location>,
        #[serde(default)]
        stack_trace: Vec<StackFrame>,
        #[serde(default)]
        locals: Vec<Variable>,
    },
    Run {
        session_id: SessionId,
        action: String,
    },
    Inspect {
        session_id: SessionId,
        summary: String,
    },
    Activity {
        session_id: Option<SessionId>,
        tool: String,
        summary: String,
    },
    SessionEnd {
        session_id: SessionId,
    },
    Error {
        #[serde(default)]
        session_id: Option<SessionId>,
        method: String,
        message: String,
    },

    /// Catch-all for any `type` this version does not recognize. Never
    /// constructed directly; `serde` only lands here if every other
    /// variant's tag fails to match, which cannot happen given `tag =
    /// "type"` unless a future daemon sends a new event kind to an older
    /// dashboard. Kept so `DashboardEvent` deserialization never fails
    /// outright on an unrecognized `type` before the dashboard gets a
    /// chance to ignore it line-by-line (see `cogdbg-dashboard::events`,
    /// which parses the `type` field itself before decoding the payload).
    #[serde(other)]
    Unknown,
}

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;
