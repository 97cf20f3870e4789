// SPDX-License-Identifier: MIT

//! Session identity and lifecycle status.

use serde::{Deserialize, Serialize};

use crate::driver::DriverKind;

crate::define_id! {
    /// Stable identifier for a debug session, allocated as `session-{N}`
    /// with `N` starting at 1 and strictly increasing for the lifetime of a
    /// daemon process. Never reused.
    pub struct SessionId;
}

/// Lifecycle status of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    Launching,
    Running,
    Stopped,
    Terminated,
}

/// Snapshot of a session for `list()` and dashboard `launch` events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionInfo {
    pub id: SessionId,
    pub status: SessionStatus,
    pub driver_kind: DriverKind,
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
