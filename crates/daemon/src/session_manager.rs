// SPDX-License-Identifier: MIT

//! Session manager: the daemon's live set of debug sessions,
//! each keyed by a monotonically allocated `session-{N}` id and bound to a
//! polymorphic [`Driver`].

use std::collections::HashMap;
use std::sync::Arc;

use cogdbg_core::{Driver, SessionId, SessionInfo, SessionStatus};
use parking_lot::Mutex;
use tracing::info;

struct Session {
    driver: Arc<dyn Driver>,
    status: SessionStatus,
    /// OS pid of a `run` currently blocked in the driver, if any. Set just
    /// before calling `driver.run()` and cleared once it returns, so a
    /// concurrent `debug_stop` on another connection can signal it.
    running_pid: Option<u32>,
}

/// Holds every live session. Exclusively owns driver handles and the id
/// allocator; a request handler only ever borrows a session for the
/// duration of one tool call.
pub struct SessionManager {
    inner: Mutex<Inner>,
}

struct Inner {
    sessions: HashMap<SessionId, Session>,
    next_id: u64,
}

impl Default for SessionManager {
    fn default() -> Self {
        Self {
            inner: Mutex::new(Inner {
                sessions: HashMap::new(),
                next_id: 1,
            }),
        }
    }
}

impl SessionManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate the next `session-{N}` id and register `driver` under it
    /// with status `launching`. Ids are never reused within a daemon
    /// lifetime; collisions are impossible by construction.
    pub fn create(&self, driver: Arc<dyn Driver>) -> SessionId {
        let mut inner = self.inner.lock();
        let id = SessionId::new(format!("session-{}", inner.next_id));
        inner.next_id += 1;
        info!(session_id = %id, driver_kind = ?driver.kind(), "session created");
        inner.sessions.insert(
            id.clone(),
            Session {
                driver,
                status: SessionStatus::Launching,
                running_pid: None,
            },
        );
        id
    }

    /// Borrow the driver bound to `id`, if it exists.
    pub fn driver(&self, id: &SessionId) -> Option<Arc<dyn Driver>> {
        self.inner.lock().sessions.get(id).map(|s| s.driver.clone())
    }

    /// Update the status of a live session. A no-op if the id is unknown
    /// (the session may have been destroyed concurrently).
    pub fn set_status(&self, id: &SessionId, status: SessionStatus) {
        if let Some(session) = self.inner.lock().sessions.get_mut(id) {
            session.status = status;
        }
    }

    pub fn status(&self, id: &SessionId) -> Option<SessionStatus> {
        self.inner.lock().sessions.get(id).map(|s| s.status)
    }

    /// Record that `id`'s driver is about to block inside `run`, backed by
    /// `pid`. A no-op if the session no longer exists.
    pub fn mark_running(&self, id: &SessionId, pid: u32) {
        if let Some(session) = self.inner.lock().sessions.get_mut(id) {
            session.running_pid = Some(pid);
        }
    }

    /// Clear the in-flight `run` marker once the driver call returns.
    pub fn clear_running(&self, id: &SessionId) {
        if let Some(session) = self.inner.lock().sessions.get_mut(id) {
            session.running_pid = None;
        }
    }

    /// The pid backing an in-flight `run` on `id`, if one is blocked.
    pub fn running_pid(&self, id: &SessionId) -> Option<u32> {
        self.inner.lock().sessions.get(id).and_then(|s| s.running_pid)
    }

    /// Remove the session, returning whether it existed. Callers are
    /// responsible for calling `driver.deinit()` before or after removal;
    /// the manager itself does not await, since it only ever holds a
    /// synchronous lock.
    pub fn destroy(&self, id: &SessionId) -> Option<Arc<dyn Driver>> {
        let removed = self.inner.lock().sessions.remove(id);
        if removed.is_some() {
            info!(session_id = %id, "session destroyed");
        }
        removed.map(|s| s.driver)
    }

    pub fn count(&self) -> usize {
        self.inner.lock().sessions.len()
    }

    /// Snapshot every session's id, status and driver kind, in arbitrary
    /// order.
    pub fn list(&self) -> Vec<SessionInfo> {
        self.inner
            .lock()
            .sessions
            .iter()
            .map(|(id, session)| SessionInfo {
                id: id.clone(),
                status: session.status,
                driver_kind: session.driver.kind(),
            })
            .collect()
    }

    /// All currently-registered session ids, for teardown.
    pub fn ids(&self) -> Vec<SessionId> {
        self.inner.lock().sessions.keys().cloned().collect()
    }
}

#[cfg(test)]
#[path = "session_manager_tests.rs"]
mod tests;
