// SPDX-License-Identifier: MIT

//! Event emitter: a unidirectional, best-effort writer to the
//! dashboard socket. Never blocks the dispatcher meaningfully — a failed
//! write degrades silently and disables further emission until the next
//! connect attempt.

use std::path::PathBuf;

use cogdbg_core::DashboardEvent;
use parking_lot::Mutex;
use tokio::io::AsyncWriteExt;
use tokio::net::UnixStream;
use tracing::debug;

/// Best-effort one-way connection to the dashboard socket.
///
/// Cloning shares the same underlying connection state, so every handler
/// task in the daemon pushes onto the one socket without re-dialing.
#[derive(Clone)]
pub struct EventEmitter {
    socket_path: PathBuf,
    conn: std::sync::Arc<Mutex<Option<UnixStream>>>,
}

impl EventEmitter {
    /// Construct an emitter that has not yet connected. The first `emit`
    /// call triggers a connection attempt.
    pub fn new(dashboard_socket_path: PathBuf) -> Self {
        Self {
            socket_path: dashboard_socket_path,
            conn: std::sync::Arc::new(Mutex::new(None)),
        }
    }

    /// Opportunistically connect now. Failure is silent: the daemon starts
    /// up whether or not a dashboard is listening.
    pub async fn connect(&self) {
        match UnixStream::connect(&self.socket_path).await {
            Ok(stream) => {
                *self.conn.lock() = Some(stream);
                debug!(path = %self.socket_path.display(), "connected to dashboard");
            }
            Err(e) => {
                debug!(path = %self.socket_path.display(), error = %e, "no dashboard connected");
            }
        }
    }

    /// Push one event, best-effort. A write failure drops the connection
    /// silently; the next `emit` (or an explicit `connect`) will try again.
    pub async fn emit(&self, event: DashboardEvent) {
        let mut line = match serde_json::to_vec(&event) {
            Ok(bytes) => bytes,
            Err(_) => return,
        };
        line.push(b'\n');

        // Take the connection out of the mutex for the duration of the
        // write so we never hold the lock across an `.await`.
        let stream = self.conn.lock().take();
        let Some(mut stream) = stream else {
            return;
        };

        match stream.write_all(&line).await {
            Ok(()) => {
                *self.conn.lock() = Some(stream);
            }
            Err(e) => {
                debug!(error = %e, "dashboard write failed, disabling until reconnect");
                // Drop `stream`; connection stays `None` until the daemon
                // (or a future emit) reconnects.
            }
        }
    }

    /// True if currently believed connected. Exposed for tests only; the
    /// daemon itself never branches on this (emit degrades silently either
    /// way).
    #[cfg(test)]
    pub(crate) fn is_connected(&self) -> bool {
        self.conn.lock().is_some()
    }
}

#[cfg(test)]
#[path = "event_emitter_tests.rs"]
mod tests;
