// SPDX-License-Identifier: MIT

//! Bounds shared by the daemon and the dashboard so the two processes agree
//! on the protocol's implicit capacity limits without re-deriving them.

use std::time::Duration;

/// Capacity of every ring log (global and per-session).
pub const RING_LOG_CAPACITY: usize = 16;

/// Maximum number of concurrent dashboard session views.
pub const MAX_DASHBOARD_SESSIONS: usize = 16;

/// Maximum numbered lines held in a dashboard source window.
pub const SOURCE_WINDOW_MAX_LINES: usize = 100;

/// Radius (lines above/below the stop line) used to build a source window.
pub const SOURCE_WINDOW_RADIUS: usize = (SOURCE_WINDOW_MAX_LINES - 1) / 2;

/// Source lines longer than this are truncated (the viewer is line-oriented,
/// not binary-safe).
pub const SOURCE_LINE_MAX_BYTES: usize = 200;

/// Per-client read buffer used by the dashboard to reassemble partial lines.
pub const DASHBOARD_CLIENT_BUF_BYTES: usize = 8 * 1024;

/// Per-connection read limit on the daemon's request socket.
pub const DAEMON_READ_LIMIT_BYTES: usize = 64 * 1024;

/// How long the daemon may sit idle (no accepts) with no live sessions
/// before it exits on its own.
pub const DAEMON_IDLE_TIMEOUT: Duration = Duration::from_secs(5 * 60);

/// Poll timeout on the daemon's accept loop.
pub const DAEMON_POLL_TIMEOUT: Duration = Duration::from_secs(5);

/// Poll timeout on the dashboard's event loop (drives SIGWINCH repaints).
pub const DASHBOARD_POLL_TIMEOUT: Duration = Duration::from_millis(100);
