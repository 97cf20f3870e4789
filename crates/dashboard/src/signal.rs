// SPDX-License-Identifier: MIT

//! Dashboard signal policy: `SIGWINCH` triggers a repaint,
//! `SIGINT` (an external `kill -INT`, not a raw tty-generated one — raw
//! mode disables signal generation from the line discipline) tears the
//! terminal down cleanly.
//!
//! Unlike the daemon (`cogdbg_daemon::signal`), the dashboard's handling
//! runs on the tokio reactor rather than inside the actual signal handler,
//! so there is no async-signal-safety constraint here: `tokio::signal`
//! defers delivery to ordinary async tasks.

use tokio::signal::unix::{signal, Signal, SignalKind};

/// The two signal streams the dashboard's event loop selects over.
pub struct Signals {
    pub winch: Signal,
    pub int: Signal,
}

impl Signals {
    pub fn install() -> std::io::Result<Self> {
        Ok(Self {
            winch: signal(SignalKind::window_change())?,
            int: signal(SignalKind::interrupt())?,
        })
    }
}
