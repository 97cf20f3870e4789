// SPDX-License-Identifier: MIT

//! Dashboard configuration: the per-UID rendezvous socket it listens on and
//! its own log file.
//!
//! Mirrors `cogdbg_daemon::config::Config` in shape; kept as a separate
//! type because the dashboard has no PID-file liveness check of its own —
//! a bind failure on an already-bound socket *is* the liveness check.

use std::path::PathBuf;

use nix::unistd::Uid;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not determine current UID")]
    NoUid,
}

#[derive(Debug, Clone)]
pub struct Config {
    /// `/tmp/cog-debug-dashboard-{uid}.sock` — where daemons connect to
    /// stream events.
    pub socket_path: PathBuf,
    /// `/tmp/cog-debug-dashboard-{uid}.log` — never stdout/stderr, which
    /// are owned by the raw terminal.
    pub log_path: PathBuf,
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        Self::for_uid(Uid::current().as_raw())
    }

    pub fn for_uid(uid: u32) -> Result<Self, ConfigError> {
        Ok(Self {
            socket_path: PathBuf::from(format!("/tmp/cog-debug-dashboard-{uid}.sock")),
            log_path: PathBuf::from(format!("/tmp/cog-debug-dashboard-{uid}.log")),
        })
    }

    /// Rooted at an arbitrary directory instead of `/tmp`, for test
    /// isolation.
    pub fn under(root: &std::path::Path, uid: u32) -> Self {
        Self {
            socket_path: root.join(format!("cog-debug-dashboard-{uid}.sock")),
            log_path: root.join(format!("cog-debug-dashboard-{uid}.log")),
        }
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
