// SPDX-License-Identifier: MIT

//! Daemon configuration: fixed, per-UID paths under `/tmp`.
//!
//! There is no state directory tree, no WAL, no snapshot — sessions never
//! survive a daemon restart. Every path is derived directly from the UID.

use std::path::PathBuf;

use nix::unistd::Uid;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not determine current UID")]
    NoUid,
}

/// Fixed daemon paths, all rooted at `/tmp` and namespaced by UID so two
/// users on the same host never collide.
#[derive(Debug, Clone)]
pub struct Config {
    /// `/tmp/cog-debug-{uid}.sock` — the daemon's rendezvous socket.
    pub socket_path: PathBuf,
    /// `/tmp/cog-debug-dashboard-{uid}.sock` — opportunistically connected
    /// on startup to stream events.
    pub dashboard_socket_path: PathBuf,
    /// `/tmp/cog-debug-{uid}.pid` — written once after bind, removed on
    /// every exit path.
    pub pid_path: PathBuf,
    /// `/tmp/cog-debug-{uid}.log` — the daemon's own rotated log file.
    pub log_path: PathBuf,
}

impl Config {
    /// Load the fixed configuration for the current user.
    pub fn load() -> Result<Self, ConfigError> {
        Self::for_uid(Uid::current().as_raw())
    }

    /// Build the configuration for an explicit UID (used by tests that
    /// isolate themselves from the real `/tmp` namespace).
    pub fn for_uid(uid: u32) -> Result<Self, ConfigError> {
        Ok(Self {
            socket_path: PathBuf::from(format!("/tmp/cog-debug-{uid}.sock")),
            dashboard_socket_path: PathBuf::from(format!("/tmp/cog-debug-dashboard-{uid}.sock")),
            pid_path: PathBuf::from(format!("/tmp/cog-debug-{uid}.pid")),
            log_path: PathBuf::from(format!("/tmp/cog-debug-{uid}.log")),
        })
    }

    /// Load configuration rooted at an arbitrary directory instead of
    /// `/tmp`, so tests that bind real sockets get a private directory
    /// instead of racing each other (or a real daemon) over the fixed
    /// per-UID paths.
    pub fn under(root: &std::path::Path, uid: u32) -> Self {
        Self {
            socket_path: root.join(format!("cog-debug-{uid}.sock")),
            dashboard_socket_path: root.join(format!("cog-debug-dashboard-{uid}.sock")),
            pid_path: root.join(format!("cog-debug-{uid}.pid")),
            log_path: root.join(format!("cog-debug-{uid}.log")),
        }
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
