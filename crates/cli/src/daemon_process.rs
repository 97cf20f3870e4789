// SPDX-License-Identifier: MIT

//! Daemon process lifecycle: binary discovery, background spawn, and a
//! synchronous SIGTERM-then-poll-then-SIGKILL stop sequence.
//!
//! Discovers the daemon binary next to the current exe and polls its
//! liveness with `kill(pid, 0)`, using `nix::sys::signal` directly rather
//! than shelling out to `kill(1)`.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use cogdbg_daemon::{pidfile, Config};
use nix::sys::signal::{self, Signal};
use nix::unistd::Pid;

use crate::client::ClientError;

const STOP_POLL_INTERVAL: Duration = Duration::from_millis(50);
const STOP_TIMEOUT: Duration = Duration::from_secs(2);

/// Spawn the daemon binary in the background, detached from this
/// process's stdio.
pub fn start_daemon_background() -> Result<std::process::Child, ClientError> {
    let path = find_daemon_binary();

    std::process::Command::new(&path)
        .stdin(std::process::Stdio::null())
        .stdout(std::process::Stdio::null())
        .stderr(std::process::Stdio::null())
        .spawn()
        .map_err(|e| ClientError::DaemonStartFailed(e.to_string()))
}

/// Stop a running daemon: SIGTERM, poll for exit, SIGKILL if it's still
/// alive after the timeout.
pub fn stop_daemon(config: &Config) {
    let Some(pid) = read_pid(config) else {
        return;
    };

    kill(pid, Signal::SIGTERM);
    if wait_for_exit(pid, STOP_TIMEOUT) {
        return;
    }

    kill(pid, Signal::SIGKILL);
    wait_for_exit(pid, STOP_TIMEOUT);
}

/// Poll `kill(pid, 0)` until the process is gone or `timeout` elapses.
fn wait_for_exit(pid: u32, timeout: Duration) -> bool {
    let start = Instant::now();
    while start.elapsed() < timeout {
        if !process_exists(pid) {
            return true;
        }
        std::thread::sleep(STOP_POLL_INTERVAL);
    }
    !process_exists(pid)
}

fn read_pid(config: &Config) -> Option<u32> {
    match pidfile::check(&config.pid_path) {
        pidfile::Liveness::Running(pid) => Some(pid),
        pidfile::Liveness::Stale(_) | pidfile::Liveness::NoFile => None,
    }
}

fn process_exists(pid: u32) -> bool {
    signal::kill(Pid::from_raw(pid as i32), None).is_ok()
}

fn kill(pid: u32, sig: Signal) {
    let _ = signal::kill(Pid::from_raw(pid as i32), sig);
}

/// Find the daemon binary next to this CLI's own executable, falling back
/// to `$PATH` lookup by bare name.
fn find_daemon_binary() -> PathBuf {
    if let Ok(current_exe) = std::env::current_exe() {
        if let Some(dir) = current_exe.parent() {
            let sibling = dir.join("cogdbgd");
            if sibling.exists() {
                return sibling;
            }
        }
    }
    PathBuf::from("cogdbgd")
}

#[cfg(test)]
#[path = "daemon_process_tests.rs"]
mod tests;
