// SPDX-License-Identifier: MIT

//! PID file handling: the daemon refuses to start a second copy
//! of itself and cleans up its own PID file on every exit path.

use std::path::Path;

use nix::sys::signal::{self, Signal};
use nix::unistd::Pid;

/// Whether a PID file names a process that is still alive.
#[derive(Debug, PartialEq, Eq)]
pub enum Liveness {
    /// No PID file, or it could not be parsed — treat as not running.
    NoFile,
    /// PID file names a pid, but `kill(pid, 0)` says it's gone.
    Stale(u32),
    /// PID file names a pid that responds to `kill(pid, 0)`.
    Running(u32),
}

/// Check whether a daemon is already running according to `pid_path`.
pub fn check(pid_path: &Path) -> Liveness {
    let Ok(contents) = std::fs::read_to_string(pid_path) else {
        return Liveness::NoFile;
    };
    let Ok(pid) = contents.trim().parse::<u32>() else {
        return Liveness::NoFile;
    };
    if process_exists(pid) {
        Liveness::Running(pid)
    } else {
        Liveness::Stale(pid)
    }
}

/// `kill(pid, 0)` — true if the process exists and is signalable by us.
fn process_exists(pid: u32) -> bool {
    signal::kill(Pid::from_raw(pid as i32), None).is_ok()
}

/// Write the current process's pid to `pid_path`, creating parent
/// directories as needed.
pub fn write_current(pid_path: &Path) -> std::io::Result<()> {
    if let Some(parent) = pid_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(pid_path, std::process::id().to_string())
}

/// Remove the PID file, ignoring a missing file.
pub fn remove(pid_path: &Path) {
    let _ = std::fs::remove_file(pid_path);
}

#[cfg(test)]
#[path = "pidfile_tests.rs"]
mod tests;
