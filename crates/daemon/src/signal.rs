// SPDX-License-Identifier: MIT

//! Signal-safe cleanup.
//!
//! `SIGTERM`/`SIGINT` must remove the socket and PID files and exit without
//! doing anything that is not async-signal-safe: no allocation, no logging,
//! no locking. The socket and PID paths are copied into fixed-size global
//! buffers once, before the daemon's accept loop starts; the signal handler
//! only ever reads those buffers and calls `unlink`/`_exit`.
//!
//! `SIGPIPE` is ignored so a broken dashboard connection surfaces as a
//! write error on the event emitter rather than killing the daemon.

use std::os::unix::ffi::OsStrExt;
use std::path::Path;
use std::sync::atomic::{AtomicU8, AtomicUsize, Ordering};

use nix::sys::signal::{self, SigHandler, Signal};

/// Matches the classic `sockaddr_un.sun_path` capacity; both paths this
/// daemon ever unlinks (`/tmp/cog-debug-{uid}.sock`, `...pid`) fit easily.
const PATH_CAP: usize = 108;

static SOCKET_PATH: [AtomicU8; PATH_CAP] = make_zeroed_atomics();
static SOCKET_PATH_LEN: AtomicUsize = AtomicUsize::new(0);
static PID_PATH: [AtomicU8; PATH_CAP] = make_zeroed_atomics();
static PID_PATH_LEN: AtomicUsize = AtomicUsize::new(0);

const fn make_zeroed_atomics() -> [AtomicU8; PATH_CAP] {
    [const { AtomicU8::new(0) }; PATH_CAP]
}

/// Install the daemon's signal policy. Call exactly once, after the socket
/// and PID file have been created and before entering the accept loop.
///
/// The paths are write-once: nothing after this call may mutate the global
/// buffers, so the handler can read them without synchronization.
pub fn install(socket_path: &Path, pid_path: &Path) {
    write_path(&SOCKET_PATH, &SOCKET_PATH_LEN, socket_path);
    write_path(&PID_PATH, &PID_PATH_LEN, pid_path);
    install_handlers();
}

fn install_handlers() {
    // SAFETY: `handle_shutdown_signal` only touches the atomics above and
    // calls `unlink`/`_exit`, both async-signal-safe; no other code mutates
    // a signal disposition for these signals.
    #[allow(unsafe_code)]
    unsafe {
        let _ = signal::signal(Signal::SIGPIPE, SigHandler::SigIgn);
        let _ = signal::signal(Signal::SIGTERM, SigHandler::Handler(handle_shutdown_signal));
        let _ = signal::signal(Signal::SIGINT, SigHandler::Handler(handle_shutdown_signal));
    }
}

extern "C" fn handle_shutdown_signal(_signum: libc::c_int) {
    unlink_path(&SOCKET_PATH, &SOCKET_PATH_LEN);
    unlink_path(&PID_PATH, &PID_PATH_LEN);
    exit_now();
}

fn exit_now() -> ! {
    // SAFETY: `_exit` is async-signal-safe (unlike `std::process::exit`,
    // which may run atexit handlers); skipping those is required here.
    #[allow(unsafe_code)]
    unsafe {
        libc::_exit(0)
    }
}

fn write_path(storage: &[AtomicU8; PATH_CAP], len: &AtomicUsize, path: &Path) {
    let bytes = path.as_os_str().as_bytes();
    let n = bytes.len().min(PATH_CAP - 1);
    for (slot, byte) in storage.iter().zip(bytes.iter().take(n)) {
        slot.store(*byte, Ordering::Relaxed);
    }
    storage[n].store(0, Ordering::Relaxed);
    len.store(n, Ordering::Relaxed);
}

fn unlink_path(storage: &[AtomicU8; PATH_CAP], len: &AtomicUsize) {
    let n = len.load(Ordering::Relaxed);
    if n == 0 {
        return;
    }
    let mut buf = [0u8; PATH_CAP];
    for (slot, atom) in buf.iter_mut().zip(storage.iter()) {
        *slot = atom.load(Ordering::Relaxed);
    }
    // SAFETY: `buf` is NUL-terminated by `write_path` and lives for the
    // duration of the call; `unlink` does not retain the pointer.
    #[allow(unsafe_code)]
    unsafe {
        libc::unlink(buf.as_ptr() as *const libc::c_char);
    }
}

#[cfg(test)]
#[path = "signal_tests.rs"]
mod tests;
