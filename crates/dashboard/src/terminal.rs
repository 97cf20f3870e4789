// SPDX-License-Identifier: MIT

//! Raw-mode terminal handling: no echo, no canonical mode, no
//! signal generation from the tty itself (`Ctrl+C` is read as a keystroke
//! and handled by the dashboard, not delivered as `SIGINT` by the line
//! discipline — `SIGINT` is still installed separately for an external
//! `kill -INT`).

use std::io::Write;
use std::os::fd::{AsRawFd, BorrowedFd};

use nix::sys::termios::{self, Termios};
use nix::unistd::isatty;

/// RAII guard: restores the original termios settings and shows the cursor
/// again on drop, so a panic or early return never leaves the user's
/// terminal in raw mode with a hidden cursor.
pub struct RawModeGuard {
    original: Termios,
}

impl RawModeGuard {
    pub fn enter() -> nix::Result<Self> {
        let fd = stdin_fd();
        let original = termios::tcgetattr(fd)?;
        let mut raw = original.clone();
        termios::cfmakeraw(&mut raw);
        termios::tcsetattr(fd, termios::SetArg::TCSANOW, &raw)?;
        hide_cursor();
        Ok(Self { original })
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = termios::tcsetattr(stdin_fd(), termios::SetArg::TCSANOW, &self.original);
        show_cursor();
    }
}

fn stdin_fd() -> BorrowedFd<'static> {
    // SAFETY: stdin (fd 0) is valid for the lifetime of the process.
    #[allow(unsafe_code)]
    unsafe {
        BorrowedFd::borrow_raw(std::io::stdin().as_raw_fd())
    }
}

pub fn hide_cursor() {
    let _ = write!(std::io::stdout(), "\x1b[?25l");
    let _ = std::io::stdout().flush();
}

pub fn show_cursor() {
    let _ = write!(std::io::stdout(), "\x1b[?25h");
    let _ = std::io::stdout().flush();
}

/// Whether stdin and stdout are both connected to a real terminal.
pub fn is_tty() -> bool {
    isatty(std::io::stdin().as_raw_fd()).unwrap_or(false)
        && isatty(std::io::stdout().as_raw_fd()).unwrap_or(false)
}

/// Current terminal size `(cols, rows)` via `TIOCGWINSZ`, or a sane
/// fallback if stdout isn't a tty (e.g. under test).
pub fn size() -> (u16, u16) {
    let fd = std::io::stdout().as_raw_fd();
    let mut ws = libc::winsize {
        ws_row: 0,
        ws_col: 0,
        ws_xpixel: 0,
        ws_ypixel: 0,
    };
    // SAFETY: `ws` is a correctly laid out, stack-allocated `winsize` and
    // `fd` is stdout's fd, valid for the duration of the call.
    #[allow(unsafe_code)]
    let ret = unsafe { libc::ioctl(fd, libc::TIOCGWINSZ, &mut ws) };
    if ret == 0 && ws.ws_col > 0 && ws.ws_row > 0 {
        (ws.ws_col, ws.ws_row)
    } else {
        (80, 24)
    }
}
