// SPDX-License-Identifier: MIT

//! Accept loop and event multiplexer: binds the dashboard's rendezvous
//! socket, accepts any number of daemon connections, reads stdin for
//! keystrokes, and repaints on a fixed tick and on `SIGWINCH`.
//!
//! Each client gets its own reader task so bytes from different daemons
//! are never interleaved into the same [`LineBuffer`]; every task feeds a
//! single `mpsc` channel the main loop selects over, keeping
//! `DashboardState` owned by one place.

use std::io::{self, Write};
use std::path::Path;
use std::sync::Arc;

use cogdbg_core::DASHBOARD_POLL_TIMEOUT;
use tokio::io::AsyncReadExt;
use tokio::net::{UnixListener, UnixStream};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::events::{LineBuffer, ParsedLine};
use crate::keyboard;
use crate::render;
use crate::source::SourceLoader;
use crate::state::DashboardState;
use crate::terminal;

type ClientId = u64;

enum Msg {
    Lines(ClientId, Vec<ParsedLine>),
    ClientClosed(ClientId),
    Keys(Vec<u8>),
    Resize,
}

/// Remove a stale socket file, if any, then bind a fresh listener.
///
/// A bind failure because the socket is already taken (`AddrInUse`) means
/// another dashboard is already running — that distinction is surfaced to
/// the caller rather than guessed at by probing liveness.
pub fn bind(socket_path: &Path) -> io::Result<UnixListener> {
    if socket_path.exists() && std::os::unix::net::UnixStream::connect(socket_path).is_err() {
        std::fs::remove_file(socket_path)?;
    }
    UnixListener::bind(socket_path)
}

/// Run the dashboard's event loop until the user quits or `SIGINT` arrives.
/// Puts the terminal in raw mode for the duration and always restores it
/// on the way out, however the loop ends.
pub async fn serve(listener: UnixListener, loader: Arc<dyn SourceLoader>) -> io::Result<()> {
    let _raw_mode = terminal::RawModeGuard::enter()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("failed to enter raw mode: {e}")))?;

    let mut state = DashboardState::new(loader);
    let (cols, rows) = terminal::size();
    state.resize(cols, rows);

    let (tx, mut rx) = mpsc::channel::<Msg>(256);
    spawn_stdin_reader(tx.clone());

    let mut signals = crate::signal::Signals::install()?;
    let mut ticker = tokio::time::interval(DASHBOARD_POLL_TIMEOUT);
    let mut next_client_id: ClientId = 0;

    redraw(&state);

    loop {
        tokio::select! {
            accept = listener.accept() => {
                match accept {
                    Ok((stream, _addr)) => {
                        let id = next_client_id;
                        next_client_id += 1;
                        spawn_client_reader(id, stream, tx.clone());
                    }
                    Err(e) => warn!(error = %e, "accept failed"),
                }
            }
            Some(msg) = rx.recv() => {
                if !apply(&mut state, msg) {
                    break;
                }
                redraw(&state);
            }
            _ = signals.winch.recv() => {
                let (cols, rows) = terminal::size();
                state.resize(cols, rows);
                redraw(&state);
            }
            _ = signals.int.recv() => {
                info!("SIGINT received, shutting down");
                break;
            }
            _ = ticker.tick() => {
                redraw(&state);
            }
        }
    }

    Ok(())
}

/// Apply one multiplexed message to `state`. Returns `false` if the loop
/// should exit (the user pressed `q`/Ctrl-C).
fn apply(state: &mut DashboardState, msg: Msg) -> bool {
    match msg {
        Msg::Lines(_client, lines) => {
            for line in lines {
                match line {
                    ParsedLine::Event(event) => state.apply_event(event),
                    ParsedLine::Invalid => state.note_invalid_line(),
                }
            }
            true
        }
        Msg::ClientClosed(client) => {
            debug!(client, "dashboard client disconnected");
            true
        }
        Msg::Keys(bytes) => {
            for chunk in split_keystrokes(&bytes) {
                if keyboard::apply(state, keyboard::parse(chunk)) {
                    return false;
                }
            }
            true
        }
        Msg::Resize => true,
    }
}

/// A single `read(stdin, 8 bytes)` can carry more than one keystroke
/// (e.g. an escape sequence followed by a plain key); recognized
/// sequences are 1 or 3 bytes, so greedily take 3 when the buffer starts
/// with ESC and at least 3 bytes remain.
fn split_keystrokes(bytes: &[u8]) -> Vec<&[u8]> {
    let mut out = Vec::new();
    let mut rest = bytes;
    while !rest.is_empty() {
        let take = if rest[0] == 0x1b && rest.len() >= 3 { 3 } else { 1 };
        out.push(&rest[..take]);
        rest = &rest[take..];
    }
    out
}

fn redraw(state: &DashboardState) {
    let frame = render::frame(state);
    let mut out = io::stdout();
    let _ = out.write_all(frame.as_bytes());
    let _ = out.flush();
}

fn spawn_client_reader(id: ClientId, mut stream: UnixStream, tx: mpsc::Sender<Msg>) {
    tokio::spawn(async move {
        let mut buffer = LineBuffer::new();
        let mut chunk = [0u8; 8192];
        loop {
            match stream.read(&mut chunk).await {
                Ok(0) | Err(_) => {
                    let _ = tx.send(Msg::ClientClosed(id)).await;
                    return;
                }
                Ok(n) => {
                    let lines = buffer.feed(&chunk[..n]);
                    if !lines.is_empty() && tx.send(Msg::Lines(id, lines)).await.is_err() {
                        return;
                    }
                }
            }
        }
    });
}

fn spawn_stdin_reader(tx: mpsc::Sender<Msg>) {
    tokio::spawn(async move {
        let mut stdin = tokio::io::stdin();
        let mut chunk = [0u8; 8];
        loop {
            match stdin.read(&mut chunk).await {
                Ok(0) | Err(_) => return,
                Ok(n) => {
                    if tx.send(Msg::Keys(chunk[..n].to_vec())).await.is_err() {
                        return;
                    }
                }
            }
        }
    });
}

#[cfg(test)]
#[path = "listener_tests.rs"]
mod tests;
