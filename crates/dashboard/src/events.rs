// SPDX-License-Identifier: MIT

//! Event-stream framing: one JSON object per
//! line per client. Partial lines are preserved in a per-client buffer so
//! bytes from different daemons are never interleaved into the same parse.

use cogdbg_core::{DashboardEvent, DASHBOARD_CLIENT_BUF_BYTES};

/// Outcome of parsing one complete line.
pub enum ParsedLine {
    Event(DashboardEvent),
    /// The line was not valid JSON (or not an event object at all).
    Invalid,
}

/// Reassembles newline-framed JSON from one client's byte stream.
pub struct LineBuffer {
    buf: Vec<u8>,
}

impl Default for LineBuffer {
    fn default() -> Self {
        Self {
            buf: Vec::with_capacity(256),
        }
    }
}

impl LineBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed newly read bytes, returning every complete line parsed so far.
    /// Bytes after the last newline are kept for the next call.
    ///
    /// If the buffer grows past [`DASHBOARD_CLIENT_BUF_BYTES`] without a
    /// newline, the accumulated bytes are discarded as a single `Invalid`
    /// line so one runaway client can't grow the dashboard without bound.
    pub fn feed(&mut self, bytes: &[u8]) -> Vec<ParsedLine> {
        self.buf.extend_from_slice(bytes);
        let mut out = Vec::new();

        while let Some(pos) = self.buf.iter().position(|&b| b == b'\n') {
            let line: Vec<u8> = self.buf.drain(..=pos).collect();
            let line = &line[..line.len() - 1];
            out.push(parse_line(line));
        }

        if self.buf.len() > DASHBOARD_CLIENT_BUF_BYTES {
            self.buf.clear();
            out.push(ParsedLine::Invalid);
        }
        out
    }
}

fn parse_line(line: &[u8]) -> ParsedLine {
    if line.iter().all(u8::is_ascii_whitespace) {
        return ParsedLine::Invalid;
    }
    match serde_json::from_slice::<DashboardEvent>(line) {
        Ok(event) => ParsedLine::Event(event),
        Err(_) => ParsedLine::Invalid,
    }
}

#[cfg(test)]
#[path = "events_tests.rs"]
mod tests;
