// SPDX-License-Identifier: MIT

//! Keyboard handling. Reads are done in chunks of
//! up to 8 bytes, enough to hold an escape
//! sequence for an arrow key alongside a plain keystroke.

use crate::state::DashboardState;

/// A recognized keystroke, independent of how many raw bytes it took.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Quit,
    Tab,
    Down,
    Up,
    PrevSession,
    NextSession,
    Unknown,
}

/// Parse one logical keystroke out of a raw read from stdin. Only ever
/// looks at the first recognized sequence; a read carrying more than one
/// keystroke is handled by calling this once per split chunk.
pub fn parse(bytes: &[u8]) -> Key {
    match bytes {
        [0x03] | [b'q'] => Key::Quit,
        [b'\t'] => Key::Tab,
        [b'j'] => Key::Down,
        [b'k'] => Key::Up,
        [0x1b, b'[', b'B'] => Key::Down,
        [0x1b, b'[', b'A'] => Key::Up,
        [b'['] => Key::PrevSession,
        [b']'] => Key::NextSession,
        _ => Key::Unknown,
    }
}

/// Apply `key` to `state`. Returns `true` if the dashboard should quit.
pub fn apply(state: &mut DashboardState, key: Key) -> bool {
    match key {
        Key::Quit => return true,
        Key::Tab => state.cycle_pane(),
        Key::Down => state.scroll_active(1),
        Key::Up => state.scroll_active(-1),
        Key::PrevSession => state.switch_session(false),
        Key::NextSession => state.switch_session(true),
        Key::Unknown => {}
    }
    false
}

#[cfg(test)]
#[path = "keyboard_tests.rs"]
mod tests;
