// SPDX-License-Identifier: MIT

//! Frame rendering: session bar, bordered
//! source/sidebar panes, a log pane and a footer, built into one buffer
//! and flushed in a single write. In-place — no full-screen clear — so
//! `\x1B[K` trims stale tails and a trailing `\x1B[J` handles shrink.

use std::fmt::Write as _;

use crate::sidebar::{self, SidebarRow};
use crate::state::{DashboardState, Pane};

const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";
const CLEAR_LINE: &str = "\x1b[K";
const CLEAR_TO_END: &str = "\x1b[J";
const HOME: &str = "\x1b[H";

const FOOTER: &str = "q quit  Tab pane  j/k scroll  [ ] prev/next session";

/// Render one frame of `state` into a single string, ready to be written
/// and flushed atomically.
pub fn frame(state: &DashboardState) -> String {
    let (cols, _rows) = state.term_size;
    let cols = cols.max(20) as usize;
    let mut out = String::with_capacity(4096);
    let _ = write!(out, "{HOME}");

    render_session_bar(&mut out, state);
    render_top_border(&mut out, state, cols);

    let content_rows = state.content_rows();
    render_main_area(&mut out, state, cols, content_rows);

    render_rule(&mut out, cols);
    render_log_pane(&mut out, state, cols);
    render_bottom_border(&mut out, cols);
    render_footer(&mut out, cols);

    let _ = write!(out, "{CLEAR_TO_END}");
    out
}

fn render_session_bar(out: &mut String, state: &DashboardState) {
    if state.session_count() == 0 {
        let _ = writeln!(out, "(no sessions){CLEAR_LINE}\r");
        return;
    }
    let mut bar = String::new();
    for view in state.sessions() {
        let filled = state.focused_id() == Some(&view.id);
        bar.push(if filled { '●' } else { '○' });
        bar.push(' ');
    }
    let _ = writeln!(out, "{bar}{CLEAR_LINE}\r");
}

fn render_top_border(out: &mut String, state: &DashboardState, cols: usize) {
    let half = cols / 2;
    let source_title = pane_title("source", state.active_pane == Pane::Source);
    let sidebar_title = pane_title("sidebar", state.active_pane == Pane::Sidebar);
    let _ = writeln!(
        out,
        "┌{:─<width$}┬ {sidebar_title} {CLEAR_LINE}\r",
        format!("─ {source_title} "),
        width = half.saturating_sub(1)
    );
}

fn pane_title(name: &str, active: bool) -> String {
    if active {
        format!("{BOLD}{name}{RESET}")
    } else {
        name.to_owned()
    }
}

fn render_main_area(out: &mut String, state: &DashboardState, cols: usize, content_rows: usize) {
    let half = cols / 2;
    let empty_view_rows: Vec<crate::source::SourceLine> = Vec::new();
    let (source_lines, sidebar_rows, sidebar_scroll) = match state.focused() {
        Some(view) => (
            view.source.as_ref().map(|w| w.lines.as_slice()).unwrap_or(&[]),
            sidebar::rows(view),
            view.sidebar_scroll,
        ),
        None => (empty_view_rows.as_slice(), Vec::new(), 0),
    };
    let source_scroll = state
        .focused()
        .and_then(|v| v.source.as_ref())
        .map(|w| w.scroll)
        .unwrap_or(0);

    for row in 0..content_rows {
        let left = source_lines
            .get(source_scroll + row)
            .map(|line| format!("{:>4} {}{}", line.line_num, if line.is_current { "▸" } else { " " }, line.text))
            .unwrap_or_default();
        let right = sidebar_rows
            .get(sidebar_scroll + row)
            .map(render_sidebar_row)
            .unwrap_or_default();
        let _ = writeln!(
            out,
            "{:<width$}│{right}{CLEAR_LINE}\r",
            truncate_cols(&left, half.saturating_sub(1)),
            width = half.saturating_sub(1)
        );
    }
}

fn render_sidebar_row(row: &SidebarRow) -> String {
    match row {
        SidebarRow::Frame { text, .. } => text.clone(),
        SidebarRow::LocalsHeader => format!("{BOLD}Locals{RESET}"),
        SidebarRow::Local { text } => format!("  {text}"),
        SidebarRow::BreakpointsHeader => format!("{BOLD}Breakpoints{RESET}"),
        SidebarRow::Breakpoint { text } => format!("  {text}"),
    }
}

fn render_rule(out: &mut String, cols: usize) {
    let _ = writeln!(out, "{:─<cols$}{CLEAR_LINE}\r", "");
}

fn render_log_pane(out: &mut String, state: &DashboardState, cols: usize) {
    const LOG_ROWS: usize = 5;
    // With no session focused there is no per-session log to show, so fall
    // back to the global log — this is also the only place session-less
    // events (a malformed line, a bare `error`) ever become visible.
    let (label, entries): (&str, Vec<_>) = match state.focused() {
        Some(view) => ("log", view.log.iter().collect()),
        None => ("log (global)", state.global_log.iter().collect()),
    };
    let title = pane_title(label, state.active_pane == Pane::Log);
    let _ = writeln!(out, "{title}{CLEAR_LINE}\r");

    let start = entries.len().saturating_sub(LOG_ROWS);
    for entry in &entries[start..] {
        let mark = if entry.is_error { '✗' } else { '·' };
        let line = format!("{mark} {}: {}", entry.tool, entry.summary);
        let _ = writeln!(out, "{}{CLEAR_LINE}\r", truncate_cols(&line, cols));
    }
    for _ in entries.len().saturating_sub(start)..LOG_ROWS {
        let _ = writeln!(out, "{CLEAR_LINE}\r");
    }
}

fn render_bottom_border(out: &mut String, cols: usize) {
    let _ = writeln!(out, "└{:─<width$}┘{CLEAR_LINE}\r", "", width = cols.saturating_sub(2));
}

fn render_footer(out: &mut String, cols: usize) {
    let _ = write!(out, "{}{CLEAR_LINE}", truncate_cols(FOOTER, cols));
}

fn truncate_cols(s: &str, cols: usize) -> String {
    if s.chars().count() <= cols {
        s.to_owned()
    } else {
        s.chars().take(cols).collect()
    }
}

#[cfg(test)]
#[path = "render_tests.rs"]
mod tests;
