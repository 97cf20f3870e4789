// SPDX-License-Identifier: MIT

//! The dashboard's view model: a mirror of every live session plus a
//! global ring log, owned exclusively by the event loop. Nothing outside
//! `apply_event` and the keyboard handler may mutate a view.

use std::collections::HashMap;
use std::sync::Arc;

use cogdbg_core::{
    BreakpointAction, BreakpointInfo, DashboardEvent, DriverKind, Location, RingLog, SessionId,
    SessionStatus, StackFrame, Variable, MAX_DASHBOARD_SESSIONS,
};

use crate::limits::{MAX_BREAKPOINTS, MAX_LOCALS, MAX_STACK_FRAMES};
use crate::source::{self, SourceLoader, SourceWindow};

/// One entry in a ring log: a completed tool call or an error.
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub tool: String,
    pub summary: String,
    pub is_error: bool,
}

/// Which pane currently has keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pane {
    Source,
    Sidebar,
    Log,
}

impl Pane {
    /// source -> sidebar -> log -> source.
    pub fn next(self) -> Self {
        match self {
            Pane::Source => Pane::Sidebar,
            Pane::Sidebar => Pane::Log,
            Pane::Log => Pane::Source,
        }
    }
}

/// Mirror of one live debug session, as seen by the dashboard.
pub struct SessionView {
    pub id: SessionId,
    pub driver_kind: DriverKind,
    pub program: String,
    pub status: SessionStatus,
    pub last_stop_reason: Option<String>,
    pub location: Option<Location>,
    pub stack: Vec<StackFrame>,
    pub locals: Vec<Variable>,
    pub breakpoints: Vec<BreakpointInfo>,
    pub source: Option<SourceWindow>,
    pub log: RingLog<LogEntry>,
    pub sidebar_scroll: usize,
}

impl SessionView {
    fn new(id: SessionId, driver_kind: DriverKind, program: String) -> Self {
        Self {
            id,
            driver_kind,
            program,
            status: SessionStatus::Launching,
            last_stop_reason: None,
            location: None,
            stack: Vec::new(),
            locals: Vec::new(),
            breakpoints: Vec::new(),
            source: None,
            log: RingLog::default(),
            sidebar_scroll: 0,
        }
    }
}

/// The dashboard's full state: every live view, which one is focused, the
/// global activity log, pane focus and the last known terminal size.
pub struct DashboardState {
    order: Vec<SessionId>,
    views: HashMap<SessionId, SessionView>,
    focused: Option<SessionId>,
    pub global_log: RingLog<LogEntry>,
    pub active_pane: Pane,
    pub term_size: (u16, u16),
    loader: Arc<dyn SourceLoader>,
}

impl DashboardState {
    pub fn new(loader: Arc<dyn SourceLoader>) -> Self {
        Self {
            order: Vec::new(),
            views: HashMap::new(),
            focused: None,
            global_log: RingLog::default(),
            active_pane: Pane::Source,
            term_size: (80, 24),
            loader,
        }
    }

    pub fn session_count(&self) -> usize {
        self.order.len()
    }

    pub fn focused_id(&self) -> Option<&SessionId> {
        self.focused.as_ref()
    }

    pub fn focused(&self) -> Option<&SessionView> {
        self.focused.as_ref().and_then(|id| self.views.get(id))
    }

    pub fn sessions(&self) -> impl Iterator<Item = &SessionView> {
        self.order.iter().filter_map(|id| self.views.get(id))
    }

    pub fn view(&self, id: &SessionId) -> Option<&SessionView> {
        self.views.get(id)
    }

    /// Approximate visible rows of the source/sidebar panes given the
    /// current terminal size: total rows minus session bar, borders, log
    /// separator, log pane and footer.
    pub fn content_rows(&self) -> usize {
        const CHROME_ROWS: u16 = 10;
        self.term_size.1.saturating_sub(CHROME_ROWS).max(1) as usize
    }

    pub fn resize(&mut self, cols: u16, rows: u16) {
        self.term_size = (cols, rows);
        let visible = self.content_rows();
        if let Some(id) = self.focused.clone() {
            if let Some(view) = self.views.get_mut(&id) {
                if let Some(window) = view.source.as_mut() {
                    window.clamp_scroll(visible);
                }
            }
        }
    }

    pub fn cycle_pane(&mut self) {
        self.active_pane = self.active_pane.next();
    }

    /// Scroll the active pane by `delta` rows (negative = up), clamped
    /// against its content height.
    pub fn scroll_active(&mut self, delta: i32) {
        let visible = self.content_rows();
        let Some(id) = self.focused.clone() else { return };
        let Some(view) = self.views.get_mut(&id) else { return };
        match self.active_pane {
            Pane::Source => {
                if let Some(window) = view.source.as_mut() {
                    apply_scroll_delta(&mut window.scroll, delta, window.lines.len(), visible);
                }
            }
            Pane::Sidebar => {
                let len = crate::sidebar::rows(view).len();
                apply_scroll_delta(&mut view.sidebar_scroll, delta, len, visible);
            }
            Pane::Log => {
                // The log pane always shows the tail of the ring log; there
                // is nothing further to scroll to since the ring is already
                // bounded to its visible capacity.
            }
        }
    }

    /// Move focus to the previous/next session (by insertion order),
    /// resetting source/sidebar scroll and re-centering the source pane.
    pub fn switch_session(&mut self, forward: bool) {
        if self.order.is_empty() {
            return;
        }
        let current = self
            .focused
            .as_ref()
            .and_then(|id| self.order.iter().position(|o| o == id))
            .unwrap_or(0);
        let len = self.order.len();
        let next = if forward {
            (current + 1) % len
        } else {
            (current + len - 1) % len
        };
        self.focused = Some(self.order[next].clone());
        let visible = self.content_rows();
        if let Some(view) = self.focused.clone().and_then(|id| self.views.get_mut(&id)) {
            view.sidebar_scroll = 0;
            if let Some(window) = view.source.as_mut() {
                window.recenter(visible);
            }
        }
    }

    /// Apply one parsed event to the view model. Unknown event types are
    /// ignored by construction (`DashboardEvent::Unknown` falls through).
    pub fn apply_event(&mut self, event: DashboardEvent) {
        match event {
            DashboardEvent::Launch {
                session_id,
                program,
                driver,
            } => self.on_launch(session_id, program, driver),
            DashboardEvent::Breakpoint {
                session_id,
                action,
                bp,
            } => self.on_breakpoint(&session_id, action, bp),
            DashboardEvent::Stop {
                session_id,
                reason,
                location,
                stack_trace,
                locals,
            } => self.on_stop(&session_id, reason, location, stack_trace, locals),
            DashboardEvent::Run { session_id, .. } => {
                self.set_status(&session_id, SessionStatus::Running)
            }
            DashboardEvent::Inspect { session_id, summary } => {
                self.push_log(Some(&session_id), "inspect", summary, false)
            }
            DashboardEvent::Activity {
                session_id,
                tool,
                summary,
            } => self.push_log(session_id.as_ref(), &tool, summary, false),
            DashboardEvent::SessionEnd { session_id } => self.on_session_end(&session_id),
            DashboardEvent::Error {
                session_id,
                method,
                message,
            } => self.push_log(session_id.as_ref(), &method, message, true),
            DashboardEvent::Unknown => {}
        }
    }

    /// A malformed event line: recorded once in the global log, same as a
    /// recognized `error` event.
    pub fn note_invalid_line(&mut self) {
        self.push_log(None, "dashboard", "invalid JSON from server".to_owned(), true);
    }

    fn on_launch(&mut self, session_id: SessionId, program: String, driver: DriverKind) {
        if self.views.contains_key(&session_id) {
            return;
        }
        if self.order.len() >= MAX_DASHBOARD_SESSIONS {
            return;
        }
        let first = self.order.is_empty();
        self.order.push(session_id.clone());
        self.views.insert(
            session_id.clone(),
            SessionView::new(session_id.clone(), driver, program),
        );
        if first {
            self.focused = Some(session_id);
        }
    }

    fn on_breakpoint(&mut self, session_id: &SessionId, action: BreakpointAction, bp: Option<BreakpointInfo>) {
        let Some(view) = self.views.get_mut(session_id) else { return };
        match action {
            BreakpointAction::Set => {
                if let Some(bp) = bp {
                    view.breakpoints.retain(|existing| existing.id != bp.id);
                    view.breakpoints.push(bp);
                    view.breakpoints.truncate(MAX_BREAKPOINTS);
                }
            }
            BreakpointAction::Remove => {
                if let Some(bp) = bp {
                    view.breakpoints.retain(|existing| existing.id != bp.id);
                }
            }
            BreakpointAction::List => {
                // The dispatcher emits `set`/`remove` events for mutations;
                // a bare `list` carries no authoritative new state to mirror.
            }
        }
    }

    fn on_stop(
        &mut self,
        session_id: &SessionId,
        reason: String,
        location: Option<Location>,
        stack_trace: Vec<StackFrame>,
        locals: Vec<Variable>,
    ) {
        let visible = self.content_rows();
        let loader = self.loader.clone();
        let Some(view) = self.views.get_mut(session_id) else { return };
        view.status = SessionStatus::Stopped;
        view.last_stop_reason = Some(reason);
        view.location = location.clone();
        view.stack = stack_trace;
        view.stack.truncate(MAX_STACK_FRAMES);
        view.locals = locals;
        view.locals.truncate(MAX_LOCALS);

        view.source = location.and_then(|loc| {
            if !loc.file.is_absolute() {
                return None;
            }
            source::build_window(loader.as_ref(), &loc.file, loc.line, visible)
        });
    }

    fn set_status(&mut self, session_id: &SessionId, status: SessionStatus) {
        if let Some(view) = self.views.get_mut(session_id) {
            view.status = status;
        }
    }

    fn push_log(&mut self, session_id: Option<&SessionId>, tool: &str, summary: String, is_error: bool) {
        let entry = LogEntry {
            tool: tool.to_owned(),
            summary,
            is_error,
        };
        self.global_log.push(entry.clone());
        if let Some(id) = session_id {
            if let Some(view) = self.views.get_mut(id) {
                view.log.push(entry);
            }
        }
    }

    fn on_session_end(&mut self, session_id: &SessionId) {
        self.views.remove(session_id);
        self.order.retain(|id| id != session_id);
        if self.focused.as_ref() == Some(session_id) {
            self.focused = self.order.first().cloned();
            if let Some(id) = self.focused.clone() {
                let visible = self.content_rows();
                if let Some(view) = self.views.get_mut(&id) {
                    if let Some(window) = view.source.as_mut() {
                        window.recenter(visible);
                    }
                }
            }
        }
    }
}

fn apply_scroll_delta(scroll: &mut usize, delta: i32, content_len: usize, visible_rows: usize) {
    let max = content_len.saturating_sub(visible_rows);
    let current = *scroll as i64;
    let moved = (current + delta as i64).clamp(0, max as i64);
    *scroll = moved as usize;
}

#[cfg(test)]
#[path = "state_tests.rs"]
mod tests;
