// SPDX-License-Identifier: MIT

//! Shared in-process fake debuggee used by both `NativeDriver` and
//! `DapDriver`. Models just enough state (a monotonic program counter,
//! breakpoints keyed by line, a couple of locals) to make `run`/`step`,
//! breakpoint set/remove/list and `inspect` behave like a real backend
//! would, without touching an actual process.

use std::path::PathBuf;
use std::sync::atomic::{AtomicU32, Ordering};

use cogdbg_core::{
    BreakpointInfo, BreakpointSpec, DriverError, InspectRequest, InspectResult, LaunchConfig,
    Location, RunAction, RunOptions, StopReason, StopState, Variable,
};
use parking_lot::Mutex;

static NEXT_FAKE_PID: AtomicU32 = AtomicU32::new(10_000);

pub(crate) struct Debuggee {
    inner: Mutex<State>,
    pid: u32,
}

struct State {
    program: Option<String>,
    source_file: Option<PathBuf>,
    breakpoints: Vec<BreakpointInfo>,
    next_bp_id: u64,
    line: u32,
    exited: bool,
    exit_code: i32,
}

/// Line at which the fake debuggee naturally exits if no breakpoint stops
/// it first.
const EXIT_LINE: u32 = 1_000;

impl Default for Debuggee {
    fn default() -> Self {
        Self {
            inner: Mutex::new(State {
                program: None,
                source_file: None,
                breakpoints: Vec::new(),
                next_bp_id: 1,
                line: 0,
                exited: false,
                exit_code: 0,
            }),
            pid: NEXT_FAKE_PID.fetch_add(1, Ordering::Relaxed),
        }
    }
}

impl Debuggee {
    pub(crate) fn launch(&self, config: LaunchConfig) -> Result<(), DriverError> {
        let mut state = self.inner.lock();
        state.program = Some(config.program);
        state.source_file = config.cwd.clone();
        state.line = if config.stop_on_entry { 1 } else { 0 };
        Ok(())
    }

    pub(crate) fn get_pid(&self) -> u32 {
        self.pid
    }

    pub(crate) fn run(&self, action: RunAction, _options: RunOptions) -> StopState {
        let mut state = self.inner.lock();
        if state.exited {
            return StopState {
                reason: StopReason::Exit,
                location: None,
                exit_code: Some(state.exit_code),
                locals: vec![],
                log_messages: vec![],
            };
        }

        let step = matches!(
            action,
            RunAction::StepOver | RunAction::StepIn | RunAction::StepOut
        );

        loop {
            state.line += 1;
            if state.line >= EXIT_LINE {
                state.exited = true;
                state.exit_code = 0;
                return StopState {
                    reason: StopReason::Exit,
                    location: None,
                    exit_code: Some(0),
                    locals: vec![],
                    log_messages: vec![],
                };
            }

            if let Some(bp) = state.breakpoints.iter().find(|b| b.line == state.line) {
                let log_messages = match &bp.log_message {
                    Some(msg) => vec![msg.clone()],
                    None => vec![],
                };
                let location = Some(Location {
                    file: bp.file.clone(),
                    line: bp.line,
                    function: None,
                });
                return StopState {
                    reason: StopReason::Breakpoint,
                    location,
                    exit_code: None,
                    locals: fake_locals(state.line),
                    log_messages,
                };
            }

            if step {
                let location = state.source_file.clone().map(|file| Location {
                    file,
                    line: state.line,
                    function: None,
                });
                return StopState {
                    reason: StopReason::Step,
                    location,
                    exit_code: None,
                    locals: fake_locals(state.line),
                    log_messages: vec![],
                };
            }
        }
    }

    pub(crate) fn set_breakpoint(&self, spec: BreakpointSpec) -> BreakpointInfo {
        let mut state = self.inner.lock();
        let id = state.next_bp_id;
        state.next_bp_id += 1;
        let info = BreakpointInfo {
            id,
            file: spec.file,
            line: spec.line,
            verified: true,
            condition: spec.condition,
            hit_condition: spec.hit_condition,
            log_message: spec.log_message,
        };
        state.breakpoints.push(info.clone());
        info
    }

    pub(crate) fn remove_breakpoint(&self, id: u64) {
        let mut state = self.inner.lock();
        state.breakpoints.retain(|b| b.id != id);
    }

    pub(crate) fn list_breakpoints(&self) -> Vec<BreakpointInfo> {
        self.inner.lock().breakpoints.clone()
    }

    pub(crate) fn inspect(&self, request: InspectRequest) -> InspectResult {
        let state = self.inner.lock();
        match request {
            InspectRequest::Locals { .. } => InspectResult::Locals {
                variables: fake_locals(state.line),
            },
            InspectRequest::Evaluate { expression, .. } => InspectResult::Evaluate {
                result: format!("<{expression}>"),
            },
        }
    }

    pub(crate) fn stack_trace(&self) -> Vec<cogdbg_core::StackFrame> {
        let state = self.inner.lock();
        let location = state.source_file.clone().map(|file| Location {
            file,
            line: state.line,
            function: Some("main".to_owned()),
        });
        vec![cogdbg_core::StackFrame {
            index: 0,
            name: "main".to_owned(),
            location,
        }]
    }
}

fn fake_locals(line: u32) -> Vec<Variable> {
    vec![Variable {
        name: "line".to_owned(),
        value: line.to_string(),
        ty: Some("u32".to_owned()),
    }]
}
