// SPDX-License-Identifier: MIT

//! Scriptable fake driver for daemon/dispatcher unit tests — records every
//! call it receives and returns pre-programmed results.

use std::collections::VecDeque;

use async_trait::async_trait;
use cogdbg_core::{
    BreakpointInfo, BreakpointSpec, Driver, DriverError, DriverKind, InspectRequest,
    InspectResult, LaunchConfig, RunAction, RunOptions, StopState,
};
use parking_lot::Mutex;

/// A single recorded call, for assertions in daemon/dispatcher tests.
#[derive(Debug, Clone)]
pub enum DriverCall {
    Launch(LaunchConfig),
    Run(RunAction, RunOptions),
    SetBreakpoint(BreakpointSpec),
    RemoveBreakpoint(u64),
    ListBreakpoints,
    Inspect(InspectRequest),
    Stop,
    Deinit,
}

struct State {
    calls: Vec<DriverCall>,
    run_results: VecDeque<Result<StopState, DriverError>>,
    breakpoints: Vec<BreakpointInfo>,
    next_bp_id: u64,
    pid: u32,
}

/// A `Driver` whose mandatory operations are backed by a small in-memory
/// script: queued `run` results are returned in order, breakpoints are
/// tracked faithfully, and every call is recorded for later inspection.
pub struct FakeDriver {
    kind: DriverKind,
    state: Mutex<State>,
}

impl FakeDriver {
    pub fn new(kind: DriverKind) -> Self {
        Self {
            kind,
            state: Mutex::new(State {
                calls: Vec::new(),
                run_results: VecDeque::new(),
                breakpoints: Vec::new(),
                next_bp_id: 1,
                pid: 4242,
            }),
        }
    }

    /// Queue the result of the next `run` call.
    pub fn push_run_result(&self, result: Result<StopState, DriverError>) {
        self.state.lock().run_results.push_back(result);
    }

    /// Snapshot of every call received so far, oldest first.
    pub fn calls(&self) -> Vec<DriverCall> {
        self.state.lock().calls.clone()
    }

    pub fn set_pid(&self, pid: u32) {
        self.state.lock().pid = pid;
    }
}

#[async_trait]
impl Driver for FakeDriver {
    fn kind(&self) -> DriverKind {
        self.kind
    }

    async fn launch(&self, config: LaunchConfig) -> Result<(), DriverError> {
        self.state.lock().calls.push(DriverCall::Launch(config));
        Ok(())
    }

    async fn run(&self, action: RunAction, options: RunOptions) -> Result<StopState, DriverError> {
        let mut state = self.state.lock();
        state.calls.push(DriverCall::Run(action, options));
        state.run_results.pop_front().unwrap_or(Ok(StopState {
            reason: cogdbg_core::StopReason::Pause,
            location: None,
            exit_code: None,
            locals: vec![],
            log_messages: vec![],
        }))
    }

    async fn set_breakpoint(&self, spec: BreakpointSpec) -> Result<BreakpointInfo, DriverError> {
        let mut state = self.state.lock();
        state.calls.push(DriverCall::SetBreakpoint(spec.clone()));
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
        Ok(info)
    }

    async fn remove_breakpoint(&self, id: u64) -> Result<(), DriverError> {
        let mut state = self.state.lock();
        state.calls.push(DriverCall::RemoveBreakpoint(id));
        state.breakpoints.retain(|b| b.id != id);
        Ok(())
    }

    async fn list_breakpoints(&self) -> Result<Vec<BreakpointInfo>, DriverError> {
        let mut state = self.state.lock();
        state.calls.push(DriverCall::ListBreakpoints);
        Ok(state.breakpoints.clone())
    }

    async fn inspect(&self, request: InspectRequest) -> Result<InspectResult, DriverError> {
        self.state.lock().calls.push(DriverCall::Inspect(request));
        Ok(InspectResult::Locals { variables: vec![] })
    }

    async fn stop(&self) -> Result<(), DriverError> {
        self.state.lock().calls.push(DriverCall::Stop);
        Ok(())
    }

    async fn deinit(&self) -> Result<(), DriverError> {
        self.state.lock().calls.push(DriverCall::Deinit);
        Ok(())
    }

    fn get_pid(&self) -> Result<u32, DriverError> {
        Ok(self.state.lock().pid)
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
