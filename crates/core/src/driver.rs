// SPDX-License-Identifier: MIT

//! The driver capability contract.
//!
//! A driver is a runtime-polymorphic capability table rather than a fixed
//! interface, because DWARF-based and DAP-based backends share most
//! operations but differ widely in the tail. Mandatory operations are plain
//! trait methods; everything else is optional and defaults to
//! `Err(DriverError::NotSupported(op))` so an absent operation is
//! observable by the dispatcher as a distinct, stable error kind rather
//! than an adapter-side failure.
//!
//! Concrete backends (a native DWARF engine, a proxy to an external Debug
//! Adapter Protocol process) are out of scope for this crate — only the
//! contract lives here. See `cogdbg-drivers` for capability-table-exercising
//! stand-ins.

use std::path::PathBuf;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Which family of backend a session's driver belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DriverKind {
    Native,
    Dap,
}

/// Name of an optional driver operation, used in `NotSupported` errors and
/// in capability-probing tests.
pub type OperationName = &'static str;

/// Errors a driver call can produce.
#[derive(Debug, Error)]
pub enum DriverError {
    /// The driver does not implement this optional operation. Distinct from
    /// every other error kind so the dispatcher and dashboard can render it
    /// as "not supported" rather than a generic failure.
    #[error("not supported: {0}")]
    NotSupported(OperationName),

    #[error("unknown breakpoint id: {0}")]
    UnknownBreakpoint(u64),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("backend failed: {0}")]
    BackendFailed(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration for `launch`. Kept intentionally thin — concrete drivers
/// interpret `env`/`args` however their backend requires.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LaunchConfig {
    pub program: String,
    #[serde(default)]
    pub args: Vec<String>,
    #[serde(default)]
    pub cwd: Option<PathBuf>,
    #[serde(default)]
    pub env: Vec<(String, String)>,
    #[serde(default)]
    pub stop_on_entry: bool,
}

/// An action passed to `run`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunAction {
    Continue,
    StepOver,
    StepIn,
    StepOut,
    ReverseContinue,
    ReverseStepOver,
    Pause,
}

/// Options accompanying a `run` action.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunOptions {
    #[serde(default)]
    pub thread_id: Option<u64>,
    #[serde(default)]
    pub single_thread: bool,
    #[serde(default)]
    pub timeout_ms: Option<u64>,
}

/// A source location (file, line, optional function name).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub file: PathBuf,
    pub line: u32,
    #[serde(default)]
    pub function: Option<String>,
}

/// Why a `run`/`step` call returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    Breakpoint,
    Step,
    Exception,
    Pause,
    Exit,
    Entry,
}

/// A single local variable, as surfaced by `inspect` or bundled into a
/// `StopState`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variable {
    pub name: String,
    pub value: String,
    #[serde(default)]
    pub ty: Option<String>,
}

/// One frame of a stack trace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StackFrame {
    pub index: u32,
    pub name: String,
    #[serde(default)]
    pub location: Option<Location>,
}

/// Result of a `run`/`step`/`goto` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StopState {
    pub reason: StopReason,
    #[serde(default)]
    pub location: Option<Location>,
    #[serde(default)]
    pub exit_code: Option<i32>,
    #[serde(default)]
    pub locals: Vec<Variable>,
    /// Messages accumulated while traversing any log-points hit during the
    /// run.
    #[serde(default)]
    pub log_messages: Vec<String>,
}

/// Request to set a breakpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BreakpointSpec {
    pub file: PathBuf,
    pub line: u32,
    #[serde(default)]
    pub condition: Option<String>,
    #[serde(default)]
    pub hit_condition: Option<String>,
    #[serde(default)]
    pub log_message: Option<String>,
}

/// A breakpoint as reported back to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakpointInfo {
    pub id: u64,
    pub file: PathBuf,
    pub line: u32,
    pub verified: bool,
    #[serde(default)]
    pub condition: Option<String>,
    #[serde(default)]
    pub hit_condition: Option<String>,
    #[serde(default)]
    pub log_message: Option<String>,
}

/// Kind of inspection query (`locals`, `evaluate`, …); left as a tagged
/// variant so drivers can grow new request shapes without touching the
/// dispatcher.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InspectRequest {
    Locals { frame_index: u32 },
    Evaluate { expression: String, frame_index: u32 },
}

/// Result of an `inspect` call.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InspectResult {
    Locals { variables: Vec<Variable> },
    Evaluate { result: String },
}

/// A driver instance as returned by `set_function_breakpoint` probes,
/// `disassemble`, etc. Kept as opaque JSON so the dispatcher does not need
/// to know every optional operation's exact result shape; it only needs to
/// know whether the call succeeded.
pub type RawResult = serde_json::Value;

/// Capability table exposed by any debug backend.
///
/// Mandatory operations are plain methods. Every optional operation has a
/// default body returning `DriverError::NotSupported` with its own name, so
/// a driver only needs to override the handful it actually implements.
#[async_trait]
pub trait Driver: Send + Sync {
    fn kind(&self) -> DriverKind;

    // -- mandatory --

    async fn launch(&self, config: LaunchConfig) -> Result<(), DriverError>;

    async fn run(&self, action: RunAction, options: RunOptions) -> Result<StopState, DriverError>;

    async fn set_breakpoint(&self, spec: BreakpointSpec) -> Result<BreakpointInfo, DriverError>;

    async fn remove_breakpoint(&self, id: u64) -> Result<(), DriverError>;

    async fn list_breakpoints(&self) -> Result<Vec<BreakpointInfo>, DriverError>;

    async fn inspect(&self, request: InspectRequest) -> Result<InspectResult, DriverError>;

    async fn stop(&self) -> Result<(), DriverError>;

    async fn deinit(&self) -> Result<(), DriverError>;

    /// OS pid of the debuggee (native) or the adapter (dap).
    ///
    /// Must be callable from a thread other than the one blocked in `run`,
    /// so the daemon can asynchronously force-stop a session whose `run` is
    /// blocked in a kernel wait (see `cogdbg-daemon::dispatcher`).
    fn get_pid(&self) -> Result<u32, DriverError> {
        Err(DriverError::NotSupported("get_pid"))
    }

    // -- optional: inspection --

    async fn threads(&self) -> Result<RawResult, DriverError> {
        Err(DriverError::NotSupported("threads"))
    }

    async fn stack_trace(&self) -> Result<Vec<StackFrame>, DriverError> {
        Err(DriverError::NotSupported("stack_trace"))
    }

    async fn scopes(&self, _frame_index: u32) -> Result<RawResult, DriverError> {
        Err(DriverError::NotSupported("scopes"))
    }

    async fn read_memory(&self, _address: u64, _count: usize) -> Result<Vec<u8>, DriverError> {
        Err(DriverError::NotSupported("read_memory"))
    }

    async fn write_memory(&self, _address: u64, _bytes: &[u8]) -> Result<(), DriverError> {
        Err(DriverError::NotSupported("write_memory"))
    }

    async fn disassemble(&self, _address: u64, _count: usize) -> Result<RawResult, DriverError> {
        Err(DriverError::NotSupported("disassemble"))
    }

    async fn read_registers(&self) -> Result<RawResult, DriverError> {
        Err(DriverError::NotSupported("read_registers"))
    }

    async fn write_registers(&self, _values: RawResult) -> Result<(), DriverError> {
        Err(DriverError::NotSupported("write_registers"))
    }

    async fn modules(&self) -> Result<RawResult, DriverError> {
        Err(DriverError::NotSupported("modules"))
    }

    async fn loaded_sources(&self) -> Result<RawResult, DriverError> {
        Err(DriverError::NotSupported("loaded_sources"))
    }

    async fn source(&self, _reference: u64) -> Result<String, DriverError> {
        Err(DriverError::NotSupported("source"))
    }

    async fn find_symbol(&self, _name: &str) -> Result<RawResult, DriverError> {
        Err(DriverError::NotSupported("find_symbol"))
    }

    async fn variable_location(&self, _name: &str) -> Result<RawResult, DriverError> {
        Err(DriverError::NotSupported("variable_location"))
    }

    async fn exception_info(&self) -> Result<RawResult, DriverError> {
        Err(DriverError::NotSupported("exception_info"))
    }

    // -- optional: breakpoints --

    async fn set_function_breakpoint(&self, _name: &str) -> Result<BreakpointInfo, DriverError> {
        Err(DriverError::NotSupported("set_function_breakpoint"))
    }

    async fn set_exception_breakpoints(&self, _filters: &[String]) -> Result<(), DriverError> {
        Err(DriverError::NotSupported("set_exception_breakpoints"))
    }

    async fn set_data_breakpoint(&self, _data_id: &str) -> Result<BreakpointInfo, DriverError> {
        Err(DriverError::NotSupported("set_data_breakpoint"))
    }

    async fn data_breakpoint_info(&self, _name: &str) -> Result<RawResult, DriverError> {
        Err(DriverError::NotSupported("data_breakpoint_info"))
    }

    async fn set_instruction_breakpoints(
        &self,
        _addresses: &[u64],
    ) -> Result<Vec<BreakpointInfo>, DriverError> {
        Err(DriverError::NotSupported("set_instruction_breakpoints"))
    }

    async fn breakpoint_locations(
        &self,
        _file: &std::path::Path,
        _line: u32,
    ) -> Result<RawResult, DriverError> {
        Err(DriverError::NotSupported("breakpoint_locations"))
    }

    // -- optional: control flow --

    async fn attach(&self, _pid: u32) -> Result<(), DriverError> {
        Err(DriverError::NotSupported("attach"))
    }

    async fn detach(&self) -> Result<(), DriverError> {
        Err(DriverError::NotSupported("detach"))
    }

    async fn terminate(&self) -> Result<(), DriverError> {
        Err(DriverError::NotSupported("terminate"))
    }

    async fn terminate_threads(&self, _thread_ids: &[u64]) -> Result<(), DriverError> {
        Err(DriverError::NotSupported("terminate_threads"))
    }

    async fn restart(&self) -> Result<(), DriverError> {
        Err(DriverError::NotSupported("restart"))
    }

    async fn restart_frame(&self, _frame_index: u32) -> Result<(), DriverError> {
        Err(DriverError::NotSupported("restart_frame"))
    }

    async fn goto(&self, _file: &std::path::Path, _line: u32) -> Result<StopState, DriverError> {
        Err(DriverError::NotSupported("goto"))
    }

    async fn goto_targets(
        &self,
        _file: &std::path::Path,
        _line: u32,
    ) -> Result<RawResult, DriverError> {
        Err(DriverError::NotSupported("goto_targets"))
    }

    async fn step_in_targets(&self, _frame_index: u32) -> Result<RawResult, DriverError> {
        Err(DriverError::NotSupported("step_in_targets"))
    }

    async fn cancel(&self, _request_id: &str) -> Result<(), DriverError> {
        Err(DriverError::NotSupported("cancel"))
    }

    // -- optional: misc --

    async fn set_variable(
        &self,
        _scope_ref: u64,
        _name: &str,
        _value: &str,
    ) -> Result<Variable, DriverError> {
        Err(DriverError::NotSupported("set_variable"))
    }

    async fn set_expression(&self, _expression: &str, _value: &str) -> Result<(), DriverError> {
        Err(DriverError::NotSupported("set_expression"))
    }

    async fn completions(&self, _text: &str) -> Result<RawResult, DriverError> {
        Err(DriverError::NotSupported("completions"))
    }

    async fn capabilities(&self) -> Result<RawResult, DriverError> {
        Err(DriverError::NotSupported("capabilities"))
    }

    async fn drain_notifications(&self) -> Result<Vec<RawResult>, DriverError> {
        Err(DriverError::NotSupported("drain_notifications"))
    }

    async fn load_core(&self, _path: &std::path::Path) -> Result<(), DriverError> {
        Err(DriverError::NotSupported("load_core"))
    }

    async fn raw_request(
        &self,
        _command: &str,
        _arguments: RawResult,
    ) -> Result<RawResult, DriverError> {
        Err(DriverError::NotSupported("raw_request"))
    }
}

#[cfg(test)]
#[path = "driver_tests.rs"]
mod tests;
