// SPDX-License-Identifier: MIT

//! Capability profile of a native DWARF-based engine: strong on in-process
//! introspection (stack trace, memory, disassembly), no notion of an
//! external adapter protocol (no `modules`/`loaded_sources`/`restart`).

use async_trait::async_trait;
use cogdbg_core::{
    BreakpointInfo, BreakpointSpec, Driver, DriverError, DriverKind, InspectRequest,
    InspectResult, LaunchConfig, RawResult, RunAction, RunOptions, StackFrame, StopState,
};

use crate::debuggee::Debuggee;

/// Stand-in for a native DWARF debug engine.
#[derive(Default)]
pub struct NativeDriver {
    debuggee: Debuggee,
}

impl NativeDriver {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Driver for NativeDriver {
    fn kind(&self) -> DriverKind {
        DriverKind::Native
    }

    async fn launch(&self, config: LaunchConfig) -> Result<(), DriverError> {
        self.debuggee.launch(config)
    }

    async fn run(&self, action: RunAction, options: RunOptions) -> Result<StopState, DriverError> {
        Ok(self.debuggee.run(action, options))
    }

    async fn set_breakpoint(&self, spec: BreakpointSpec) -> Result<BreakpointInfo, DriverError> {
        Ok(self.debuggee.set_breakpoint(spec))
    }

    async fn remove_breakpoint(&self, id: u64) -> Result<(), DriverError> {
        self.debuggee.remove_breakpoint(id);
        Ok(())
    }

    async fn list_breakpoints(&self) -> Result<Vec<BreakpointInfo>, DriverError> {
        Ok(self.debuggee.list_breakpoints())
    }

    async fn inspect(&self, request: InspectRequest) -> Result<InspectResult, DriverError> {
        Ok(self.debuggee.inspect(request))
    }

    async fn stop(&self) -> Result<(), DriverError> {
        Ok(())
    }

    async fn deinit(&self) -> Result<(), DriverError> {
        Ok(())
    }

    fn get_pid(&self) -> Result<u32, DriverError> {
        Ok(self.debuggee.get_pid())
    }

    async fn threads(&self) -> Result<RawResult, DriverError> {
        Ok(serde_json::json!([{"id": 1, "name": "main"}]))
    }

    async fn stack_trace(&self) -> Result<Vec<StackFrame>, DriverError> {
        Ok(self.debuggee.stack_trace())
    }

    async fn scopes(&self, frame_index: u32) -> Result<RawResult, DriverError> {
        Ok(serde_json::json!([{"name": "locals", "frame_index": frame_index}]))
    }

    async fn read_memory(&self, address: u64, count: usize) -> Result<Vec<u8>, DriverError> {
        Ok(vec![0u8; count.min(4096)].into_iter().enumerate().map(|(i, _)| {
            (address.wrapping_add(i as u64) & 0xff) as u8
        }).collect())
    }

    async fn disassemble(&self, address: u64, count: usize) -> Result<RawResult, DriverError> {
        Ok(serde_json::json!({"address": address, "instructions": count}))
    }

    async fn set_function_breakpoint(&self, name: &str) -> Result<BreakpointInfo, DriverError> {
        Ok(self.debuggee.set_breakpoint(cogdbg_core::BreakpointSpec {
            file: std::path::PathBuf::from(format!("<function:{name}>")),
            line: 0,
            condition: None,
            hit_condition: None,
            log_message: None,
        }))
    }
}

#[cfg(test)]
#[path = "native_tests.rs"]
mod tests;
