// SPDX-License-Identifier: MIT

use super::*;
use async_trait::async_trait;

/// Implements only the mandatory surface; every optional operation falls
/// through to the trait's default `NotSupported` body.
struct MinimalDriver;

#[async_trait]
impl Driver for MinimalDriver {
    fn kind(&self) -> DriverKind {
        DriverKind::Native
    }

    async fn launch(&self, _config: LaunchConfig) -> Result<(), DriverError> {
        Ok(())
    }

    async fn run(&self, _action: RunAction, _options: RunOptions) -> Result<StopState, DriverError> {
        Ok(StopState {
            reason: StopReason::Entry,
            location: None,
            exit_code: None,
            locals: vec![],
            log_messages: vec![],
        })
    }

    async fn set_breakpoint(&self, spec: BreakpointSpec) -> Result<BreakpointInfo, DriverError> {
        Ok(BreakpointInfo {
            id: 1,
            file: spec.file,
            line: spec.line,
            verified: true,
            condition: spec.condition,
            hit_condition: spec.hit_condition,
            log_message: spec.log_message,
        })
    }

    async fn remove_breakpoint(&self, _id: u64) -> Result<(), DriverError> {
        Ok(())
    }

    async fn list_breakpoints(&self) -> Result<Vec<BreakpointInfo>, DriverError> {
        Ok(vec![])
    }

    async fn inspect(&self, _request: InspectRequest) -> Result<InspectResult, DriverError> {
        Ok(InspectResult::Locals { variables: vec![] })
    }

    async fn stop(&self) -> Result<(), DriverError> {
        Ok(())
    }

    async fn deinit(&self) -> Result<(), DriverError> {
        Ok(())
    }
}

#[tokio::test]
async fn absent_optional_operation_is_not_supported() {
    let driver = MinimalDriver;
    let err = driver.stack_trace().await.unwrap_err();
    assert!(matches!(err, DriverError::NotSupported("stack_trace")));
}

#[tokio::test]
async fn absent_get_pid_is_not_supported() {
    let driver = MinimalDriver;
    let err = driver.get_pid().unwrap_err();
    assert!(matches!(err, DriverError::NotSupported("get_pid")));
}

#[tokio::test]
async fn capability_probe_does_not_mutate_state() {
    let driver = MinimalDriver;
    // Calling an absent op twice is side-effect free: both calls fail the
    // same way and list_breakpoints (mandatory, stateful in real drivers)
    // is unaffected.
    let _ = driver.read_memory(0, 8).await;
    let _ = driver.read_memory(0, 8).await;
    let bps = driver.list_breakpoints().await.unwrap();
    assert!(bps.is_empty());
}
