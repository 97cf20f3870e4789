// SPDX-License-Identifier: MIT

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! cogdbg-core: shared types for the cog-debug daemon and dashboard.
//!
//! Everything in this crate is data: the driver capability contract, session
//! and breakpoint records, the wire protocol for the daemon socket, the
//! dashboard event frame, and small bounded collections (`RingLog`) shared by
//! both processes. Neither the daemon loop nor the dashboard renderer live
//! here — see `cogdbg-daemon` and `cogdbg-dashboard`.

pub mod driver;
pub mod error;
pub mod event;
pub mod id;
pub mod limits;
pub mod protocol;
pub mod ring;
pub mod session;

pub use driver::{
    BreakpointInfo, BreakpointSpec, Driver, DriverError, InspectRequest, InspectResult,
    LaunchConfig, Location, RunAction, RunOptions, StackFrame, StopReason, StopState, Variable,
};
pub use error::{DispatchError, ErrorCode};
pub use event::{BreakpointAction, DashboardEvent};
pub use id::ShortId;
pub use limits::*;
pub use protocol::{ToolErrorPayload, ToolRequest, ToolResponse};
pub use ring::RingLog;
pub use session::{SessionId, SessionInfo, SessionStatus};

pub use driver::DriverKind;
